use anyhow::Result;
use serde_json::json;

use habitlog::models::DateKey;
use habitlog::models::config::Config;

use super::{Session, print_json};

pub fn run(with_demo: bool, date: Option<DateKey>) -> Result<()> {
    let mut config = Config::load().unwrap_or_default();
    if config.aliases.is_empty() {
        config.aliases = Config::default_aliases();
    }
    config.save()?;

    let mut session = Session::open(date)?;
    session.save_catalog()?;

    let seeded = if with_demo {
        let days = session.config.tracking.history_days;
        session.tracker.seed_demo(days, &mut rand::thread_rng())?
    } else {
        0
    };

    print_json(
        "init",
        json!({
            "message": "Config initialized",
            "config_path": Config::path(),
            "data_dir": Config::data_dir(),
            "habits": session.tracker.catalog().len(),
            "demo_records": seeded,
        }),
    )
}
