use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

use habitlog::models::DateKey;

use super::{Session, print_json};

pub fn run(days: Option<u32>, seed: Option<u64>, date: Option<DateKey>, human: bool) -> Result<()> {
    let mut session = Session::open(date)?;
    let days = days.unwrap_or(session.config.tracking.history_days);
    let count = match seed {
        Some(s) => session.tracker.seed_demo(days, &mut StdRng::seed_from_u64(s))?,
        None => session.tracker.seed_demo(days, &mut rand::thread_rng())?,
    };

    if human {
        println!("Seeded {} demo records over {} days", count, days);
    } else {
        print_json("demo", json!({ "days": days, "records": count }))?;
    }
    Ok(())
}
