pub mod config;
pub mod demo;
pub mod habit;
pub mod init;
pub mod log;
pub mod progress;
pub mod quick;
pub mod show;

use anyhow::Result;
use serde_json::Value;

use habitlog::core::tracker::Tracker;
use habitlog::db::Database;
use habitlog::models::config::Config;
use habitlog::models::record::{FieldValue, Fields};
use habitlog::models::{DateKey, HabitType};
use habitlog::output;

/// Loaded config plus a tracker over the on-disk store.
pub struct Session {
    pub config: Config,
    pub tracker: Tracker<Database>,
}

impl Session {
    pub fn open(date: Option<DateKey>) -> Result<Self> {
        let config = Config::load()?;
        let db = Database::open(&Config::db_path())?;
        let catalog = db.catalog_or_default()?;
        let mut tracker = Tracker::new(db, catalog).with_locale(config.display.locale);
        if let Some(d) = date {
            tracker = tracker.with_today(d);
        }
        Ok(Self { config, tracker })
    }

    /// Resolve an alias to a habit without requiring it to be configured.
    pub fn habit(&self, input: &str) -> HabitType {
        HabitType::from(self.config.resolve_alias(input))
    }

    /// Resolve an alias and require the habit to exist in the catalog.
    pub fn configured_habit(&self, input: &str) -> Result<HabitType> {
        let habit = self.habit(input);
        if !self.tracker.catalog().contains(&habit) {
            anyhow::bail!("unknown habit: {} (see `habitlog habit list`)", habit);
        }
        Ok(habit)
    }

    pub fn save_catalog(&self) -> Result<()> {
        self.tracker.store().save_catalog(self.tracker.catalog())
    }
}

/// Collect `key=value` pairs and an optional note into submission fields.
pub fn collect_fields(pairs: Vec<(String, FieldValue)>, notes: Option<String>) -> Fields {
    let mut fields: Fields = pairs.into_iter().collect();
    if let Some(n) = notes {
        fields.insert("notes".into(), FieldValue::Text(n));
    }
    fields
}

pub fn print_json(command: &str, data: Value) -> Result<()> {
    let out = output::success(command, data);
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}
