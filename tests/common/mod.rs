#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use habitlog::core::catalog::HabitCatalog;
use habitlog::core::store::MemoryStore;
use habitlog::core::tracker::Tracker;
use habitlog::db::Database;
use habitlog::models::record::{DateKey, FieldValue, Fields, Record};
use tempfile::TempDir;

/// Create a temporary database for testing.
pub fn setup_db() -> (TempDir, Database) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).unwrap();
    (dir, db)
}

/// A fixed "today": Sunday 2024-03-10.
pub fn today() -> DateKey {
    DateKey::from_ymd(2024, 3, 10).unwrap()
}

/// In-memory tracker with the built-in catalog, pinned to [`today`].
pub fn memory_tracker() -> Tracker<MemoryStore> {
    Tracker::new(MemoryStore::new(), HabitCatalog::default()).with_today(today())
}

/// Build fields from `(name, value)` pairs.
pub fn fields(pairs: &[(&str, FieldValue)]) -> Fields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

pub fn num(n: f64) -> FieldValue {
    FieldValue::Number(n)
}

pub fn text(s: &str) -> FieldValue {
    FieldValue::Text(s.to_string())
}

/// A record stamped at noon UTC on `date`.
pub fn make_record(pairs: &[(&str, FieldValue)], date: DateKey) -> Record {
    let mut r = Record::new(fields(pairs));
    let noon = date.date().and_hms_opt(12, 0, 0).unwrap();
    r.timestamp = Utc.from_utc_datetime(&noon);
    r
}

/// A valid exercise submission.
pub fn workout(minutes: f64) -> Fields {
    fields(&[("type", text("running")), ("duration", num(minutes))])
}
