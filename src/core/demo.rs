use anyhow::Result;
use chrono::{TimeZone, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::store::RecordStore;
use crate::models::habit::HabitType;
use crate::models::record::{DateKey, FieldValue, Fields, Record};

/// Longest demo history `seed` will write (about ten years).
pub const MAX_DEMO_DAYS: u32 = 3650;

const ACTIVITIES: [&str; 4] = ["running", "cycling", "swimming", "gym"];

/// Mock records for every built-in habit over the `days` days ending at `today`.
pub fn generate<R: Rng>(today: DateKey, days: u32, rng: &mut R) -> Vec<(DateKey, HabitType, Record)> {
    let mut out = Vec::with_capacity(days.min(MAX_DEMO_DAYS) as usize * 3);
    for back in 0..days {
        let date = today.offset(-i64::from(back));
        let noon = date
            .date()
            .and_hms_opt(12, 0, 0)
            .map(|dt| Utc.from_utc_datetime(&dt))
            .unwrap_or_else(Utc::now);

        let days_back = back as usize;
        let entries = [
            (HabitType::Exercise, exercise(rng, days_back % 3 == 0)),
            (HabitType::Sleep, sleep(rng, days_back % 4 == 0)),
            (HabitType::Nutrition, nutrition(rng, days_back % 5 == 0)),
        ];
        for (habit, fields) in entries {
            let mut record = Record::new(fields);
            record.timestamp = noon;
            out.push((date, habit, record));
        }
    }
    out
}

/// Write generated records into `store`, replacing whatever those days held.
pub fn seed<S: RecordStore, R: Rng>(
    store: &mut S,
    today: DateKey,
    days: u32,
    rng: &mut R,
) -> Result<usize> {
    if days > MAX_DEMO_DAYS {
        anyhow::bail!("demo history is limited to {} days, got {}", MAX_DEMO_DAYS, days);
    }
    let records = generate(today, days, rng);
    let count = records.len();
    for (date, habit, record) in records {
        store.put_record(date, &habit, record)?;
    }
    tracing::info!(days, records = count, "demo data seeded");
    Ok(count)
}

fn num(n: impl Into<f64>) -> FieldValue {
    FieldValue::Number(n.into())
}

fn exercise<R: Rng>(rng: &mut R, with_note: bool) -> Fields {
    let mut f = Fields::new();
    f.insert("duration".into(), num(rng.gen_range(15..105u32)));
    f.insert("calories".into(), num(rng.gen_range(100..500u32)));
    f.insert("exercises".into(), num(rng.gen_range(1..5u32)));
    let activity = ACTIVITIES.choose(rng).copied().unwrap_or("gym");
    f.insert("type".into(), FieldValue::Text(activity.to_string()));
    f.insert("intensity".into(), num(rng.gen_range(1..4u32)));
    if with_note {
        f.insert("notes".into(), FieldValue::Text("Great training session".into()));
    }
    f
}

fn sleep<R: Rng>(rng: &mut R, with_note: bool) -> Fields {
    let hours: f64 = rng.gen_range(6.0..9.0);
    let mut f = Fields::new();
    f.insert("duration".into(), num((hours * 10.0).round() / 10.0));
    f.insert("quality".into(), num(rng.gen_range(6..10u32)));
    f.insert(
        "bedtime".into(),
        FieldValue::Text(format!("23:{:02}", rng.gen_range(0..60u32))),
    );
    f.insert(
        "wakeupTime".into(),
        FieldValue::Text(format!(
            "{:02}:{:02}",
            rng.gen_range(6..9u32),
            rng.gen_range(0..60u32)
        )),
    );
    if with_note {
        f.insert("notes".into(), FieldValue::Text("Woke up feeling rested".into()));
    }
    f
}

fn nutrition<R: Rng>(rng: &mut R, with_note: bool) -> Fields {
    let mut f = Fields::new();
    f.insert("calories".into(), num(rng.gen_range(1500..2300u32)));
    f.insert("water".into(), num(rng.gen_range(6..10u32)));
    f.insert("meals".into(), num(rng.gen_range(3..6u32)));
    f.insert("protein".into(), num(rng.gen_range(100..180u32)));
    if with_note {
        f.insert("notes".into(), FieldValue::Text("Ate more vegetables today".into()));
    }
    f
}
