use anyhow::Result;
use chrono::NaiveTime;
use std::collections::BTreeMap;

use crate::core::store::RecordStore;
use crate::core::tracker::{SubmitError, Tracker};
use crate::core::validate::ValidationErrors;
use crate::models::habit::HabitType;
use crate::models::record::{FieldValue, Fields, Record};

/// Rough calorie burn per minute used for quick workouts.
const KCAL_PER_MINUTE: f64 = 8.0;
const MAX_ESTIMATED_KCAL: f64 = 2000.0;

/// Fields for a workout logged with only an activity and its length.
pub fn workout_fields(activity: &str, minutes: f64) -> Fields {
    let mut fields = Fields::new();
    fields.insert("type".into(), FieldValue::Text(activity.to_string()));
    fields.insert("duration".into(), FieldValue::Number(minutes));
    fields.insert(
        "calories".into(),
        FieldValue::Number((minutes * KCAL_PER_MINUTE).min(MAX_ESTIMATED_KCAL)),
    );
    fields.insert("exercises".into(), FieldValue::Number(1.0));
    fields.insert("intensity".into(), FieldValue::Number(2.0));
    fields
}

/// Hours slept between two `HH:MM` times. Wraps past midnight when wake-up is not after bedtime.
pub fn sleep_hours(bedtime: &str, wakeup: &str) -> Result<f64> {
    let bed = parse_time(bedtime).map_err(anyhow::Error::msg)?;
    let wake = parse_time(wakeup).map_err(anyhow::Error::msg)?;
    Ok(hours_between(bed, wake))
}

fn hours_between(bed: NaiveTime, wake: NaiveTime) -> f64 {
    let mut minutes = (wake - bed).num_minutes();
    if minutes <= 0 {
        minutes += 24 * 60;
    }
    minutes as f64 / 60.0
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| format!("invalid time: {} (expected HH:MM)", s))
}

/// Fields for last night's sleep computed from bed and wake-up times.
pub fn sleep_fields(bedtime: &str, wakeup: &str, quality: f64) -> Result<Fields, ValidationErrors> {
    let bed = parse_time(bedtime);
    let wake = parse_time(wakeup);
    let (bed, wake) = match (bed, wake) {
        (Ok(bed), Ok(wake)) => (bed, wake),
        (bed, wake) => {
            let mut errors = BTreeMap::new();
            if let Err(msg) = bed {
                errors.insert("bedtime".to_string(), msg);
            }
            if let Err(msg) = wake {
                errors.insert("wakeupTime".to_string(), msg);
            }
            return Err(ValidationErrors {
                habit: HabitType::Sleep,
                errors,
            });
        }
    };

    let mut fields = Fields::new();
    fields.insert("bedtime".into(), FieldValue::Text(bedtime.trim().to_string()));
    fields.insert("wakeupTime".into(), FieldValue::Text(wakeup.trim().to_string()));
    fields.insert("duration".into(), FieldValue::Number(hours_between(bed, wake)));
    fields.insert("quality".into(), FieldValue::Number(quality));
    Ok(fields)
}

pub fn quick_workout<S: RecordStore>(
    tracker: &mut Tracker<S>,
    activity: &str,
    minutes: f64,
) -> Result<Fields, SubmitError> {
    tracker.submit_record(&HabitType::Exercise, None, workout_fields(activity, minutes))
}

pub fn record_last_night<S: RecordStore>(
    tracker: &mut Tracker<S>,
    bedtime: &str,
    wakeup: &str,
    quality: f64,
) -> Result<Fields, SubmitError> {
    let fields = sleep_fields(bedtime, wakeup, quality)?;
    tracker.submit_record(&HabitType::Sleep, None, fields)
}

/// Add one glass of water to today's nutrition record.
pub fn add_water_glass<S: RecordStore>(tracker: &mut Tracker<S>) -> Result<Record, SubmitError> {
    let current = today_nutrition(tracker)?;
    let mut patch = Fields::new();
    patch.insert(
        "water".into(),
        FieldValue::Number(current.as_ref().map_or(0.0, |r| r.number_or_zero("water")) + 1.0),
    );
    tracker.update_record(&HabitType::Nutrition, None, patch)
}

/// Count one more meal and add its calories and protein to today's totals.
pub fn add_meal<S: RecordStore>(
    tracker: &mut Tracker<S>,
    calories: f64,
    protein: Option<f64>,
) -> Result<Record, SubmitError> {
    let current = today_nutrition(tracker)?;
    let total = |metric: &str| current.as_ref().map_or(0.0, |r| r.number_or_zero(metric));

    let mut patch = Fields::new();
    patch.insert("meals".into(), FieldValue::Number(total("meals") + 1.0));
    patch.insert("calories".into(), FieldValue::Number(total("calories") + calories));
    patch.insert(
        "protein".into(),
        FieldValue::Number(total("protein") + protein.unwrap_or(0.0)),
    );
    tracker.update_record(&HabitType::Nutrition, None, patch)
}

fn today_nutrition<S: RecordStore>(tracker: &Tracker<S>) -> Result<Option<Record>> {
    tracker.record(&HabitType::Nutrition, None)
}
