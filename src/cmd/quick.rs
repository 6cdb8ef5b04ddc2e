use anyhow::Result;
use serde_json::json;

use habitlog::core::quick;
use habitlog::models::{DateKey, HabitType};
use habitlog::output::human;

use super::{Session, print_json};
use crate::cli::QuickAction;

pub fn run(action: QuickAction, date: Option<DateKey>, human_flag: bool) -> Result<()> {
    let mut session = Session::open(date)?;
    let tracker = &mut session.tracker;
    let today = tracker.today();

    let (habit, fields) = match action {
        QuickAction::Workout { activity, minutes } => (
            HabitType::Exercise,
            quick::quick_workout(tracker, &activity, minutes)?,
        ),
        QuickAction::Sleep {
            bedtime,
            wakeup,
            quality,
        } => (
            HabitType::Sleep,
            quick::record_last_night(tracker, &bedtime, &wakeup, quality)?,
        ),
        QuickAction::Water => (
            HabitType::Nutrition,
            quick::add_water_glass(tracker)?.to_fields(),
        ),
        QuickAction::Meal { calories, protein } => (
            HabitType::Nutrition,
            quick::add_meal(tracker, calories, protein)?.to_fields(),
        ),
    };

    if human_flag {
        println!("Logged: {} | {} | {}", today, habit, human::format_fields(&fields));
    } else {
        print_json(
            "quick",
            json!({ "date": today, "habit": habit, "record": fields }),
        )?;
    }
    Ok(())
}
