use anyhow::Result;
use serde_json::json;

use habitlog::models::DateKey;
use habitlog::models::record::FieldValue;
use habitlog::output::human;

use super::{Session, collect_fields, print_json};

pub fn run(
    habit: &str,
    pairs: Vec<(String, FieldValue)>,
    notes: Option<String>,
    date: Option<DateKey>,
    human_flag: bool,
) -> Result<()> {
    let mut session = Session::open(date)?;
    let habit = session.configured_habit(habit)?;
    let fields = collect_fields(pairs, notes);
    let day = session.tracker.today();
    let stored = session.tracker.submit_record(&habit, None, fields)?;

    if human_flag {
        println!("Logged: {} | {} | {}", day, habit, human::format_fields(&stored));
    } else {
        print_json(
            "log",
            json!({ "date": day, "habit": habit, "record": stored }),
        )?;
    }
    Ok(())
}

pub fn run_update(
    habit: &str,
    pairs: Vec<(String, FieldValue)>,
    notes: Option<String>,
    date: Option<DateKey>,
    human_flag: bool,
) -> Result<()> {
    let mut session = Session::open(date)?;
    let habit = session.configured_habit(habit)?;
    let patch = collect_fields(pairs, notes);
    let day = session.tracker.today();
    let record = session.tracker.update_record(&habit, None, patch)?;

    if human_flag {
        println!("Updated: {}", human::format_record(day, &habit, &record));
    } else {
        print_json(
            "update",
            json!({ "date": day, "habit": habit, "record": record }),
        )?;
    }
    Ok(())
}

pub fn run_delete(habit: &str, date: Option<DateKey>, human_flag: bool) -> Result<()> {
    let mut session = Session::open(date)?;
    let habit = session.habit(habit);
    let day = session.tracker.today();
    let deleted = session.tracker.delete_record(&habit, None)?;

    if human_flag {
        if deleted {
            println!("Deleted {} record for {}", habit, day);
        } else {
            println!("No {} record for {}", habit, day);
        }
    } else {
        print_json(
            "delete",
            json!({ "date": day, "habit": habit, "deleted": deleted }),
        )?;
    }
    Ok(())
}
