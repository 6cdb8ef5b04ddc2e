use anyhow::Result;
use serde_json::json;

use habitlog::models::DateKey;
use habitlog::output::human;

use super::{Session, print_json};

const DEFAULT_LAST_DAYS: u32 = 7;

pub fn run(
    habit: &str,
    last: Option<u32>,
    from: Option<DateKey>,
    to: Option<DateKey>,
    date: Option<DateKey>,
    human_flag: bool,
) -> Result<()> {
    let session = Session::open(date)?;
    let habit = session.habit(habit);
    let today = session.tracker.today();

    let (from, to, entries) = match (from, to) {
        (Some(from), Some(to)) => {
            let entries = session.tracker.records_in_range(&habit, from, to)?;
            (from, to, entries)
        }
        _ => {
            let days = last.unwrap_or(DEFAULT_LAST_DAYS).max(1);
            let entries = session.tracker.recent_records(&habit, days)?;
            (today.offset(-(i64::from(days) - 1)), today, entries)
        }
    };

    if human_flag {
        if entries.is_empty() {
            println!("No {} records between {} and {}", habit, from, to);
        } else {
            for e in &entries {
                println!("{}", human::format_record(e.date, &habit, &e.record));
            }
        }
    } else {
        print_json(
            "show",
            json!({ "habit": habit, "from": from, "to": to, "entries": entries }),
        )?;
    }
    Ok(())
}

pub fn run_today(date: Option<DateKey>, human_flag: bool) -> Result<()> {
    let session = Session::open(date)?;
    let today = session.tracker.today();
    let records = session.tracker.today_records()?;

    if human_flag {
        println!("--- {} ---", today);
        if records.is_empty() {
            println!("Nothing logged yet");
        }
        for (habit, record) in &records {
            println!("{}", human::format_record(today, habit, record));
        }
    } else {
        print_json("today", json!({ "date": today, "records": records }))?;
    }
    Ok(())
}
