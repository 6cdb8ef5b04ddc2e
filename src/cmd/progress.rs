use anyhow::Result;
use serde_json::json;

use habitlog::models::DateKey;
use habitlog::output::human;

use super::{Session, print_json};

pub fn run(habit: &str, date: Option<DateKey>, human_flag: bool) -> Result<()> {
    let session = Session::open(date)?;
    let habit = session.habit(habit);
    let today = session.tracker.today();
    let progress = session.tracker.daily_progress(&habit, None)?;

    if human_flag {
        println!("{}", human::format_progress(&habit, today, &progress));
    } else {
        print_json(
            "progress",
            json!({ "date": today, "habit": habit, "progress": progress }),
        )?;
    }
    Ok(())
}

pub fn run_weekly(habit: &str, date: Option<DateKey>, human_flag: bool) -> Result<()> {
    let session = Session::open(date)?;
    let habit = session.habit(habit);
    let view = session.tracker.weekly_view(&habit)?;

    if human_flag {
        match view {
            Some(ref v) => println!("{}", human::format_weekly(v)),
            None => println!("No configuration for habit '{}'", habit),
        }
    } else {
        print_json("weekly", json!({ "habit": habit, "view": view }))?;
    }
    Ok(())
}

pub fn run_stats(
    habit: &str,
    days: Option<u32>,
    date: Option<DateKey>,
    human_flag: bool,
) -> Result<()> {
    let session = Session::open(date)?;
    let habit = session.habit(habit);
    let days = days.unwrap_or(session.config.tracking.stats_days);
    let stats = session.tracker.completion_stats(&habit, days)?;

    if human_flag {
        println!("{}", human::format_stats(&habit, &stats));
    } else {
        print_json("stats", json!({ "habit": habit, "days": days, "stats": stats }))?;
    }
    Ok(())
}
