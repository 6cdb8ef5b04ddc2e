use colored::Colorize;
use comfy_table::{Table, presets::UTF8_FULL};

use crate::core::progress::DailyProgress;
use crate::core::stats::CompletionStats;
use crate::core::weekly::{Trend, WeeklyView};
use crate::models::habit::{HabitConfig, HabitType};
use crate::models::record::{DateKey, Fields, Record};

const BAR_WIDTH: usize = 20;

/// `key=value` pairs in name order.
pub fn format_fields(fields: &Fields) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One record on one line.
pub fn format_record(date: DateKey, habit: &HabitType, r: &Record) -> String {
    let mut line = format!("{} | {} | {}", date, habit, format_fields(&r.fields));
    if let Some(ref notes) = r.notes {
        line.push_str(&format!("  # {}", notes));
    }
    line
}

/// Fixed-width bar for a 0–100 percentage.
pub fn progress_bar(pct: f64) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn format_progress(habit: &HabitType, date: DateKey, p: &DailyProgress) -> String {
    let mut out = format!("{} progress for {}: {}%\n", habit, date, p.overall);
    if p.details.is_empty() {
        out.push_str("  no data");
        return out;
    }
    let lines: Vec<String> = p
        .details
        .iter()
        .map(|(metric, pct)| format!("  {:10} {} {:5.1}%", metric, progress_bar(*pct), pct))
        .collect();
    out.push_str(&lines.join("\n"));
    out
}

fn trend_label(t: Trend) -> String {
    match t {
        Trend::Improving => t.to_string().green().to_string(),
        Trend::Declining => t.to_string().red().to_string(),
        Trend::Stable => t.to_string().yellow().to_string(),
    }
}

pub fn format_weekly(v: &WeeklyView) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Day", "Date", "Value", "Logged"]);
    for (day, point) in v.days.iter().zip(&v.chart_data) {
        table.add_row(vec![
            day.day_name.clone(),
            day.date.to_string(),
            format!("{:.1}", point.value),
            if day.record.is_some() { "yes" } else { "-" }.to_string(),
        ]);
    }

    let mut out = format!("=== {}: last 7 days ===\n{}\n", v.habit, table);
    out.push_str(&format!(
        "Completion: {}%  Trend: {}",
        v.progress_percentage,
        trend_label(v.trend)
    ));
    if let Some(ref best) = v.best_day {
        out.push_str(&format!("\nBest day: {} ({})", best.day_name, best.date));
    }
    if let Some(ref worst) = v.worst_day {
        out.push_str(&format!("\nWorst day: {} ({})", worst.day_name, worst.date));
    }
    for m in &v.summary {
        out.push_str(&format!(
            "\n  {:10} {:8.1} / {:<8} ({}) {:5.1}%",
            m.metric, m.actual, m.target, m.aggregation, m.percent
        ));
    }
    out
}

pub fn format_habit(c: &HabitConfig) -> String {
    let state = if c.is_active { "active" } else { "inactive" };
    let daily: Vec<String> = c
        .targets
        .daily
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    format!("{} ({}) [{}] daily: {}", c.id, c.name, state, daily.join(", "))
}

pub fn format_stats(habit: &HabitType, s: &CompletionStats) -> String {
    format!(
        "{}: {}/{} days logged ({}%)",
        habit, s.completed_days, s.total_days, s.completion_rate
    )
}
