use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::progress::percent_of;
use crate::models::config::Locale;
use crate::models::habit::{AggregationMode, HabitConfig, HabitType};
use crate::models::record::{DateKey, Record};

/// Length of the trailing window, today inclusive.
pub const WINDOW_DAYS: usize = 7;

/// Days at each end of the window compared for the trend.
const TREND_SPAN: usize = 3;

const TREND_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    /// Classify the difference between the recent and earlier means.
    pub fn from_diff(diff: f64) -> Self {
        if diff > TREND_THRESHOLD {
            Self::Improving
        } else if diff < -TREND_THRESHOLD {
            Self::Declining
        } else {
            Self::Stable
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Improving => write!(f, "improving"),
            Self::Declining => write!(f, "declining"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekDay {
    pub date: DateKey,
    pub day_name: String,
    pub record: Option<Record>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    pub date: DateKey,
}

/// Actual weekly figure for one metric against its weekly target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyMetric {
    pub metric: String,
    pub aggregation: AggregationMode,
    pub actual: f64,
    pub target: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyView {
    pub habit: HabitType,
    /// Always seven entries, oldest first.
    pub days: Vec<WeekDay>,
    pub progress_percentage: u32,
    pub best_day: Option<WeekDay>,
    pub worst_day: Option<WeekDay>,
    pub trend: Trend,
    pub chart_data: Vec<ChartPoint>,
    pub summary: Vec<WeeklyMetric>,
}

/// Summarize the seven days ending at `today`.
///
/// `records` may hold any dates; only those inside the window are used.
/// Returns `None` when the habit has no configuration.
pub fn weekly_view(
    records: &BTreeMap<DateKey, Record>,
    config: Option<&HabitConfig>,
    today: DateKey,
    locale: Locale,
) -> Option<WeeklyView> {
    let config = config?;

    let days: Vec<WeekDay> = (0..WINDOW_DAYS as i64)
        .rev()
        .map(|back| {
            let date = today.offset(-back);
            WeekDay {
                date,
                day_name: locale.weekday_short(date.weekday()).to_string(),
                record: records.get(&date).cloned(),
            }
        })
        .collect();

    let recorded = days.iter().filter(|d| d.record.is_some()).count();
    let progress_percentage = (recorded as f64 / WINDOW_DAYS as f64 * 100.0).round() as u32;

    let best_day = select_day(&days, config, |candidate, current| candidate > current);
    let worst_day = select_day(&days, config, |candidate, current| candidate < current);

    let trend_metric = config.trend_metric();
    let trend = match trend_metric.as_deref() {
        Some(metric) => {
            let earlier = window_mean(&days[..TREND_SPAN], metric);
            let recent = window_mean(&days[WINDOW_DAYS - TREND_SPAN..], metric);
            Trend::from_diff(recent - earlier)
        }
        None => Trend::Stable,
    };

    let chart_data = days
        .iter()
        .map(|d| ChartPoint {
            label: d.day_name.clone(),
            value: match (&d.record, trend_metric.as_deref()) {
                (Some(r), Some(metric)) => r.number_or_zero(metric),
                _ => 0.0,
            },
            date: d.date,
        })
        .collect();

    let summary = weekly_summary(&days, config);

    Some(WeeklyView {
        habit: config.id.clone(),
        days,
        progress_percentage,
        best_day,
        worst_day,
        trend,
        chart_data,
        summary,
    })
}

/// Scan chronologically; a candidate replaces the current pick only when strictly preferred,
/// so the earliest day wins ties.
fn select_day(
    days: &[WeekDay],
    config: &HabitConfig,
    prefer: impl Fn(f64, f64) -> bool,
) -> Option<WeekDay> {
    let mut picked: Option<(&WeekDay, f64)> = None;
    for day in days {
        let Some(record) = &day.record else {
            continue;
        };
        let score = config.day_score(record);
        match picked {
            Some((_, current)) if !prefer(score, current) => {}
            _ => picked = Some((day, score)),
        }
    }
    picked.map(|(day, _)| day.clone())
}

/// Mean of `metric` over days that have a record. Zero when none do.
fn window_mean(days: &[WeekDay], metric: &str) -> f64 {
    let values: Vec<f64> = days
        .iter()
        .filter_map(|d| d.record.as_ref())
        .map(|r| r.number_or_zero(metric))
        .collect();
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn weekly_summary(days: &[WeekDay], config: &HabitConfig) -> Vec<WeeklyMetric> {
    config
        .targets
        .weekly
        .iter()
        .map(|(metric, &target)| {
            let aggregation = config.aggregation_for(metric);
            let actual = match aggregation {
                AggregationMode::Sum => days
                    .iter()
                    .filter_map(|d| d.record.as_ref())
                    .map(|r| r.number_or_zero(metric))
                    .sum(),
                AggregationMode::Average => window_mean(days, metric),
            };
            WeeklyMetric {
                metric: metric.clone(),
                aggregation,
                actual,
                target,
                percent: percent_of(actual, target).unwrap_or(0.0),
            }
        })
        .collect()
}
