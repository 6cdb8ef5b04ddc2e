use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::habit::HabitConfig;
use crate::models::record::Record;

/// A day's progress against the habit's daily targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyProgress {
    /// Mean of the per-metric percentages, rounded to the nearest integer.
    pub overall: u32,
    /// Unrounded per-metric percentage, each capped at 100.
    pub details: BTreeMap<String, f64>,
}

/// Compute a day's progress. Missing record or configuration yields zero progress.
///
/// Only metrics tracked by the habit and carrying a positive daily target count;
/// metrics recorded as text or left out count as zero.
pub fn daily_progress(record: Option<&Record>, config: Option<&HabitConfig>) -> DailyProgress {
    let (Some(record), Some(config)) = (record, config) else {
        return DailyProgress::default();
    };

    let mut details = BTreeMap::new();
    for metric in config.tracked_metrics() {
        let Some(&target) = config.targets.daily.get(&metric) else {
            continue;
        };
        if let Some(pct) = percent_of(record.number_or_zero(&metric), target) {
            details.insert(metric, pct);
        }
    }

    let overall = if details.is_empty() {
        0
    } else {
        let mean = details.values().sum::<f64>() / details.len() as f64;
        mean.round().max(0.0) as u32
    };

    DailyProgress { overall, details }
}

/// Percent of `target` reached by `actual`, capped at 100. `None` for unusable targets.
pub fn percent_of(actual: f64, target: f64) -> Option<f64> {
    if target > 0.0 {
        Some((actual / target * 100.0).min(100.0))
    } else {
        None
    }
}
