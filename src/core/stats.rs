use serde::Serialize;

use crate::models::record::DatedRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionStats {
    pub total_days: u32,
    pub completed_days: u32,
    /// Percent of days with a record, rounded.
    pub completion_rate: u32,
    pub records: Vec<DatedRecord>,
}

/// Completion over a window of `days` days, given the records found in it.
pub fn completion_stats(records: Vec<DatedRecord>, days: u32) -> CompletionStats {
    let completed_days = records.len() as u32;
    let completion_rate = if days == 0 {
        0
    } else {
        (f64::from(completed_days) / f64::from(days) * 100.0).round() as u32
    };
    CompletionStats {
        total_days: days,
        completed_days,
        completion_rate,
        records,
    }
}
