use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Calendar day used as the key for every record lookup (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today in the local calendar.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Shift by a signed number of days, saturating at the ends of the calendar.
    pub fn offset(&self, days: i64) -> Self {
        match Duration::try_days(days).and_then(|d| self.0.checked_add_signed(d)) {
            Some(date) => Self(date),
            None if days < 0 => Self(NaiveDate::MIN),
            None => Self(NaiveDate::MAX),
        }
    }

    /// Every key from `self` to `end`, inclusive. Empty when `end` precedes `self`.
    pub fn through(self, end: DateKey) -> impl Iterator<Item = DateKey> {
        self.0
            .iter_days()
            .take_while(move |d| *d <= end.0)
            .map(DateKey)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::fmt::Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("invalid date key: {} (expected YYYY-MM-DD)", s))?;
        Ok(Self(date))
    }
}

/// A submitted or stored metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value. Text that parses as a finite number counts.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) => None,
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    /// Blank text is how an untouched form field arrives.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Metric name → value, as submitted or stored.
pub type Fields = BTreeMap<String, FieldValue>;

/// Parse a `key=value` pair. Values that parse as numbers become `Number`.
pub fn parse_field(pair: &str) -> anyhow::Result<(String, FieldValue)> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("invalid field: {} (expected key=value)", pair))?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("invalid field: {} (empty key)", pair);
    }
    let value = value.trim();
    let parsed = match value.parse::<f64>() {
        Ok(n) if n.is_finite() => FieldValue::Number(n),
        _ => FieldValue::Text(value.to_string()),
    };
    Ok((key.to_string(), parsed))
}

/// One day's captured metrics for one habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(flatten)]
    pub fields: Fields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Record {
    /// Build a record stamped now. A `notes` text field is lifted out of the metrics.
    pub fn new(mut fields: Fields) -> Self {
        let notes = take_notes(&mut fields);
        Self {
            fields,
            notes,
            timestamp: Utc::now(),
        }
    }

    pub fn get(&self, metric: &str) -> Option<&FieldValue> {
        self.fields.get(metric)
    }

    pub fn number(&self, metric: &str) -> Option<f64> {
        self.fields.get(metric).and_then(FieldValue::as_number)
    }

    /// Missing or non-numeric metrics count as zero.
    pub fn number_or_zero(&self, metric: &str) -> f64 {
        self.number(metric).unwrap_or(0.0)
    }

    /// Shallow-merge `patch` over the existing metrics and refresh the timestamp.
    pub fn merge(&mut self, mut patch: Fields) {
        if let Some(notes) = take_notes(&mut patch) {
            self.notes = Some(notes);
        }
        self.fields.extend(patch);
        self.timestamp = Utc::now();
    }

    /// Metrics plus notes, the shape a caller would resubmit.
    pub fn to_fields(&self) -> Fields {
        let mut fields = self.fields.clone();
        if let Some(ref n) = self.notes {
            fields.insert("notes".into(), FieldValue::Text(n.clone()));
        }
        fields
    }
}

fn take_notes(fields: &mut Fields) -> Option<String> {
    match fields.remove("notes") {
        Some(FieldValue::Text(s)) if !s.trim().is_empty() => Some(s),
        Some(FieldValue::Text(_)) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

/// A record together with the day it belongs to, as returned by range scans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedRecord {
    pub date: DateKey,
    #[serde(flatten)]
    pub record: Record,
}
