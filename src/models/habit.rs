use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::record::{FieldValue, Record};

/// Which habit a record or configuration belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HabitType {
    Exercise,
    Sleep,
    Nutrition,
    Custom(String),
}

impl HabitType {
    pub fn id(&self) -> &str {
        match self {
            Self::Exercise => "exercise",
            Self::Sleep => "sleep",
            Self::Nutrition => "nutrition",
            Self::Custom(id) => id,
        }
    }

    pub fn builtins() -> [HabitType; 3] {
        [Self::Exercise, Self::Sleep, Self::Nutrition]
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Static metric table for the built-in habits; `None` for custom ones.
    pub fn table(&self) -> Option<&'static MetricTable> {
        match self {
            Self::Exercise => Some(&EXERCISE),
            Self::Sleep => Some(&SLEEP),
            Self::Nutrition => Some(&NUTRITION),
            Self::Custom(_) => None,
        }
    }

    /// Field rules applied before a record reaches the store.
    pub fn rules(&self) -> &'static [FieldRule] {
        self.table().map(|t| t.rules).unwrap_or(&[])
    }
}

impl From<&str> for HabitType {
    fn from(s: &str) -> Self {
        match s {
            "exercise" => Self::Exercise,
            "sleep" => Self::Sleep,
            "nutrition" => Self::Nutrition,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for HabitType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "exercise" | "sleep" | "nutrition" => Self::from(s.as_str()),
            _ => Self::Custom(s),
        }
    }
}

impl From<HabitType> for String {
    fn from(h: HabitType) -> Self {
        match h {
            HabitType::Custom(id) => id,
            other => other.id().to_string(),
        }
    }
}

impl std::fmt::Display for HabitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Expected shape of a submitted field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Inclusive numeric range with a display unit.
    Number {
        min: f64,
        max: f64,
        unit: &'static str,
    },
    /// Free text that must not be blank.
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn number(
    name: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
    unit: &'static str,
    required: bool,
) -> FieldRule {
    FieldRule {
        name,
        label,
        kind: FieldKind::Number { min, max, unit },
        required,
    }
}

const fn text(name: &'static str, label: &'static str) -> FieldRule {
    FieldRule {
        name,
        label,
        kind: FieldKind::Text,
        required: true,
    }
}

/// Per-habit metric table: what is tracked, how a day is scored, what is validated.
#[derive(Debug)]
pub struct MetricTable {
    /// Metrics that count towards daily progress when they have a target.
    pub tracked: &'static [&'static str],
    /// Metric plotted in charts and compared for the weekly trend.
    pub trend: &'static str,
    /// Weighted terms summed into a day's score for best/worst selection.
    pub score: &'static [(&'static str, f64)],
    pub rules: &'static [FieldRule],
}

static EXERCISE: MetricTable = MetricTable {
    tracked: &["duration", "calories", "exercises"],
    trend: "duration",
    score: &[("duration", 1.0), ("calories", 0.1)],
    rules: &[
        text("type", "exercise type"),
        number("duration", "duration", 1.0, 480.0, "minutes", true),
        number("calories", "calories", 1.0, 2000.0, "", false),
        number("intensity", "intensity", 1.0, 3.0, "", false),
    ],
};

static SLEEP: MetricTable = MetricTable {
    tracked: &["duration", "quality"],
    trend: "duration",
    score: &[("duration", 1.0), ("quality", 1.0)],
    rules: &[
        text("bedtime", "bedtime"),
        text("wakeupTime", "wake-up time"),
        number("duration", "duration", 1.0, 24.0, "hours", true),
        number("quality", "quality", 1.0, 10.0, "", true),
    ],
};

static NUTRITION: MetricTable = MetricTable {
    tracked: &["calories", "water", "meals"],
    trend: "water",
    score: &[("water", 1.0), ("meals", 1.0)],
    rules: &[
        number("calories", "calories", 1.0, 5000.0, "", false),
        number("water", "water", 0.0, 20.0, "glasses", false),
        number("meals", "meals", 0.0, 10.0, "", false),
        number("protein", "protein", 0.0, 300.0, "grams", false),
    ],
};

/// How daily values roll up into a weekly figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    #[default]
    Sum,
    Average,
}

impl AggregationMode {
    /// Weekly target implied by a daily one.
    pub fn weekly_from_daily(&self, daily: f64) -> f64 {
        match self {
            Self::Sum => daily * 7.0,
            Self::Average => daily,
        }
    }
}

impl std::fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sum => write!(f, "sum"),
            Self::Average => write!(f, "average"),
        }
    }
}

impl std::str::FromStr for AggregationMode {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "sum" => Ok(Self::Sum),
            "average" | "avg" => Ok(Self::Average),
            _ => anyhow::bail!("invalid aggregation: {} (expected sum/average)", s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    #[serde(default)]
    pub daily: BTreeMap<String, f64>,
    #[serde(default)]
    pub weekly: BTreeMap<String, f64>,
}

/// Configuration of one habit in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitConfig {
    pub id: HabitType,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub goals: BTreeMap<String, FieldValue>,
    #[serde(default)]
    pub targets: Targets,
    /// Metrics missing here aggregate by sum.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aggregation: BTreeMap<String, AggregationMode>,
    /// Trend metric for custom habits; built-ins use their fixed table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_metric: Option<String>,
}

fn default_active() -> bool {
    true
}

impl HabitConfig {
    pub fn new(id: HabitType, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            icon: String::new(),
            color: String::new(),
            is_active: true,
            goals: BTreeMap::new(),
            targets: Targets::default(),
            aggregation: BTreeMap::new(),
            trend_metric: None,
        }
    }

    pub fn aggregation_for(&self, metric: &str) -> AggregationMode {
        self.aggregation.get(metric).copied().unwrap_or_default()
    }

    /// Metrics that contribute to daily progress, in evaluation order.
    pub fn tracked_metrics(&self) -> Vec<String> {
        match self.id.table() {
            Some(t) => t.tracked.iter().map(|m| m.to_string()).collect(),
            None => self.targets.daily.keys().cloned().collect(),
        }
    }

    /// Metric used for charts and the weekly trend, if any.
    pub fn trend_metric(&self) -> Option<String> {
        match self.id.table() {
            Some(t) => Some(t.trend.to_string()),
            None => self
                .trend_metric
                .clone()
                .or_else(|| self.targets.daily.keys().next().cloned()),
        }
    }

    /// Composite score used to rank days within a week.
    pub fn day_score(&self, record: &Record) -> f64 {
        match self.id.table() {
            Some(t) => t
                .score
                .iter()
                .map(|(metric, weight)| record.number_or_zero(metric) * weight)
                .sum(),
            None => self
                .targets
                .daily
                .keys()
                .map(|metric| record.number_or_zero(metric))
                .sum(),
        }
    }

    /// Built-in configuration for exercise, sleep and nutrition.
    pub fn builtin(habit: &HabitType) -> Option<Self> {
        let config = match habit {
            HabitType::Exercise => {
                let mut c = Self::new(HabitType::Exercise, "Exercise");
                c.icon = "fitness".into();
                c.color = "#FF5722".into();
                c.goals = goals(&[
                    ("duration", FieldValue::Number(60.0)),
                    ("frequency", FieldValue::Number(5.0)),
                    ("calories", FieldValue::Number(400.0)),
                    ("exercises", FieldValue::Number(3.0)),
                ]);
                c.targets = Targets {
                    daily: metrics(&[("duration", 60.0), ("calories", 400.0), ("exercises", 3.0)]),
                    // five training days a week, not seven
                    weekly: metrics(&[
                        ("duration", 300.0),
                        ("calories", 2000.0),
                        ("exercises", 15.0),
                    ]),
                };
                c
            }
            HabitType::Sleep => {
                let mut c = Self::new(HabitType::Sleep, "Sleep");
                c.icon = "moon".into();
                c.color = "#3F51B5".into();
                c.goals = goals(&[
                    ("duration", FieldValue::Number(8.0)),
                    ("quality", FieldValue::Number(8.0)),
                    ("bedtime", "23:00".into()),
                    ("wakeupTime", "07:00".into()),
                ]);
                c.targets = Targets {
                    daily: metrics(&[("duration", 8.0), ("quality", 8.0)]),
                    weekly: metrics(&[("duration", 8.0), ("quality", 8.0)]),
                };
                c.aggregation = [
                    ("duration".to_string(), AggregationMode::Average),
                    ("quality".to_string(), AggregationMode::Average),
                ]
                .into_iter()
                .collect();
                c
            }
            HabitType::Nutrition => {
                let mut c = Self::new(HabitType::Nutrition, "Nutrition");
                c.icon = "restaurant".into();
                c.color = "#4CAF50".into();
                c.goals = goals(&[
                    ("calories", FieldValue::Number(2000.0)),
                    ("water", FieldValue::Number(8.0)),
                    ("meals", FieldValue::Number(5.0)),
                    ("protein", FieldValue::Number(150.0)),
                ]);
                c.targets = Targets {
                    daily: metrics(&[
                        ("calories", 2000.0),
                        ("water", 8.0),
                        ("meals", 5.0),
                        ("protein", 150.0),
                    ]),
                    weekly: metrics(&[
                        ("calories", 14000.0),
                        ("water", 56.0),
                        ("meals", 35.0),
                        ("protein", 1050.0),
                    ]),
                };
                c
            }
            HabitType::Custom(_) => return None,
        };
        Some(config)
    }
}

fn goals(pairs: &[(&str, FieldValue)]) -> BTreeMap<String, FieldValue> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn metrics(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}
