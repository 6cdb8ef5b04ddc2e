mod common;

use common::{fields, num, text};
use habitlog::models::config::{Config, Locale};
use habitlog::models::habit::{AggregationMode, HabitConfig, HabitType};
use habitlog::models::record::{DateKey, FieldValue, Record, parse_field};
use std::ffi::OsString;
use std::sync::{LazyLock, Mutex};
use tempfile::TempDir;

static CONFIG_ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

struct HabitlogHomeGuard {
    previous: Option<OsString>,
}

impl HabitlogHomeGuard {
    fn set(path: &std::path::Path) -> Self {
        let previous = std::env::var_os("HABITLOG_HOME");
        // SAFETY: tests that touch HABITLOG_HOME are serialized by CONFIG_ENV_LOCK.
        unsafe { std::env::set_var("HABITLOG_HOME", path) };
        Self { previous }
    }
}

impl Drop for HabitlogHomeGuard {
    fn drop(&mut self) {
        match &self.previous {
            Some(value) => {
                // SAFETY: tests that touch HABITLOG_HOME are serialized by CONFIG_ENV_LOCK.
                unsafe { std::env::set_var("HABITLOG_HOME", value) };
            }
            None => {
                // SAFETY: tests that touch HABITLOG_HOME are serialized by CONFIG_ENV_LOCK.
                unsafe { std::env::remove_var("HABITLOG_HOME") };
            }
        }
    }
}

fn with_temp_habitlog_home<T>(f: impl FnOnce() -> T) -> T {
    let _lock = CONFIG_ENV_LOCK.lock().unwrap();
    let dir = TempDir::new().unwrap();
    let _home = HabitlogHomeGuard::set(dir.path());
    f()
}

// ─── Config tests ────────────────────────────────────────────────────────────

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.display.locale, Locale::En);
    assert_eq!(config.tracking.stats_days, 7);
    assert_eq!(config.tracking.history_days, 30);
    assert!(config.aliases.is_empty());
}

#[test]
fn test_config_missing_file_loads_defaults() {
    with_temp_habitlog_home(|| {
        let config = Config::load().unwrap();
        assert_eq!(config.tracking.stats_days, 7);
    });
}

#[test]
fn test_config_save_and_load() {
    with_temp_habitlog_home(|| {
        let mut config = Config::default();
        config.display.locale = Locale::Es;
        config.tracking.stats_days = 14;
        config.aliases = Config::default_aliases();
        config.save().unwrap();

        let loaded = Config::load().unwrap();
        assert_eq!(loaded.display.locale, Locale::Es);
        assert_eq!(loaded.tracking.stats_days, 14);
        assert_eq!(loaded.resolve_alias("sl"), "sleep");
    });
}

#[cfg(unix)]
#[test]
fn test_config_file_permissions() {
    use std::os::unix::fs::PermissionsExt;
    with_temp_habitlog_home(|| {
        Config::default().save().unwrap();
        let mode = std::fs::metadata(Config::path())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    });
}

#[test]
fn test_config_partial_toml() {
    let config: Config = toml::from_str("[display]\nlocale = \"es\"\n").unwrap();
    assert_eq!(config.display.locale, Locale::Es);
    assert_eq!(config.tracking.history_days, 30);
}

#[test]
fn test_paths_follow_home_override() {
    with_temp_habitlog_home(|| {
        let dir = Config::data_dir();
        assert_eq!(Config::path(), dir.join("config.toml"));
        assert_eq!(Config::db_path(), dir.join("data.db"));
    });
}

#[test]
fn test_resolve_alias() {
    let mut config = Config::default();
    config.aliases = Config::default_aliases();
    assert_eq!(config.resolve_alias("ex"), "exercise");
    assert_eq!(config.resolve_alias("food"), "nutrition");
    assert_eq!(config.resolve_alias("reading"), "reading");
}

#[test]
fn test_locale_parse() {
    assert_eq!("es".parse::<Locale>().unwrap(), Locale::Es);
    assert!("fr".parse::<Locale>().is_err());
    assert_eq!(Locale::En.to_string(), "en");
}

// ─── Record tests ────────────────────────────────────────────────────────────

#[test]
fn test_date_key_parse_and_display() {
    let d: DateKey = "2024-02-29".parse().unwrap();
    assert_eq!(d.to_string(), "2024-02-29");
    assert_eq!(d.offset(1).to_string(), "2024-03-01");
    assert!("2023-02-29".parse::<DateKey>().is_err());
    assert!("29/02/2024".parse::<DateKey>().is_err());
}

#[test]
fn test_date_key_offset_saturates() {
    let d = DateKey::from_ymd(2024, 3, 10).unwrap();
    assert_eq!(d.offset(-i64::from(u32::MAX)), DateKey::new(chrono::NaiveDate::MIN));
    assert_eq!(d.offset(i64::MAX), DateKey::new(chrono::NaiveDate::MAX));
    assert_eq!(d.offset(i64::MIN), DateKey::new(chrono::NaiveDate::MIN));
    assert_eq!(d.offset(-10).to_string(), "2024-02-29");
}

#[test]
fn test_date_key_through() {
    let start = DateKey::from_ymd(2024, 1, 30).unwrap();
    let days: Vec<String> = start
        .through(start.offset(3))
        .map(|d| d.to_string())
        .collect();
    assert_eq!(days, vec!["2024-01-30", "2024-01-31", "2024-02-01", "2024-02-02"]);
}

#[test]
fn test_field_value_as_number() {
    assert_eq!(num(3.5).as_number(), Some(3.5));
    assert_eq!(text(" 12 ").as_number(), Some(12.0));
    assert_eq!(text("23:00").as_number(), None);
    assert_eq!(num(f64::NAN).as_number(), None);
    assert!(text("   ").is_blank());
    assert!(!num(0.0).is_blank());
}

#[test]
fn test_field_value_untagged_json() {
    let v: FieldValue = serde_json::from_str("42").unwrap();
    assert_eq!(v, num(42.0));
    let v: FieldValue = serde_json::from_str("\"07:00\"").unwrap();
    assert_eq!(v, text("07:00"));
}

#[test]
fn test_parse_field() {
    assert_eq!(
        parse_field("duration=45").unwrap(),
        ("duration".to_string(), num(45.0))
    );
    assert_eq!(
        parse_field("bedtime=23:00").unwrap(),
        ("bedtime".to_string(), text("23:00"))
    );
    assert!(parse_field("duration").is_err());
    assert!(parse_field("=5").is_err());
}

#[test]
fn test_record_lifts_notes() {
    let r = Record::new(fields(&[("water", num(3.0)), ("notes", text("hot day"))]));
    assert_eq!(r.notes.as_deref(), Some("hot day"));
    assert!(r.get("notes").is_none());
    assert_eq!(r.to_fields()["notes"], text("hot day"));
    assert_eq!(r.number_or_zero("meals"), 0.0);
}

#[test]
fn test_record_merge() {
    let mut r = Record::new(fields(&[("water", num(3.0)), ("meals", num(2.0))]));
    let before = r.timestamp;
    r.merge(fields(&[("water", num(5.0)), ("notes", text("extra"))]));
    assert_eq!(r.number("water"), Some(5.0));
    assert_eq!(r.number("meals"), Some(2.0));
    assert_eq!(r.notes.as_deref(), Some("extra"));
    assert!(r.timestamp >= before);
}

#[test]
fn test_record_json_shape() {
    let r = Record::new(fields(&[("duration", num(30.0)), ("type", text("run"))]));
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["duration"], 30.0);
    assert_eq!(v["type"], "run");
    assert!(v.get("notes").is_none());
    assert!(v["timestamp"].is_string());
}

// ─── Habit tests ─────────────────────────────────────────────────────────────

#[test]
fn test_habit_type_roundtrip() {
    assert_eq!(HabitType::from("sleep"), HabitType::Sleep);
    assert_eq!(HabitType::from("reading".to_string()), HabitType::Custom("reading".into()));
    assert_eq!(HabitType::Nutrition.to_string(), "nutrition");
    assert_eq!(serde_json::to_string(&HabitType::Exercise).unwrap(), "\"exercise\"");
    let h: HabitType = serde_json::from_str("\"yoga\"").unwrap();
    assert!(h.is_custom());
}

#[test]
fn test_builtin_metric_tables() {
    assert!(HabitType::from("yoga").table().is_none());
    assert!(HabitType::from("yoga").rules().is_empty());
    assert_eq!(HabitType::Nutrition.table().unwrap().trend, "water");
    assert_eq!(HabitType::Sleep.rules().len(), 4);
    assert!(HabitConfig::builtin(&HabitType::from("yoga")).is_none());
}

#[test]
fn test_day_score() {
    let exercise = HabitConfig::builtin(&HabitType::Exercise).unwrap();
    let r = Record::new(fields(&[("duration", num(30.0)), ("calories", num(200.0))]));
    assert_eq!(exercise.day_score(&r), 50.0);

    let sleep = HabitConfig::builtin(&HabitType::Sleep).unwrap();
    let r = Record::new(fields(&[("duration", num(7.0)), ("quality", num(8.0))]));
    assert_eq!(sleep.day_score(&r), 15.0);
}

#[test]
fn test_aggregation_mode() {
    assert_eq!(AggregationMode::Sum.weekly_from_daily(8.0), 56.0);
    assert_eq!(AggregationMode::Average.weekly_from_daily(8.0), 8.0);
    assert_eq!("avg".parse::<AggregationMode>().unwrap(), AggregationMode::Average);
    assert!("median".parse::<AggregationMode>().is_err());
}
