use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use habitlog::models::record::{FieldValue, parse_field};

#[derive(Parser)]
#[command(
    name = "habitlog",
    version,
    about = "Track exercise, sleep and nutrition habits against daily and weekly goals"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as human-readable text instead of JSON
    #[arg(long = "human", short = 'H', global = true)]
    pub human: bool,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize config, the habit catalog and the data directory
    Init {
        /// Also seed 30 days of demo records
        #[arg(long)]
        demo: bool,
    },

    /// Log a day's record for a habit, replacing any existing one
    Log {
        /// Habit id (exercise, sleep, nutrition, custom id) or alias
        habit: String,

        /// Metric as key=value (repeatable), e.g. -f duration=30 -f type=running
        #[arg(short = 'f', long = "field", value_parser = parse_field)]
        fields: Vec<(String, FieldValue)>,

        /// Free-text note
        #[arg(long)]
        notes: Option<String>,
    },

    /// Merge fields into the day's record
    Update {
        habit: String,

        #[arg(short = 'f', long = "field", value_parser = parse_field)]
        fields: Vec<(String, FieldValue)>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete the day's record for a habit
    Delete { habit: String },

    /// Show a habit's records
    Show {
        habit: String,

        /// Number of recent days to show (default 7)
        #[arg(long)]
        last: Option<u32>,

        /// Show records from this date
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,

        /// Show records up to this date
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },

    /// Today's records across all habits
    Today,

    /// Progress against daily targets
    Progress { habit: String },

    /// Seven-day summary: completion, best/worst day, trend
    Weekly { habit: String },

    /// Completion over recent days
    Stats {
        habit: String,

        /// Window length in days (default from config)
        #[arg(long)]
        days: Option<u32>,
    },

    /// Manage the habit catalog
    Habit {
        #[command(subcommand)]
        action: HabitAction,
    },

    /// Shortcuts for common entries
    Quick {
        #[command(subcommand)]
        action: QuickAction,
    },

    /// Fill the store with generated demo records
    Demo {
        /// Number of days ending today (default from config)
        #[arg(long)]
        days: Option<u32>,

        /// RNG seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print shell completions
    Completions { shell: Shell },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init { .. } => "init",
            Self::Log { .. } => "log",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::Show { .. } => "show",
            Self::Today => "today",
            Self::Progress { .. } => "progress",
            Self::Weekly { .. } => "weekly",
            Self::Stats { .. } => "stats",
            Self::Habit { .. } => "habit",
            Self::Quick { .. } => "quick",
            Self::Demo { .. } => "demo",
            Self::Config { .. } => "config",
            Self::Completions { .. } => "completions",
        }
    }
}

#[derive(Subcommand)]
pub enum HabitAction {
    /// List habits in display order
    List {
        /// Only active habits
        #[arg(long)]
        active: bool,
    },
    /// Show one habit's configuration
    Show { habit: String },
    /// Set a daily target; the weekly target is derived from it
    SetTarget {
        habit: String,
        metric: String,
        value: f64,
        /// How the metric rolls up into a week: sum or average
        #[arg(long)]
        aggregation: Option<String>,
    },
    /// Set a goal value (number or text such as 23:00)
    SetGoal {
        habit: String,
        key: String,
        value: String,
    },
    /// Toggle a habit between active and inactive
    Toggle { habit: String },
    /// Set display order, e.g. sleep,exercise,nutrition
    Reorder { order: String },
    /// Add a custom habit
    Add {
        name: String,
        /// Habit id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Daily target as metric=value (repeatable)
        #[arg(long = "target", value_parser = parse_field)]
        targets: Vec<(String, FieldValue)>,
        /// Metric used for charts and trend
        #[arg(long)]
        trend: Option<String>,
    },
    /// Remove a habit from the catalog
    Remove { habit: String },
    /// Restore the built-in habits
    Reset,
}

#[derive(Subcommand)]
pub enum QuickAction {
    /// Log a workout from its activity and length in minutes
    Workout { activity: String, minutes: f64 },
    /// Log last night's sleep from bed and wake-up times (HH:MM)
    Sleep {
        bedtime: String,
        wakeup: String,
        quality: f64,
    },
    /// Add a glass of water to today
    Water,
    /// Add a meal to today
    Meal {
        calories: f64,
        #[arg(long)]
        protein: Option<f64>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a config value
    Set {
        /// Config key (e.g. locale, stats_days, history_days, alias.x)
        key: String,
        /// Config value
        value: String,
    },
}
