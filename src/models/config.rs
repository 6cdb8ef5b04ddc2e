use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: Display,
    #[serde(default)]
    pub tracking: Tracking,
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Display {
    #[serde(default)]
    pub locale: Locale,
}

/// Language used for weekday labels in weekly views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub fn weekday_short(&self, day: Weekday) -> &'static str {
        match self {
            Self::En => match day {
                Weekday::Mon => "Mon",
                Weekday::Tue => "Tue",
                Weekday::Wed => "Wed",
                Weekday::Thu => "Thu",
                Weekday::Fri => "Fri",
                Weekday::Sat => "Sat",
                Weekday::Sun => "Sun",
            },
            Self::Es => match day {
                Weekday::Mon => "lun",
                Weekday::Tue => "mar",
                Weekday::Wed => "mié",
                Weekday::Thu => "jue",
                Weekday::Fri => "vie",
                Weekday::Sat => "sáb",
                Weekday::Sun => "dom",
            },
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::En => write!(f, "en"),
            Self::Es => write!(f, "es"),
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            _ => anyhow::bail!("invalid locale: {} (expected en/es)", s),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Tracking {
    /// Window used by `stats` when no `--days` is given.
    #[serde(default = "default_stats_days")]
    pub stats_days: u32,
    /// Window for the monthly history view and demo data.
    #[serde(default = "default_history_days")]
    pub history_days: u32,
}

fn default_stats_days() -> u32 {
    7
}
fn default_history_days() -> u32 {
    30
}

impl Default for Tracking {
    fn default() -> Self {
        Self {
            stats_days: default_stats_days(),
            history_days: default_history_days(),
        }
    }
}

impl Config {
    /// Load config from the standard path, or return defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the standard path.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))?;
            }
        }
        let contents = toml::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::fs::{self, OpenOptions};
            use std::io::Write;
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&path)?;
            file.write_all(contents.as_bytes())?;

            // pre-existing files keep their old mode through open()
            let mut perms = file.metadata()?.permissions();
            if perms.mode() & 0o777 != 0o600 {
                perms.set_mode(0o600);
                fs::set_permissions(&path, perms)?;
            }
        }
        #[cfg(not(unix))]
        {
            std::fs::write(&path, contents)?;
        }

        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Resolve an alias to a habit id, or return the input unchanged.
    pub fn resolve_alias(&self, input: &str) -> String {
        self.aliases
            .get(input)
            .cloned()
            .unwrap_or_else(|| input.to_string())
    }

    pub fn default_aliases() -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("ex".into(), "exercise".into());
        m.insert("sl".into(), "sleep".into());
        m.insert("nu".into(), "nutrition".into());
        m.insert("food".into(), "nutrition".into());
        m
    }

    pub fn data_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HABITLOG_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .map(|h| h.join(".habitlog"))
            .unwrap_or_else(|| PathBuf::from(".habitlog"))
    }

    pub fn path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    pub fn db_path() -> PathBuf {
        Self::data_dir().join("data.db")
    }
}
