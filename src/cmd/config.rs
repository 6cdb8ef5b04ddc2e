use anyhow::Result;
use serde_json::json;

use habitlog::models::config::Config;
use habitlog::output;

pub fn run_show(human: bool) -> Result<()> {
    let config = Config::load()?;
    if human {
        let toml_str = toml::to_string_pretty(&config)?;
        println!("{}", toml_str);
    } else {
        let out = output::success("config", json!({ "config": config }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "locale" => config.display.locale = value.parse()?,
        "stats_days" => config.tracking.stats_days = value.parse()?,
        "history_days" => config.tracking.history_days = value.parse()?,
        k => match k.strip_prefix("alias.") {
            Some(alias) if !alias.is_empty() => {
                config.aliases.insert(alias.to_string(), value.to_string());
            }
            _ => anyhow::bail!("unknown config key: {}", key),
        },
    }

    config.save()?;
    let out = output::success("config", json!({ "key": key, "value": value }));
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}
