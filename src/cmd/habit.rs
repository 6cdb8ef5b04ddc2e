use anyhow::Result;
use serde_json::json;
use std::collections::BTreeMap;

use habitlog::models::habit::AggregationMode;
use habitlog::models::record::FieldValue;
use habitlog::models::HabitType;
use habitlog::output::human;

use super::{Session, print_json};
use crate::cli::HabitAction;

pub fn run(action: HabitAction, human_flag: bool) -> Result<()> {
    let mut session = Session::open(None)?;

    match action {
        HabitAction::List { active } => {
            let catalog = session.tracker.catalog();
            let habits = if active {
                catalog.active_ordered()
            } else {
                catalog.ordered()
            };
            if human_flag {
                for c in &habits {
                    println!("{}", human::format_habit(c));
                }
            } else {
                print_json("habit", json!({ "habits": habits }))?;
            }
            return Ok(());
        }
        HabitAction::Show { habit } => {
            let habit = session.configured_habit(&habit)?;
            let config = session.tracker.catalog().get(&habit);
            if human_flag {
                if let Some(c) = config {
                    println!("{}", human::format_habit(c));
                }
            } else {
                print_json("habit", json!({ "habit": config }))?;
            }
            return Ok(());
        }
        HabitAction::SetTarget {
            habit,
            metric,
            value,
            aggregation,
        } => {
            let habit = session.habit(&habit);
            let catalog = session.tracker.catalog_mut();
            if let Some(mode) = aggregation {
                let mode: AggregationMode = mode.parse()?;
                catalog.set_aggregation(&habit, &metric, mode)?;
            }
            catalog.set_daily_target(&habit, &metric, value)?;
        }
        HabitAction::SetGoal { habit, key, value } => {
            let habit = session.habit(&habit);
            let value = match value.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => FieldValue::Number(n),
                _ => FieldValue::Text(value),
            };
            let goals = BTreeMap::from([(key, value)]);
            session.tracker.catalog_mut().update_goals(&habit, goals)?;
        }
        HabitAction::Toggle { habit } => {
            let habit = session.habit(&habit);
            session.tracker.catalog_mut().toggle_active(&habit)?;
        }
        HabitAction::Reorder { order } => {
            let order: Vec<HabitType> = order
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| session.habit(s))
                .collect();
            session.tracker.catalog_mut().reorder(order)?;
        }
        HabitAction::Add {
            name,
            id,
            targets,
            trend,
        } => {
            let mut daily = BTreeMap::new();
            for (metric, value) in targets {
                let Some(n) = value.as_number() else {
                    anyhow::bail!("target for {} must be a number: {}", metric, value);
                };
                daily.insert(metric, n);
            }
            let catalog = session.tracker.catalog_mut();
            let habit = catalog.add_custom(id.as_deref(), &name, daily)?.id.clone();
            if let Some(metric) = trend {
                catalog.set_trend_metric(&habit, &metric)?;
            }
        }
        HabitAction::Remove { habit } => {
            let habit = session.habit(&habit);
            session.tracker.catalog_mut().remove(&habit)?;
        }
        HabitAction::Reset => session.tracker.catalog_mut().reset(),
    }

    session.save_catalog()?;
    let habits = session.tracker.catalog().ordered();
    if human_flag {
        for c in &habits {
            println!("{}", human::format_habit(c));
        }
    } else {
        print_json("habit", json!({ "habits": habits }))?;
    }
    Ok(())
}
