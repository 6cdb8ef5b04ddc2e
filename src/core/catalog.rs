use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::models::habit::{AggregationMode, HabitConfig, HabitType};
use crate::models::record::FieldValue;

static HABIT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("valid habit id pattern"));

/// Habit configurations plus their display order.
///
/// The active set is read from each config's `is_active` flag rather than kept
/// as a second list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitCatalog {
    habits: BTreeMap<HabitType, HabitConfig>,
    order: Vec<HabitType>,
}

impl Default for HabitCatalog {
    fn default() -> Self {
        let mut catalog = Self::empty();
        for habit in HabitType::builtins() {
            if let Some(config) = HabitConfig::builtin(&habit) {
                catalog.order.push(habit.clone());
                catalog.habits.insert(habit, config);
            }
        }
        catalog
    }
}

impl HabitCatalog {
    pub fn empty() -> Self {
        Self {
            habits: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    /// Rebuild from stored configs, already sorted by position.
    pub fn from_ordered(configs: Vec<HabitConfig>) -> Self {
        let mut catalog = Self::empty();
        for config in configs {
            catalog.order.push(config.id.clone());
            catalog.habits.insert(config.id.clone(), config);
        }
        catalog
    }

    pub fn get(&self, habit: &HabitType) -> Option<&HabitConfig> {
        self.habits.get(habit)
    }

    pub fn contains(&self, habit: &HabitType) -> bool {
        self.habits.contains_key(habit)
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn ordered(&self) -> Vec<&HabitConfig> {
        self.order.iter().filter_map(|id| self.habits.get(id)).collect()
    }

    pub fn active_ordered(&self) -> Vec<&HabitConfig> {
        self.ordered().into_iter().filter(|c| c.is_active).collect()
    }

    fn get_mut(&mut self, habit: &HabitType) -> Result<&mut HabitConfig> {
        self.habits
            .get_mut(habit)
            .ok_or_else(|| anyhow::anyhow!("unknown habit: {}", habit))
    }

    /// Shallow-merge goal values into the habit's goals.
    pub fn update_goals(
        &mut self,
        habit: &HabitType,
        goals: BTreeMap<String, FieldValue>,
    ) -> Result<&HabitConfig> {
        let config = self.get_mut(habit)?;
        config.goals.extend(goals);
        tracing::info!(habit = %habit, "goals updated");
        Ok(config)
    }

    /// Shallow-merge daily and weekly targets as given, without deriving one from the other.
    pub fn update_targets(
        &mut self,
        habit: &HabitType,
        daily: BTreeMap<String, f64>,
        weekly: BTreeMap<String, f64>,
    ) -> Result<&HabitConfig> {
        if let Some((metric, value)) = daily.iter().chain(weekly.iter()).find(|(_, v)| **v < 0.0) {
            anyhow::bail!("target for {} must not be negative: {}", metric, value);
        }
        let config = self.get_mut(habit)?;
        config.targets.daily.extend(daily);
        config.targets.weekly.extend(weekly);
        tracing::info!(habit = %habit, "targets updated");
        Ok(config)
    }

    /// Set a daily target and derive the weekly one from the metric's aggregation mode.
    pub fn set_daily_target(
        &mut self,
        habit: &HabitType,
        metric: &str,
        value: f64,
    ) -> Result<&HabitConfig> {
        if !value.is_finite() || value < 0.0 {
            anyhow::bail!("target for {} must be a non-negative number: {}", metric, value);
        }
        let config = self.get_mut(habit)?;
        let weekly = config.aggregation_for(metric).weekly_from_daily(value);
        config.targets.daily.insert(metric.to_string(), value);
        config.targets.weekly.insert(metric.to_string(), weekly);
        tracing::info!(habit = %habit, metric, value, weekly, "daily target set");
        Ok(config)
    }

    pub fn set_aggregation(
        &mut self,
        habit: &HabitType,
        metric: &str,
        mode: AggregationMode,
    ) -> Result<&HabitConfig> {
        let config = self.get_mut(habit)?;
        config.aggregation.insert(metric.to_string(), mode);
        Ok(config)
    }

    /// Choose the metric charted for a habit. Built-in habits keep their fixed one.
    pub fn set_trend_metric(&mut self, habit: &HabitType, metric: &str) -> Result<&HabitConfig> {
        if !habit.is_custom() {
            anyhow::bail!("trend metric of built-in habit {} is fixed", habit);
        }
        let config = self.get_mut(habit)?;
        config.trend_metric = Some(metric.to_string());
        Ok(config)
    }

    /// Flip the active flag. Returns the new state.
    pub fn toggle_active(&mut self, habit: &HabitType) -> Result<bool> {
        let config = self.get_mut(habit)?;
        config.is_active = !config.is_active;
        tracing::info!(habit = %habit, active = config.is_active, "habit toggled");
        Ok(config.is_active)
    }

    /// Replace the display order. `new_order` must list every habit exactly once.
    pub fn reorder(&mut self, new_order: Vec<HabitType>) -> Result<()> {
        if new_order.len() != self.habits.len() {
            anyhow::bail!(
                "new order lists {} habits but the catalog has {}",
                new_order.len(),
                self.habits.len()
            );
        }
        let mut seen = std::collections::BTreeSet::new();
        for id in &new_order {
            if !self.habits.contains_key(id) {
                anyhow::bail!("unknown habit: {}", id);
            }
            if !seen.insert(id) {
                anyhow::bail!("habit listed twice: {}", id);
            }
        }
        self.order = new_order;
        Ok(())
    }

    /// Add a user-defined habit. A missing id is generated.
    ///
    /// Weekly targets are derived from the daily ones by sum.
    pub fn add_custom(
        &mut self,
        id: Option<&str>,
        name: &str,
        daily: BTreeMap<String, f64>,
    ) -> Result<&HabitConfig> {
        let id = match id {
            Some(id) => id.trim().to_string(),
            None => format!("habit-{}", Uuid::new_v4().simple()),
        };
        if !HABIT_ID.is_match(&id) {
            anyhow::bail!(
                "invalid habit id: {} (lowercase letters, digits, '-' and '_')",
                id
            );
        }
        let habit = HabitType::from(id);
        if self.habits.contains_key(&habit) {
            anyhow::bail!("habit already exists: {}", habit);
        }
        if let Some((metric, value)) = daily.iter().find(|(_, v)| **v < 0.0) {
            anyhow::bail!("target for {} must not be negative: {}", metric, value);
        }

        let mut config = HabitConfig::new(habit.clone(), name.trim());
        config.targets.weekly = daily
            .iter()
            .map(|(m, v)| (m.clone(), AggregationMode::Sum.weekly_from_daily(*v)))
            .collect();
        config.targets.daily = daily;

        tracing::info!(habit = %habit, "custom habit added");
        self.order.push(habit.clone());
        Ok(self.habits.entry(habit).or_insert(config))
    }

    /// Remove a habit from the catalog. Its records are left in the store.
    pub fn remove(&mut self, habit: &HabitType) -> Result<HabitConfig> {
        let removed = self
            .habits
            .remove(habit)
            .ok_or_else(|| anyhow::anyhow!("unknown habit: {}", habit))?;
        self.order.retain(|id| id != habit);
        tracing::info!(habit = %habit, "habit removed");
        Ok(removed)
    }

    /// Restore the built-in catalog, dropping custom habits and edits.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
