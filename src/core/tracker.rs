use anyhow::Result;
use rand::Rng;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::core::catalog::HabitCatalog;
use crate::core::demo;
use crate::core::progress::{self, DailyProgress};
use crate::core::stats::{self, CompletionStats};
use crate::core::store::RecordStore;
use crate::core::validate::{self, ValidationErrors};
use crate::core::weekly::{self, WINDOW_DAYS, WeeklyView};
use crate::models::config::Locale;
use crate::models::habit::HabitType;
use crate::models::record::{DateKey, DatedRecord, Fields, Record};

/// Why a submission did not reach the store.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error("record store failure: {0:#}")]
    Store(anyhow::Error),
}

impl From<anyhow::Error> for SubmitError {
    fn from(e: anyhow::Error) -> Self {
        Self::Store(e)
    }
}

/// Entry point for callers: validates writes, and derives progress and weekly
/// views from the store and catalog on demand.
pub struct Tracker<S: RecordStore> {
    store: S,
    catalog: HabitCatalog,
    today: DateKey,
    locale: Locale,
}

impl<S: RecordStore> Tracker<S> {
    pub fn new(store: S, catalog: HabitCatalog) -> Self {
        Self {
            store,
            catalog,
            today: DateKey::today(),
            locale: Locale::default(),
        }
    }

    /// Pin "today" (for `--date` overrides and tests).
    pub fn with_today(mut self, today: DateKey) -> Self {
        self.today = today;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn today(&self) -> DateKey {
        self.today
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> &HabitCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut HabitCatalog {
        &mut self.catalog
    }

    pub fn into_parts(self) -> (S, HabitCatalog) {
        (self.store, self.catalog)
    }

    /// Validate and store a full record, replacing any existing one for the day.
    pub fn submit_record(
        &mut self,
        habit: &HabitType,
        date: Option<DateKey>,
        fields: Fields,
    ) -> Result<Fields, SubmitError> {
        let normalized = validate::validate(habit, &fields)?;
        let date = date.unwrap_or(self.today);
        self.store
            .put_record(date, habit, Record::new(normalized.clone()))?;
        tracing::info!(habit = %habit, %date, "record stored");
        Ok(normalized)
    }

    /// Merge `patch` into the day's record (creating it if absent), validate the
    /// merged result, and store it with a fresh timestamp.
    pub fn update_record(
        &mut self,
        habit: &HabitType,
        date: Option<DateKey>,
        patch: Fields,
    ) -> Result<Record, SubmitError> {
        let date = date.unwrap_or(self.today);
        let mut merged = self
            .store
            .record(date, habit)?
            .map(|r| r.to_fields())
            .unwrap_or_default();
        merged.extend(patch);

        let normalized = validate::validate(habit, &merged)?;
        let record = Record::new(normalized);
        self.store.put_record(date, habit, record.clone())?;
        tracing::info!(habit = %habit, %date, "record updated");
        Ok(record)
    }

    /// Remove the habit's record for the day; other habits' records are untouched.
    pub fn delete_record(&mut self, habit: &HabitType, date: Option<DateKey>) -> Result<bool> {
        let date = date.unwrap_or(self.today);
        let removed = self.store.remove_record(date, habit)?;
        tracing::info!(habit = %habit, %date, removed, "record delete");
        Ok(removed)
    }

    pub fn record(&self, habit: &HabitType, date: Option<DateKey>) -> Result<Option<Record>> {
        self.store.record(date.unwrap_or(self.today), habit)
    }

    /// Today's records for every habit, read fresh from the store.
    pub fn today_records(&self) -> Result<BTreeMap<HabitType, Record>> {
        self.store.records_on(self.today)
    }

    pub fn daily_progress(&self, habit: &HabitType, date: Option<DateKey>) -> Result<DailyProgress> {
        let record = self.record(habit, date)?;
        Ok(progress::daily_progress(
            record.as_ref(),
            self.catalog.get(habit),
        ))
    }

    /// Weekly view for the seven days ending today; `None` for unconfigured habits.
    pub fn weekly_view(&self, habit: &HabitType) -> Result<Option<WeeklyView>> {
        let Some(config) = self.catalog.get(habit) else {
            tracing::debug!(habit = %habit, "weekly view requested for unconfigured habit");
            return Ok(None);
        };
        let records: BTreeMap<DateKey, Record> = self
            .weekly_records(habit)?
            .into_iter()
            .map(|d| (d.date, d.record))
            .collect();
        Ok(weekly::weekly_view(
            &records,
            Some(config),
            self.today,
            self.locale,
        ))
    }

    pub fn records_in_range(
        &self,
        habit: &HabitType,
        from: DateKey,
        to: DateKey,
    ) -> Result<Vec<DatedRecord>> {
        self.store.records_in_range(habit, from, to)
    }

    /// Records from the last `days` calendar days, today included.
    pub fn recent_records(&self, habit: &HabitType, days: u32) -> Result<Vec<DatedRecord>> {
        if days == 0 {
            return Ok(Vec::new());
        }
        let from = self.today.offset(-(i64::from(days) - 1));
        self.store.records_in_range(habit, from, self.today)
    }

    pub fn weekly_records(&self, habit: &HabitType) -> Result<Vec<DatedRecord>> {
        self.recent_records(habit, WINDOW_DAYS as u32)
    }

    pub fn monthly_records(&self, habit: &HabitType) -> Result<Vec<DatedRecord>> {
        self.recent_records(habit, 30)
    }

    pub fn completion_stats(&self, habit: &HabitType, days: u32) -> Result<CompletionStats> {
        let records = self.recent_records(habit, days)?;
        Ok(stats::completion_stats(records, days))
    }

    /// Fill the `days` days ending today with generated records.
    pub fn seed_demo<R: Rng>(&mut self, days: u32, rng: &mut R) -> Result<usize> {
        demo::seed(&mut self.store, self.today, days, rng)
    }

    pub fn clear_records(&mut self) -> Result<()> {
        self.store.clear()?;
        tracing::info!("all records cleared");
        Ok(())
    }
}
