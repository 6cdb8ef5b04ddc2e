use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::models::habit::HabitType;
use crate::models::record::{DateKey, DatedRecord, Record};

/// Day → habit → record. At most one record per (day, habit).
pub type Snapshot = BTreeMap<DateKey, BTreeMap<HabitType, Record>>;

/// Authoritative storage for daily records.
///
/// Writes take `&mut self`: a merge is read-modify-write, so callers sharing a
/// store across threads must serialize writers (a `Mutex` or a single owner).
pub trait RecordStore {
    fn record(&self, date: DateKey, habit: &HabitType) -> Result<Option<Record>>;

    /// Every habit's record for one day.
    fn records_on(&self, date: DateKey) -> Result<BTreeMap<HabitType, Record>>;

    /// Records for `habit` from `from` to `to` inclusive, oldest first, skipping empty days.
    fn records_in_range(
        &self,
        habit: &HabitType,
        from: DateKey,
        to: DateKey,
    ) -> Result<Vec<DatedRecord>>;

    /// Insert or replace the record for (date, habit).
    fn put_record(&mut self, date: DateKey, habit: &HabitType, record: Record) -> Result<()>;

    /// Remove only this habit's record for the day. Returns whether one existed.
    fn remove_record(&mut self, date: DateKey, habit: &HabitType) -> Result<bool>;

    fn clear(&mut self) -> Result<()>;
}

/// Volatile store publishing immutable snapshots.
///
/// Readers take an `Arc` of the current snapshot and never observe a write in
/// progress; each write installs a new snapshot (cloning only when a reader
/// still holds the old one).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    current: Arc<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            current: Arc::new(snapshot),
        }
    }

    /// Current immutable view, safe to hand to concurrent readers.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    /// Number of stored (day, habit) records.
    pub fn len(&self) -> usize {
        self.current.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for MemoryStore {
    fn record(&self, date: DateKey, habit: &HabitType) -> Result<Option<Record>> {
        Ok(self
            .current
            .get(&date)
            .and_then(|day| day.get(habit))
            .cloned())
    }

    fn records_on(&self, date: DateKey) -> Result<BTreeMap<HabitType, Record>> {
        Ok(self.current.get(&date).cloned().unwrap_or_default())
    }

    fn records_in_range(
        &self,
        habit: &HabitType,
        from: DateKey,
        to: DateKey,
    ) -> Result<Vec<DatedRecord>> {
        if to < from {
            return Ok(Vec::new());
        }
        Ok(self
            .current
            .range(from..=to)
            .filter_map(|(date, day)| {
                day.get(habit).map(|record| DatedRecord {
                    date: *date,
                    record: record.clone(),
                })
            })
            .collect())
    }

    fn put_record(&mut self, date: DateKey, habit: &HabitType, record: Record) -> Result<()> {
        Arc::make_mut(&mut self.current)
            .entry(date)
            .or_default()
            .insert(habit.clone(), record);
        Ok(())
    }

    fn remove_record(&mut self, date: DateKey, habit: &HabitType) -> Result<bool> {
        let present = self
            .current
            .get(&date)
            .is_some_and(|day| day.contains_key(habit));
        if !present {
            return Ok(false);
        }
        let snapshot = Arc::make_mut(&mut self.current);
        if let Some(day) = snapshot.get_mut(&date) {
            day.remove(habit);
            if day.is_empty() {
                snapshot.remove(&date);
            }
        }
        Ok(true)
    }

    fn clear(&mut self) -> Result<()> {
        self.current = Arc::new(Snapshot::new());
        Ok(())
    }
}
