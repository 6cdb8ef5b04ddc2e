use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::params;
use std::collections::BTreeMap;

use crate::core::store::RecordStore;
use crate::models::habit::HabitType;
use crate::models::record::{DateKey, DatedRecord, Fields, Record};

use super::Database;

struct RecordRow {
    date: String,
    habit: String,
    fields: String,
    notes: Option<String>,
    timestamp: String,
}

fn row_to_record(r: &RecordRow) -> Result<Record> {
    let fields: Fields = serde_json::from_str(&r.fields)?;
    let timestamp: DateTime<Utc> = DateTime::parse_from_rfc3339(&r.timestamp)?.with_timezone(&Utc);
    Ok(Record {
        fields,
        notes: r.notes.clone(),
        timestamp,
    })
}

impl Database {
    fn query_rows<P: rusqlite::Params>(&self, sql: &str, args: P) -> Result<Vec<RecordRow>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, |row| {
            Ok(RecordRow {
                date: row.get(0)?,
                habit: row.get(1)?,
                fields: row.get(2)?,
                notes: row.get(3)?,
                timestamp: row.get(4)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Number of stored (day, habit) records.
    pub fn count_records(&self) -> Result<u64> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(n as u64)
    }
}

impl RecordStore for Database {
    fn record(&self, date: DateKey, habit: &HabitType) -> Result<Option<Record>> {
        let rows = self.query_rows(
            "SELECT date, habit, fields, notes, timestamp
             FROM records WHERE date = ?1 AND habit = ?2",
            params![date.to_string(), habit.id()],
        )?;
        match rows.first() {
            Some(r) => Ok(Some(row_to_record(r)?)),
            None => Ok(None),
        }
    }

    fn records_on(&self, date: DateKey) -> Result<BTreeMap<HabitType, Record>> {
        let rows = self.query_rows(
            "SELECT date, habit, fields, notes, timestamp
             FROM records WHERE date = ?1",
            params![date.to_string()],
        )?;
        let mut out = BTreeMap::new();
        for r in &rows {
            out.insert(HabitType::from(r.habit.as_str()), row_to_record(r)?);
        }
        Ok(out)
    }

    fn records_in_range(
        &self,
        habit: &HabitType,
        from: DateKey,
        to: DateKey,
    ) -> Result<Vec<DatedRecord>> {
        let rows = self.query_rows(
            "SELECT date, habit, fields, notes, timestamp
             FROM records WHERE habit = ?1 AND date >= ?2 AND date <= ?3 ORDER BY date",
            params![habit.id(), from.to_string(), to.to_string()],
        )?;
        let mut out = Vec::with_capacity(rows.len());
        for r in &rows {
            out.push(DatedRecord {
                date: r.date.parse()?,
                record: row_to_record(r)?,
            });
        }
        Ok(out)
    }

    fn put_record(&mut self, date: DateKey, habit: &HabitType, record: Record) -> Result<()> {
        let fields = serde_json::to_string(&record.fields)?;
        self.conn.execute(
            "INSERT INTO records (date, habit, fields, notes, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(date, habit) DO UPDATE SET
                fields = excluded.fields,
                notes = excluded.notes,
                timestamp = excluded.timestamp",
            params![
                date.to_string(),
                habit.id(),
                fields,
                record.notes,
                record.timestamp.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn remove_record(&mut self, date: DateKey, habit: &HabitType) -> Result<bool> {
        let count = self.conn.execute(
            "DELETE FROM records WHERE date = ?1 AND habit = ?2",
            params![date.to_string(), habit.id()],
        )?;
        Ok(count > 0)
    }

    fn clear(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM records", [])?;
        Ok(())
    }
}
