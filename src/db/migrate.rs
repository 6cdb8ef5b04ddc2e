use anyhow::Result;
use rusqlite::Connection;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS records (
            date       TEXT NOT NULL,
            habit      TEXT NOT NULL,
            fields     TEXT NOT NULL,
            notes      TEXT,
            timestamp  TEXT NOT NULL,
            PRIMARY KEY (date, habit)
        );
        CREATE INDEX IF NOT EXISTS idx_records_habit_date ON records(habit, date);

        CREATE TABLE IF NOT EXISTS habits (
            id         TEXT PRIMARY KEY,
            position   INTEGER NOT NULL,
            config     TEXT NOT NULL
        );",
    )?;
    Ok(())
}
