use anyhow::Result;
use rusqlite::params;

use crate::core::catalog::HabitCatalog;
use crate::models::habit::HabitConfig;

use super::Database;

impl Database {
    /// Load the stored catalog, or `None` if it was never saved.
    pub fn load_catalog(&self) -> Result<Option<HabitCatalog>> {
        let mut stmt = self
            .conn
            .prepare("SELECT config FROM habits ORDER BY position")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut configs = Vec::new();
        for row in rows {
            let config: HabitConfig = serde_json::from_str(&row?)?;
            configs.push(config);
        }
        if configs.is_empty() {
            return Ok(None);
        }
        Ok(Some(HabitCatalog::from_ordered(configs)))
    }

    /// Stored catalog, falling back to the built-in defaults.
    pub fn catalog_or_default(&self) -> Result<HabitCatalog> {
        Ok(self.load_catalog()?.unwrap_or_default())
    }

    /// Replace the stored catalog with `catalog`, keeping its order.
    pub fn save_catalog(&self, catalog: &HabitCatalog) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM habits", [])?;
        for (position, config) in catalog.ordered().into_iter().enumerate() {
            tx.execute(
                "INSERT INTO habits (id, position, config) VALUES (?1, ?2, ?3)",
                params![
                    config.id.id(),
                    position as i64,
                    serde_json::to_string(config)?
                ],
            )?;
        }
        tx.commit()?;
        tracing::debug!(habits = catalog.len(), "catalog saved");
        Ok(())
    }
}
