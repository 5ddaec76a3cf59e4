//! Database module for Symbol Mapper
//! Handles SQLite storage for the key-value settings table

use rusqlite::{params, Connection, Result};
use std::path::Path;
use tracing::debug;

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        debug!(path = %path.display(), "Database opened");
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Set a setting value
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// All stored settings as raw (key, value) pairs
    pub fn all_settings(&self) -> Result<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM settings ORDER BY key")?;

        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>>>()?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn settings_upsert_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.db");

        let db = Database::open(&path).unwrap();
        assert!(db.all_settings().unwrap().is_empty());

        db.set_setting("symbol_mappings", "[]").unwrap();
        db.set_setting("symbol_mappings", r#"[{"phrase":"arrow","symbol":"→"}]"#)
            .unwrap();
        drop(db);

        let db = Database::open(&path).unwrap();
        db.set_setting("locale", r#""de""#).unwrap();
        assert_eq!(
            db.all_settings().unwrap(),
            vec![
                ("locale".to_string(), r#""de""#.to_string()),
                (
                    "symbol_mappings".to_string(),
                    r#"[{"phrase":"arrow","symbol":"→"}]"#.to_string()
                ),
            ]
        );
    }
}
