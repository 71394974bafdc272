//! SQLite-backed key-value persistence.
//!
//! The durable backend behind the entity store: a single `kv` table holding
//! one serialized collection per key. Multi-key writes go through a
//! transaction so a logical operation touching both collections lands as one
//! commit.

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::StoreError;
use crate::storage::backend::KvBackend;

/// SQLite database exposing a string key-value store.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Open the database at `~/.config/daymap/daymap.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?
            .join("daymap.db");
        Self::open_at(&path)
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: &std::path::Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl KvBackend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv WHERE key = ?1")
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::ReadFailed(e.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn set_many(&mut self, pairs: &[(&str, String)]) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        for (key, value) in pairs {
            tx.execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_roundtrip() {
        let mut db = SqliteBackend::open_memory().unwrap();
        assert!(db.get("groups").unwrap().is_none());
        db.set("groups", "[]").unwrap();
        assert_eq!(db.get("groups").unwrap().unwrap(), "[]");
    }

    #[test]
    fn set_replaces_existing_value() {
        let mut db = SqliteBackend::open_memory().unwrap();
        db.set("items", "[1]").unwrap();
        db.set("items", "[2]").unwrap();
        assert_eq!(db.get("items").unwrap().unwrap(), "[2]");
    }

    #[test]
    fn set_many_commits_both_keys() {
        let mut db = SqliteBackend::open_memory().unwrap();
        db.set_many(&[("groups", "[\"g\"]".to_string()), ("items", "[\"i\"]".to_string())])
            .unwrap();
        assert_eq!(db.get("groups").unwrap().unwrap(), "[\"g\"]");
        assert_eq!(db.get("items").unwrap().unwrap(), "[\"i\"]");
    }
}
