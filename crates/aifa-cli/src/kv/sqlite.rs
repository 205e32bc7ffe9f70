//! SQLite-backed slots
//!
//! Keeps every slot as one row of the `kv_slots` table.

use super::{check_quota, validate_key, KeyValueStore, KvResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;
use tracing::debug;

/// Slot storage in a single SQLite database file
pub struct SqliteKvStore {
    db_path: PathBuf,
    quota: Option<u64>,
}

impl SqliteKvStore {
    /// Open (and create if needed) the database at `db_path`
    pub fn new(db_path: PathBuf) -> KvResult<Self> {
        let store = Self {
            db_path,
            quota: None,
        };
        store.init()?;
        Ok(store)
    }

    pub fn with_quota(mut self, quota: Option<u64>) -> Self {
        self.quota = quota;
        self
    }

    fn open_connection(&self) -> KvResult<Connection> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Connection::open(&self.db_path)?)
    }

    fn init(&self) -> KvResult<()> {
        let conn = self.open_connection()?;
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS kv_slots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            [],
        )?;
        debug!(path = %self.db_path.display(), "SQLite slot schema initialized");
        Ok(())
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        validate_key(key)?;
        let conn = self.open_connection()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        validate_key(key)?;
        check_quota(self.quota, value)?;
        let conn = self.open_connection()?;
        conn.execute(
            "INSERT OR REPLACE INTO kv_slots (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        debug!(key = %key, bytes = value.len(), "Wrote SQLite slot");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.db_path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::KvError;
    use tempfile::tempdir;

    fn create_test_store() -> (SqliteKvStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = SqliteKvStore::new(dir.path().join("kv.db")).unwrap();
        (store, dir)
    }

    #[test]
    fn test_init_creates_database() {
        let (store, _dir) = create_test_store();
        assert!(store.db_path.exists());
    }

    #[test]
    fn test_set_and_get() {
        let (store, _dir) = create_test_store();
        assert!(store.get("slot").unwrap().is_none());
        store.set("slot", r#"[{"id":1}]"#).unwrap();
        assert_eq!(store.get("slot").unwrap().as_deref(), Some(r#"[{"id":1}]"#));
    }

    #[test]
    fn test_set_replaces() {
        let (store, _dir) = create_test_store();
        store.set("slot", "a").unwrap();
        store.set("slot", "b").unwrap();
        assert_eq!(store.get("slot").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_values_survive_reopen() {
        let (store, dir) = create_test_store();
        store.set("slot", "persisted").unwrap();

        let reopened = SqliteKvStore::new(dir.path().join("kv.db")).unwrap();
        assert_eq!(reopened.get("slot").unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_quota() {
        let (store, _dir) = create_test_store();
        let store = store.with_quota(Some(2));
        assert!(matches!(store.set("slot", "abc"), Err(KvError::QuotaExceeded { .. })));
        assert!(store.get("slot").unwrap().is_none());
    }
}
