//! Key-value slot storage
//!
//! The archive keeps its whole collection in one named slot of a local
//! key-value store. Three backends implement [`KeyValueStore`]:
//!
//! - [`FileKvStore`]: one JSON file per key, replaced atomically on write
//! - [`SqliteKvStore`]: a single `kv_slots` table
//! - [`MemoryKvStore`]: in-process map for tests and embedding
//!
//! Every backend can enforce a byte quota. A write over quota fails and the
//! previous value stays in place.

pub mod file;
pub mod memory;
pub mod sqlite;

pub use file::FileKvStore;
pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Result type alias for slot storage operations
pub type KvResult<T> = std::result::Result<T, KvError>;

/// Errors raised by a storage backend
#[derive(Error, Debug)]
pub enum KvError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite storage failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Storage quota exceeded: value needs {needed} bytes but the quota is {quota} bytes")]
    QuotaExceeded { needed: u64, quota: u64 },

    #[error("Invalid storage key '{0}': use letters, digits, '-', '_' or '.'")]
    InvalidKey(String),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

/// A local key-value store holding string values
pub trait KeyValueStore {
    /// Read a slot. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> KvResult<Option<String>>;

    /// Replace a slot's value.
    fn set(&self, key: &str, value: &str) -> KvResult<()>;

    /// Short human-readable location, used in logs and `aifa config show`
    fn describe(&self) -> String;
}

/// Available persistent backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Sqlite,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" | "json" => Ok(StorageBackend::File),
            "sqlite" | "db" => Ok(StorageBackend::Sqlite),
            other => Err(format!("unknown storage backend '{}' (expected file or sqlite)", other)),
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::File => f.write_str("file"),
            StorageBackend::Sqlite => f.write_str("sqlite"),
        }
    }
}

/// Open the configured backend rooted at `data_dir`
pub fn open_backend(
    backend: StorageBackend,
    data_dir: &Path,
    quota: Option<u64>,
) -> KvResult<Box<dyn KeyValueStore>> {
    let store: Box<dyn KeyValueStore> = match backend {
        StorageBackend::File => Box::new(FileKvStore::new(data_dir).with_quota(quota)),
        StorageBackend::Sqlite => {
            Box::new(SqliteKvStore::new(data_dir.join("aifa.db"))?.with_quota(quota))
        },
    };
    tracing::debug!(backend = %backend, location = %store.describe(), "Opened storage backend");
    Ok(store)
}

/// Reject keys that cannot be used as a file name on every platform
pub(crate) fn validate_key(key: &str) -> KvResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(KvError::InvalidKey(key.to_string()))
    }
}

pub(crate) fn check_quota(quota: Option<u64>, value: &str) -> KvResult<()> {
    match quota {
        Some(quota) if value.len() as u64 > quota => Err(KvError::QuotaExceeded {
            needed: value.len() as u64,
            quota,
        }),
        _ => Ok(()),
    }
}
