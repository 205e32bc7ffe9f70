//! Directory-backed slots: `<dir>/<key>.json`

use super::{check_quota, validate_key, KeyValueStore, KvResult};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::debug;

/// Stores each slot as a file inside one directory
pub struct FileKvStore {
    dir: PathBuf,
    quota: Option<u64>,
}

impl FileKvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            quota: None,
        }
    }

    pub fn with_quota(mut self, quota: Option<u64>) -> Self {
        self.quota = quota;
        self
    }

    fn slot_path(&self, key: &str) -> KvResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        let path = self.slot_path(key)?;
        check_quota(self.quota, value)?;
        fs::create_dir_all(&self.dir)?;

        // Write beside the target and rename so readers never see half a slot
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(value.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(&path).map_err(|e| e.error)?;

        debug!(path = %path.display(), bytes = value.len(), "Wrote slot file");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.dir.display())
    }
}
