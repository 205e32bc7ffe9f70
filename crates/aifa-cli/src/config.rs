//! Configuration management for the AIFA CLI
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `AIFA_*` environment variables. Command-line flags are applied last by
//! the binary through the setters.

use crate::error::{CliError, Result};
use crate::kv::{open_backend, StorageBackend};
use crate::store::{RecordStore, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Overrides the config file location
pub const CONFIG_PATH_ENV: &str = "AIFA_CONFIG";
pub const DATA_DIR_ENV: &str = "AIFA_DATA_DIR";
pub const BACKEND_ENV: &str = "AIFA_STORAGE_BACKEND";
pub const STORAGE_KEY_ENV: &str = "AIFA_STORAGE_KEY";
pub const QUOTA_ENV: &str = "AIFA_QUOTA_BYTES";

/// Keys understood by `aifa config get`
pub const CONFIG_KEYS: &[&str] = &["data_dir", "backend", "storage_key", "quota_bytes", "verbose"];

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the archive
    pub data_dir: PathBuf,

    pub backend: StorageBackend,

    /// Slot the collection is stored under
    pub storage_key: String,

    /// Maximum size of the serialized collection in bytes
    pub quota_bytes: Option<u64>,

    #[serde(default)]
    pub verbose: bool,
}

/// Shape of `config.toml`; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    backend: Option<StorageBackend>,
    storage_key: Option<String>,
    quota_bytes: Option<u64>,
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| CliError::config("Could not determine data directory"))?
            .join("aifa");

        Ok(Self {
            data_dir,
            backend: StorageBackend::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            quota_bytes: None,
            verbose: false,
        })
    }

    /// Defaults, then the config file (if any), then the environment
    pub fn load() -> Result<Self> {
        let mut config = Self::new()?;
        if let Some(path) = Self::config_path() {
            if path.exists() {
                config.merge_file(&path)?;
            } else if std::env::var_os(CONFIG_PATH_ENV).is_some() {
                return Err(CliError::config(format!(
                    "{} points to '{}', which does not exist",
                    CONFIG_PATH_ENV,
                    path.display()
                )));
            }
        }
        config.apply_env()?;
        Ok(config)
    }

    /// `AIFA_CONFIG` if set, otherwise `<config_dir>/aifa/config.toml`
    pub fn config_path() -> Option<PathBuf> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::config_dir().map(|dir| dir.join("aifa").join("config.toml")),
        }
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&raw).map_err(|e| {
            CliError::config(format!("Invalid config file '{}': {}", path.display(), e))
        })?;

        if let Some(dir) = file.data_dir {
            self.data_dir = dir;
        }
        if let Some(backend) = file.backend {
            self.backend = backend;
        }
        if let Some(key) = file.storage_key {
            self.storage_key = key;
        }
        if file.quota_bytes.is_some() {
            self.quota_bytes = file.quota_bytes;
        }
        debug!(path = %path.display(), "Loaded config file");
        Ok(())
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }

        if let Ok(backend) = std::env::var(BACKEND_ENV) {
            self.backend = backend
                .parse()
                .map_err(|e| CliError::config(format!("{}: {}", BACKEND_ENV, e)))?;
        }

        if let Ok(key) = std::env::var(STORAGE_KEY_ENV) {
            self.storage_key = key;
        }

        if let Ok(quota) = std::env::var(QUOTA_ENV) {
            let quota = quota.trim().parse::<u64>().map_err(|_| {
                CliError::config(format!("{} must be a number of bytes, got '{}'", QUOTA_ENV, quota))
            })?;
            self.quota_bytes = Some(quota);
        }

        Ok(())
    }

    /// Value of one setting as shown by `aifa config get`
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "data_dir" => self.data_dir.display().to_string(),
            "backend" => self.backend.to_string(),
            "storage_key" => self.storage_key.clone(),
            "quota_bytes" => self
                .quota_bytes
                .map(|q| q.to_string())
                .unwrap_or_else(|| "none".to_string()),
            "verbose" => self.verbose.to_string(),
            _ => {
                return Err(CliError::config(format!(
                    "Unknown config key: {} (known keys: {})",
                    key,
                    CONFIG_KEYS.join(", ")
                )))
            },
        };
        Ok(value)
    }

    /// Open the configured backend and load the archive from it
    pub fn open_store(&self) -> Result<RecordStore> {
        let backend = open_backend(self.backend, &self.data_dir, self.quota_bytes)?;
        Ok(RecordStore::open(backend, self.storage_key.clone()))
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) {
        self.data_dir = dir;
    }

    pub fn set_backend(&mut self, backend: StorageBackend) {
        self.backend = backend;
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            data_dir: PathBuf::from(".aifa"),
            backend: StorageBackend::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            quota_bytes: None,
            verbose: false,
        })
    }
}
