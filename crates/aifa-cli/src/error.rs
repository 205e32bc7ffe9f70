//! Error types for the AIFA CLI
//!
//! Every variant carries a message the user can act on.

use crate::kv::KvError;
use crate::store::StoreError;
use aifa_common::AifaError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// Store mutation or import failed
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Backend could not be opened
    #[error("Storage error: {0}. Check the data directory with 'aifa config show'.")]
    Storage(#[from] KvError),

    #[error("No file with id {0}. Run 'aifa list' or 'aifa search' to see stored ids.")]
    RecordNotFound(i64),

    #[error("Unsupported file '{0}': only text files can be archived (html, js, css, py, json, txt, md or other UTF-8 text).")]
    UnsupportedFile(String),

    /// Missing or invalid user input
    #[error("{0}")]
    Validation(String),

    #[error("Clipboard error: {0}. Use 'aifa show <ID> --plain' and copy the output instead.")]
    Clipboard(String),

    #[error("Configuration error: {0}. Check your environment variables or config file.")]
    Config(String),

    #[error("'{0}' already exists. Use --force to overwrite it.")]
    FileExists(String),

    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    #[error("Invalid highlight pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to parse JSON: {0}. Check the file syntax.")]
    JsonParse(#[from] serde_json::Error),

    #[error(transparent)]
    Common(#[from] AifaError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }

    pub fn unsupported_file(path: impl Into<String>) -> Self {
        Self::UnsupportedFile(path.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_actionable() {
        let err = CliError::RecordNotFound(42);
        assert!(err.to_string().contains("aifa list"));

        let err = CliError::FileExists("notes.text".into());
        assert!(err.to_string().contains("--force"));
    }

    #[test]
    fn test_store_error_passes_through() {
        let err: CliError = StoreError::MalformedImport("record #0: missing field `id`".into()).into();
        assert_eq!(err.to_string(), "Malformed import: record #0: missing field `id`");
    }

    #[test]
    fn test_common_error_conversion() {
        let err: CliError = AifaError::UnknownAiSource("gemini".into()).into();
        assert!(matches!(err, CliError::Common(_)));
    }
}
