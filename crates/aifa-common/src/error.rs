//! Error types for AIFA

use thiserror::Error;

/// Result type alias for AIFA operations
pub type Result<T> = std::result::Result<T, AifaError>;

/// Main error type for AIFA
#[derive(Error, Debug)]
pub enum AifaError {
    #[error("Unknown AI source: {0}")]
    UnknownAiSource(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}
