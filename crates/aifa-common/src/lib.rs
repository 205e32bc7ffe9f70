//! AIFA Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the AI Files Archive.
//!
//! # Overview
//!
//! This crate provides common functionality used across all AIFA workspace members:
//!
//! - **Error Handling**: Custom error types and result types
//! - **Logging**: Centralized `tracing` setup for every binary
//! - **Sizes**: Human-readable byte size formatting
//! - **Types**: The archived file record and its metadata enums
//!
//! # Example
//!
//! ```no_run
//! use aifa_common::size::format_record_size;
//! use aifa_common::types::AiSource;
//!
//! let source: AiSource = "claude".parse().unwrap();
//! println!("{} -> {}", source, format_record_size(2048));
//! ```

pub mod error;
pub mod logging;
pub mod size;
pub mod types;

// Re-export commonly used types
pub use error::{AifaError, Result};
pub use types::{AiSource, FileRecord};
