//! `aifa import` command implementation
//!
//! Replaces the whole archive with the files of an export.

use crate::error::Result;
use crate::store::RecordStore;
use colored::Colorize;
use std::path::Path;
use tracing::debug;

/// Returns the number of imported files
pub fn run(store: &mut RecordStore, path: &Path) -> Result<usize> {
    let raw = std::fs::read_to_string(path)?;
    let data: serde_json::Value = serde_json::from_str(&raw)?;
    debug!(path = %path.display(), replaced = store.len(), "Importing archive");

    let count = store.import(&data)?;
    println!(
        "{} Imported {} files from {}",
        "✓".green(),
        count,
        path.display().to_string().cyan()
    );
    Ok(count)
}
