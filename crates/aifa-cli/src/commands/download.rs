//! `aifa download` command implementation
//!
//! Writes a record's content to `<name>.<type>`.

use crate::error::{CliError, Result};
use crate::store::RecordStore;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write the record into `output_dir` (default: current directory).
/// Returns the written path.
pub fn run(store: &RecordStore, id: i64, output_dir: Option<&Path>, force: bool) -> Result<PathBuf> {
    let record = store.get(id).ok_or(CliError::RecordNotFound(id))?;

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };
    fs::create_dir_all(&dir)?;

    let target = dir.join(sanitize_file_name(&record.download_name()));
    if target.exists() && !force {
        return Err(CliError::FileExists(target.display().to_string()));
    }

    fs::write(&target, &record.content)?;
    info!(id, path = %target.display(), "Downloaded record");
    println!("{} Wrote {}", "✓".green(), target.display().to_string().cyan());
    Ok(target)
}

/// Replace characters that would escape the target directory or are
/// rejected by common file systems
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "download".to_string()
    } else {
        trimmed.to_string()
    }
}
