//! `aifa export` command implementation

use crate::error::Result;
use crate::store::RecordStore;
use colored::Colorize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Write the snapshot to `output`, or to stdout when `None`
pub fn run(store: &RecordStore, output: Option<&Path>) -> Result<()> {
    let snapshot = store.export();
    let json = serde_json::to_string_pretty(&snapshot)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json)?;
            info!(path = %path.display(), files = snapshot.files.len(), "Exported archive");
            println!(
                "{} Exported {} files to {}",
                "✓".green(),
                snapshot.files.len(),
                path.display().to_string().cyan()
            );
        },
        None => println!("{}", json),
    }
    Ok(())
}
