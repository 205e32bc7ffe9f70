//! `aifa copy` command implementation

use crate::error::{CliError, Result};
use crate::store::RecordStore;
use colored::Colorize;
use tracing::debug;

pub fn run(store: &RecordStore, id: i64) -> Result<()> {
    let record = store.get(id).ok_or(CliError::RecordNotFound(id))?;
    copy_to_clipboard(&record.content)?;
    debug!(id, bytes = record.content.len(), "Copied content to clipboard");
    println!("{} Copied '{}' to the clipboard", "✓".green(), record.name.cyan());
    Ok(())
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;

    let mut clipboard = Clipboard::new()
        .map_err(|e| CliError::clipboard(format!("Failed to access clipboard: {}", e)))?;

    clipboard
        .set_text(text)
        .map_err(|e| CliError::clipboard(format!("Failed to copy to clipboard: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKvStore;
    use crate::store::DEFAULT_STORAGE_KEY;

    #[test]
    fn test_copy_unknown_id() {
        let store = RecordStore::open(Box::new(MemoryKvStore::new()), DEFAULT_STORAGE_KEY);
        assert!(matches!(run(&store, 7), Err(CliError::RecordNotFound(7))));
    }
}
