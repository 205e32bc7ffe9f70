//! `aifa delete` command implementation

use crate::error::{CliError, Result};
use crate::store::RecordStore;
use colored::Colorize;
use inquire::{Confirm, InquireError};

/// Delete one record, asking first unless `yes` is set.
/// Returns whether a record was removed.
pub fn run(store: &mut RecordStore, id: i64, yes: bool) -> Result<bool> {
    let name = store
        .get(id)
        .map(|record| record.name.clone())
        .ok_or(CliError::RecordNotFound(id))?;

    if !yes && !confirm(&name)? {
        println!("Deletion cancelled.");
        return Ok(false);
    }

    let removed = store.delete(id)?;
    if removed {
        println!("{} Deleted '{}'", "✓".green(), name);
    }
    Ok(removed)
}

fn confirm(name: &str) -> Result<bool> {
    let answer = Confirm::new(&format!("Delete '{}'? This cannot be undone.", name))
        .with_default(false)
        .prompt();

    match answer {
        Ok(answer) => Ok(answer),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(false),
        Err(InquireError::NotTTY) => Err(CliError::validation(
            "Cannot ask for confirmation without a terminal. Pass --yes to delete anyway",
        )),
        Err(e) => Err(CliError::Other(e.into())),
    }
}
