//! `aifa add` command implementation
//!
//! Archives a file, pasted text, or an empty placeholder.

use crate::error::Result;
use crate::intake::IntakeForm;
use crate::store::RecordStore;
use colored::Colorize;
use tracing::debug;

/// Validate the form and store the record. Returns the new id.
pub fn run(store: &mut RecordStore, form: IntakeForm) -> Result<i64> {
    debug!(source = ?form.source, "Adding record");
    let fields = form.into_record()?;
    let record = store.add(fields)?;

    println!(
        "{} Saved '{}' ({}, {}) with id {}",
        "✓".green(),
        record.name.bold(),
        record.file_type,
        record.size,
        record.id.to_string().cyan()
    );
    Ok(record.id)
}
