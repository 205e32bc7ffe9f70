//! `aifa show` command implementation

use super::display::badge;
use crate::error::{CliError, Result};
use crate::preview;
use crate::store::RecordStore;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use std::io::{self, IsTerminal};

/// Print one record's metadata and its (highlighted) content
pub fn run(store: &RecordStore, id: i64, plain: bool) -> Result<()> {
    let record = store.get(id).ok_or(CliError::RecordNotFound(id))?;
    let plain = plain || !io::stdout().is_terminal();

    if !plain {
        println!();
        println!("{}", "═".repeat(60).blue());
        println!("{}", format!("  {}", record.name).bold());
        println!("{}", "═".repeat(60).blue());
        println!();

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
        table.add_row(vec!["ID".to_string(), record.id.to_string()]);
        table.add_row(vec!["AI".to_string(), badge(&record.ai).to_string()]);
        table.add_row(vec!["Type".to_string(), record.file_type.clone()]);
        table.add_row(vec!["Size".to_string(), record.size.clone()]);
        table.add_row(vec!["Date".to_string(), record.date.clone()]);
        if !record.description.is_empty() {
            table.add_row(vec!["Description".to_string(), record.description.clone()]);
        }
        if !record.tags.is_empty() {
            table.add_row(vec!["Tags".to_string(), record.tags.join(", ")]);
        }
        table.add_row(vec![
            "Created".to_string(),
            record.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ]);
        println!("{}", table);
        println!();
    }

    println!("{}", preview::render(&record.content, &record.file_type, plain)?);
    Ok(())
}
