//! `aifa list` command implementation
//!
//! The dashboard: headline counts plus the most recent files.

use super::display::{badge, display_records};
use crate::error::Result;
use crate::store::RecordStore;
use aifa_common::types::AiSource;
use colored::Colorize;

/// Files shown when no limit is given
pub const DEFAULT_RECENT_LIMIT: usize = 6;

pub fn run(store: &RecordStore, limit: usize, format: &str) -> Result<()> {
    let recent: Vec<_> = store.files().iter().take(limit).collect();

    if format == "json" {
        return display_records(&recent, format);
    }

    if store.is_empty() {
        println!("{}", "The archive is empty.".yellow());
        println!("Add a file with: {}", "aifa add <PATH> --ai <model>".cyan());
        return Ok(());
    }

    if format == "table" {
        print_summary(store);
        println!();
        println!(
            "{}",
            format!("Recent files ({} of {})", recent.len(), store.len()).bold()
        );
    }
    display_records(&recent, format)
}

fn print_summary(store: &RecordStore) {
    let stats = store.stats();
    let counts: Vec<String> = AiSource::KNOWN[..4]
        .iter()
        .map(|source| format!("{} {}", badge(source), stats.count_for(source)))
        .collect();
    println!("{} {}   {}", "Total".bold(), stats.total, counts.join("   "));
}
