//! Search command implementation
//!
//! Free-text search over names, descriptions, tags, types and models,
//! optionally restricted to one AI model.

use super::display::display_records;
use crate::error::{CliError, Result};
use crate::store::RecordStore;
use aifa_common::types::{AiSource, Filter};
use colored::Colorize;
use std::collections::BTreeSet;
use tracing::debug;

/// Run the search command
///
/// # Arguments
///
/// * `query` - Search terms (joined with spaces); empty lists everything
/// * `filter` - `all` or one AI model
/// * `format` - Output format (table, compact, json)
pub fn run(store: &RecordStore, query: Vec<String>, filter: &str, format: &str) -> Result<()> {
    let query_str = query.join(" ");
    let filter = parse_filter(filter)?;
    debug!(query = %query_str, filter = %filter, format = %format, "Starting search");

    let results = store.search(query_str.trim(), &filter);

    if results.is_empty() && format != "json" {
        handle_empty_results(store, query_str.trim());
        return Ok(());
    }

    display_records(&results, format)?;
    if format == "table" {
        println!(
            "{} {} of {} files",
            "Found".green(),
            results.len(),
            store.len()
        );
    }
    Ok(())
}

fn parse_filter(raw: &str) -> Result<Filter> {
    raw.parse::<Filter>().map_err(|_| {
        let known: Vec<&str> = AiSource::KNOWN.iter().map(AiSource::as_str).collect();
        CliError::validation(format!(
            "Unknown filter '{}'. Use 'all' or one of: {}",
            raw,
            known.join(", ")
        ))
    })
}

/// Print "no results" with suggestions drawn from the archive itself
fn handle_empty_results(store: &RecordStore, query: &str) {
    println!("{}", "No files found".bold().red());
    println!();

    let suggestions = find_similar_terms(store, query);
    if !suggestions.is_empty() {
        println!("{}", "Did you mean:".bold());
        for suggestion in suggestions {
            println!("  {} {}", "•".blue(), suggestion);
        }
        println!();
    }

    println!("{}", "Try:".bold());
    println!("  {} Check your spelling", "•".blue());
    println!("  {} Use fewer keywords", "•".blue());
    println!("  {} Browse everything: {}", "•".blue(), "aifa search --filter all".cyan());
}

/// Names, name words and tags within edit distance 3 of `query`
fn find_similar_terms(store: &RecordStore, query: &str) -> Vec<String> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut terms = BTreeSet::new();
    for record in store.files() {
        terms.insert(record.name.to_lowercase());
        terms.extend(record.name.split_whitespace().map(str::to_lowercase));
        terms.extend(record.tags.iter().map(|t| t.to_lowercase()));
    }

    let mut suggestions: Vec<(usize, String)> = terms
        .into_iter()
        .filter_map(|term| {
            let distance = strsim::levenshtein(&query, &term);
            (distance > 0 && distance <= 3).then_some((distance, term))
        })
        .collect();
    suggestions.sort();
    suggestions.truncate(3);
    suggestions.into_iter().map(|(_, term)| term).collect()
}
