//! Shared record listings for `list` and `search`

use crate::error::{CliError, Result};
use aifa_common::types::{AiSource, FileRecord};
use colored::{ColoredString, Colorize};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};

/// Formats accepted by `--format`
pub const OUTPUT_FORMATS: &[&str] = &["table", "compact", "json"];

/// Print `records` in the requested format
pub fn display_records(records: &[&FileRecord], format: &str) -> Result<()> {
    match format {
        "compact" => display_compact(records),
        "json" => display_json(records),
        "table" => display_table(records),
        other => Err(CliError::validation(format!(
            "Unknown format '{}'. Use one of: {}",
            other,
            OUTPUT_FORMATS.join(", ")
        ))),
    }
}

fn display_compact(records: &[&FileRecord]) -> Result<()> {
    for record in records {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            record.id, record.ai, record.file_type, record.size, record.name
        );
    }
    Ok(())
}

fn display_table(records: &[&FileRecord]) -> Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["ID", "Name", "AI", "Type", "Size", "Date", "Tags"]);

    for record in records {
        table.add_row(vec![
            record.id.to_string(),
            truncate_string(&record.name, 40),
            record.ai.label().to_string(),
            record.file_type.clone(),
            record.size.clone(),
            record.date.clone(),
            truncate_string(&record.tags.join(", "), 30),
        ]);
    }

    println!("{}", table);
    Ok(())
}

fn display_json(records: &[&FileRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    println!("{}", json);
    Ok(())
}

/// Badge text, coloured per source
pub fn badge(source: &AiSource) -> ColoredString {
    let label = source.label();
    match source {
        AiSource::ChatGpt => label.green(),
        AiSource::DeepSeek => label.blue(),
        AiSource::Grok => label.magenta(),
        AiSource::Claude => label.yellow(),
        AiSource::Other | AiSource::Unrecognized(_) => label.normal(),
    }
}

/// Shorten `s` to at most `max_len` characters, ending in "..."
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("hi", 5), "hi");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        assert_eq!(truncate_string("привет мир", 6), "при...");
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(matches!(display_records(&[], "yaml"), Err(CliError::Validation(_))));
    }

    #[test]
    fn test_known_formats_accept_empty_list() {
        for format in OUTPUT_FORMATS {
            assert!(display_records(&[], format).is_ok());
        }
    }
}
