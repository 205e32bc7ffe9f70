//! `aifa stats` command implementation

use super::display::badge;
use crate::error::Result;
use crate::store::{RecordStore, Stats};
use aifa_common::types::AiSource;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};

pub fn run(store: &RecordStore, detailed: bool, json: bool) -> Result<()> {
    let stats = store.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Archive statistics".cyan().bold());
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Model", "Files"]);
    table.add_row(vec!["Total".to_string(), stats.total.to_string()]);

    let shown = if detailed { AiSource::KNOWN.len() } else { 4 };
    for source in AiSource::KNOWN.iter().take(shown) {
        table.add_row(vec![badge(source).to_string(), stats.count_for(source).to_string()]);
    }
    if detailed && stats.unrecognized > 0 {
        table.add_row(vec!["Unrecognized".to_string(), stats.unrecognized.to_string()]);
    }
    println!("{}", table);

    if detailed {
        print_breakdowns(&stats);
        println!();
        println!("{} {}", "Stored in:".dimmed(), store.location());
    }
    Ok(())
}

fn print_breakdowns(stats: &Stats) {
    for (title, counts) in [("By type", &stats.by_type), ("By date", &stats.by_date)] {
        if counts.is_empty() {
            continue;
        }
        println!();
        println!("{}", title.bold());
        for (key, count) in counts {
            println!("  {:<20} {}", key, count);
        }
    }
}
