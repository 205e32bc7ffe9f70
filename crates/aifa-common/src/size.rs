//! Byte size formatting
//!
//! Two formatters live here because the archive shows sizes in two places:
//! the `size` field stored on every record, and the description the intake
//! pre-fills from the uploaded file.

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// Format the `size` field of a record.
///
/// `< 1024` bytes prints as `"{n} B"`, `< 1024²` as KB with one decimal,
/// everything else as MB with two decimals.
pub fn format_record_size(bytes: u64) -> String {
    let size = bytes as f64;
    if size < KIB {
        format!("{} B", bytes)
    } else if size < MIB {
        format!("{:.1} KB", size / KIB)
    } else {
        format!("{:.2} MB", size / MIB)
    }
}

/// Size of `content` as stored on a record (UTF-8 byte length).
pub fn record_size_of(content: &str) -> String {
    format_record_size(content.len() as u64)
}

/// Format a file size for the intake description.
///
/// Picks the largest unit (B, KB, MB, GB) below the value, rounds to two
/// decimals and trims trailing zeros, so `1536` becomes `"1.5 KB"`.
pub fn format_upload_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;
    while size >= KIB && unit_idx < UNITS.len() - 1 {
        size /= KIB;
        unit_idx += 1;
    }

    let rounded = format!("{:.2}", size);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit_idx])
}
