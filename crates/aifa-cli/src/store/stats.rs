//! Collection statistics and the export snapshot

use aifa_common::types::{AiSource, FileRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Format version stamped on every export
pub const EXPORT_VERSION: &str = "1.0";

/// Counts over the whole collection
///
/// `other` counts records explicitly tagged `other`; `unrecognized` counts
/// records whose `ai` value is outside the known set (imports only).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub chatgpt: usize,
    pub deepseek: usize,
    pub grok: usize,
    pub claude: usize,
    pub other: usize,
    #[serde(default)]
    pub unrecognized: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_date: BTreeMap<String, usize>,
}

impl Stats {
    pub fn from_records(records: &[FileRecord]) -> Self {
        let mut stats = Stats {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            *stats.bucket_mut(&record.ai) += 1;
            *stats.by_type.entry(record.file_type.clone()).or_default() += 1;
            *stats.by_date.entry(record.date.clone()).or_default() += 1;
        }

        stats
    }

    /// Count for one source; every unrecognized value shares one bucket
    pub fn count_for(&self, source: &AiSource) -> usize {
        match source {
            AiSource::ChatGpt => self.chatgpt,
            AiSource::DeepSeek => self.deepseek,
            AiSource::Grok => self.grok,
            AiSource::Claude => self.claude,
            AiSource::Other => self.other,
            AiSource::Unrecognized(_) => self.unrecognized,
        }
    }

    fn bucket_mut(&mut self, source: &AiSource) -> &mut usize {
        match source {
            AiSource::ChatGpt => &mut self.chatgpt,
            AiSource::DeepSeek => &mut self.deepseek,
            AiSource::Grok => &mut self.grok,
            AiSource::Claude => &mut self.claude,
            AiSource::Other => &mut self.other,
            AiSource::Unrecognized(_) => &mut self.unrecognized,
        }
    }
}

/// Versioned dump of the archive, as written by `aifa export`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub files: Vec<FileRecord>,
    pub stats: Stats,
}

impl ExportSnapshot {
    pub fn new(files: Vec<FileRecord>) -> Self {
        let stats = Stats::from_records(&files);
        Self {
            version: EXPORT_VERSION.to_string(),
            export_date: aifa_common::types::now_millis(),
            files,
            stats,
        }
    }
}
