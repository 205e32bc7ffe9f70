//! Common types used across AIFA

use crate::error::{AifaError, Result};
use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder used when a record is stored without a name.
pub const UNTITLED: &str = "Untitled";

/// Content type used when none is given.
pub const DEFAULT_FILE_TYPE: &str = "text";

/// Date format of the `date` field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The AI model a stored file came from.
///
/// Values outside the known set can only arrive through an import. They are
/// kept verbatim so an export/import cycle never rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AiSource {
    ChatGpt,
    DeepSeek,
    Grok,
    Claude,
    #[default]
    Other,
    Unrecognized(String),
}

impl AiSource {
    /// Every source a user can pick, in dashboard order.
    pub const KNOWN: [AiSource; 5] = [
        AiSource::ChatGpt,
        AiSource::DeepSeek,
        AiSource::Grok,
        AiSource::Claude,
        AiSource::Other,
    ];

    /// Tag as stored on disk and accepted on the command line.
    pub fn as_str(&self) -> &str {
        match self {
            AiSource::ChatGpt => "chatgpt",
            AiSource::DeepSeek => "deepseek",
            AiSource::Grok => "grok",
            AiSource::Claude => "claude",
            AiSource::Other => "other",
            AiSource::Unrecognized(raw) => raw,
        }
    }

    /// Badge text shown next to a record.
    pub fn label(&self) -> &'static str {
        match self {
            AiSource::ChatGpt => "ChatGPT",
            AiSource::DeepSeek => "DeepSeek",
            AiSource::Grok => "Grok",
            AiSource::Claude => "Claude",
            AiSource::Other | AiSource::Unrecognized(_) => "AI",
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, AiSource::Unrecognized(_))
    }
}

impl std::str::FromStr for AiSource {
    type Err = AifaError;

    /// Strict parse: only the known tags are accepted.
    fn from_str(s: &str) -> Result<Self> {
        match AiSource::from(s.trim().to_lowercase()) {
            AiSource::Unrecognized(_) => Err(AifaError::UnknownAiSource(s.to_string())),
            source => Ok(source),
        }
    }
}

impl From<String> for AiSource {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "chatgpt" => AiSource::ChatGpt,
            "deepseek" => AiSource::DeepSeek,
            "grok" => AiSource::Grok,
            "claude" => AiSource::Claude,
            "other" => AiSource::Other,
            _ => AiSource::Unrecognized(raw),
        }
    }
}

impl From<AiSource> for String {
    fn from(source: AiSource) -> Self {
        match source {
            AiSource::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for AiSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Restriction on the `ai` field applied before a text search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Source(AiSource),
}

impl Filter {
    pub fn matches(&self, record: &FileRecord) -> bool {
        match self {
            Filter::All => true,
            Filter::Source(source) => &record.ai == source,
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = AifaError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Filter::All);
        }
        s.parse::<AiSource>()
            .map(Filter::Source)
            .map_err(|_| AifaError::InvalidFilter(s.to_string()))
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Source(source) => write!(f, "{}", source),
        }
    }
}

/// One archived file with its metadata.
///
/// Field names serialize in camelCase so the persisted slot and the export
/// format share one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Primary key, strictly increasing in creation order
    pub id: i64,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default)]
    pub ai: AiSource,

    /// Content format ("html", "javascript", "python", "text", ...)
    #[serde(rename = "type", default = "default_file_type")]
    pub file_type: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    /// Calendar date, `YYYY-MM-DD`
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,

    /// Human-readable size of `content`, fixed at creation
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: String,

    #[serde(default = "now_millis")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "now_millis")]
    pub updated_at: DateTime<Utc>,
}

impl FileRecord {
    /// Text the free-text search runs against, lower-cased.
    pub fn search_haystack(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}\n{}",
            self.name,
            self.description,
            self.tags.join(" "),
            self.file_type,
            self.ai
        )
        .to_lowercase()
    }

    /// File name used when the record is written to disk.
    pub fn download_name(&self) -> String {
        format!("{}.{}", self.name, self.file_type)
    }
}

/// Stored archives may carry `null` where a value is optional
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_name() -> String {
    UNTITLED.to_string()
}

fn default_file_type() -> String {
    DEFAULT_FILE_TYPE.to_string()
}

/// Current time truncated to milliseconds.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Today's date in record format.
pub fn today() -> String {
    Utc::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Validate a user-supplied `YYYY-MM-DD` date.
pub fn parse_record_date(raw: &str) -> Result<String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .map_err(|_| AifaError::InvalidDate(raw.to_string()))
}
