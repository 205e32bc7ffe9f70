//! Turning user input into a new record
//!
//! A record can start from a file on disk, from pasted text, or from
//! nothing at all (a placeholder header). Values derived from the file name
//! are only defaults; explicit flags always win.

use crate::error::{CliError, Result};
use crate::store::NewRecord;
use aifa_common::size::format_upload_size;
use aifa_common::types::{parse_record_date, AiSource, DEFAULT_FILE_TYPE};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions read without sniffing the content
pub const ACCEPTED_EXTENSIONS: &[&str] = &["html", "htm", "js", "css", "py", "json", "txt", "md"];

/// Where the content comes from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IntakeSource {
    File(PathBuf),
    Pasted(String),
    #[default]
    Empty,
}

/// Everything the user supplied for one upload
#[derive(Debug, Clone, Default)]
pub struct IntakeForm {
    pub source: IntakeSource,
    pub ai: Option<String>,
    pub name: Option<String>,
    pub file_type: Option<String>,
    pub description: Option<String>,
    /// Comma-separated
    pub tags: Option<String>,
    pub date: Option<String>,
}

/// A file read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content: String,
    pub bytes: u64,
}

impl Upload {
    /// Read `path`, rejecting anything that is not text
    pub fn read(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| CliError::unsupported_file(path.display().to_string()))?;

        let raw = std::fs::read(path)?;
        let bytes = raw.len() as u64;
        let known = extension_of(&file_name)
            .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false);

        if !known && raw.contains(&0) {
            return Err(CliError::unsupported_file(file_name));
        }
        let content =
            String::from_utf8(raw).map_err(|_| CliError::unsupported_file(file_name.clone()))?;

        debug!(file = %file_name, bytes, "Read upload");
        Ok(Self {
            file_name,
            content,
            bytes,
        })
    }

    /// File name without its last extension
    pub fn derived_name(&self) -> String {
        match self.file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem.to_string(),
            _ => self.file_name.clone(),
        }
    }

    pub fn derived_type(&self) -> &'static str {
        extension_of(&self.file_name)
            .map(|ext| type_for_extension(&ext))
            .unwrap_or(DEFAULT_FILE_TYPE)
    }

    pub fn derived_description(&self) -> String {
        format!("File {} ({})", self.file_name, format_upload_size(self.bytes))
    }
}

/// Content type for a file extension
pub fn type_for_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "html" | "htm" => "html",
        "js" => "javascript",
        "css" => "css",
        "py" => "python",
        "json" => "json",
        "txt" => "text",
        "md" => "markdown",
        _ => DEFAULT_FILE_TYPE,
    }
}

/// Split a comma-separated tag list, dropping blanks
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Content stored when the user supplied none
pub fn placeholder_content(file_type: &str) -> String {
    format!("// Created via AI Files Archive\n// Type: {}\n\n", file_type)
}

fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

fn explicit(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl IntakeForm {
    /// Validate the form and build the record fields for `RecordStore::add`
    pub fn into_record(self) -> Result<NewRecord> {
        let ai = match explicit(self.ai) {
            Some(raw) => raw.parse::<AiSource>().map_err(|_| {
                CliError::validation(format!(
                    "Unknown AI model '{}'. Choose one of: {}",
                    raw,
                    known_sources()
                ))
            })?,
            None => {
                return Err(CliError::validation(format!(
                    "The AI model is required. Pass --ai with one of: {}",
                    known_sources()
                )))
            },
        };

        let date = explicit(self.date)
            .map(|raw| {
                parse_record_date(&raw).map_err(|_| {
                    CliError::validation(format!("Invalid date '{}', expected YYYY-MM-DD", raw))
                })
            })
            .transpose()?;

        let upload = match &self.source {
            IntakeSource::File(path) => Some(Upload::read(path)?),
            _ => None,
        };

        let name = explicit(self.name)
            .or_else(|| upload.as_ref().map(Upload::derived_name))
            .ok_or_else(|| CliError::validation("A name is required. Pass --name"))?;

        let file_type = explicit(self.file_type)
            .map(|t| t.to_lowercase())
            .or_else(|| upload.as_ref().map(|u| u.derived_type().to_string()))
            .unwrap_or_else(|| DEFAULT_FILE_TYPE.to_string());

        let description = explicit(self.description)
            .or_else(|| upload.as_ref().map(Upload::derived_description))
            .unwrap_or_default();

        let content = match (upload, self.source) {
            (Some(upload), _) => upload.content,
            (None, IntakeSource::Pasted(text)) if !text.is_empty() => text,
            _ => placeholder_content(&file_type),
        };

        let mut record = NewRecord::new()
            .name(name)
            .ai(ai)
            .file_type(file_type)
            .description(description)
            .content(content)
            .tags(self.tags.as_deref().map(parse_tags).unwrap_or_default());
        record.date = date;
        Ok(record)
    }
}

fn known_sources() -> String {
    AiSource::KNOWN
        .iter()
        .map(AiSource::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn form(source: IntakeSource) -> IntakeForm {
        IntakeForm {
            source,
            ai: Some("claude".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_type_for_extension() {
        assert_eq!(type_for_extension("js"), "javascript");
        assert_eq!(type_for_extension("HTM"), "html");
        assert_eq!(type_for_extension("md"), "markdown");
        assert_eq!(type_for_extension("rs"), "text");
    }

    #[test]
    fn test_parse_tags_trims_and_drops_blanks() {
        assert_eq!(parse_tags(" ui, ,react ,, css"), vec!["ui", "react", "css"]);
        assert!(parse_tags(" , ").is_empty());
    }

    #[test]
    fn test_file_derives_name_type_description() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("landing.page.html");
        std::fs::write(&path, "<h1>Hi</h1>").unwrap();

        let record = form(IntakeSource::File(path)).into_record().unwrap();
        assert_eq!(record.name.as_deref(), Some("landing.page"));
        assert_eq!(record.file_type.as_deref(), Some("html"));
        assert_eq!(record.description.as_deref(), Some("File landing.page.html (11 B)"));
        assert_eq!(record.content.as_deref(), Some("<h1>Hi</h1>"));
        assert_eq!(record.ai, Some(AiSource::Claude));
    }

    #[test]
    fn test_explicit_fields_override_derived() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("script.js");
        std::fs::write(&path, "let a = 1;").unwrap();

        let mut input = form(IntakeSource::File(path));
        input.name = Some("Counter".into());
        input.file_type = Some("TypeScript".into());
        input.description = Some("tiny".into());
        input.tags = Some("a, b".into());
        input.date = Some("2024-02-29".into());

        let record = input.into_record().unwrap();
        assert_eq!(record.name.as_deref(), Some("Counter"));
        assert_eq!(record.file_type.as_deref(), Some("typescript"));
        assert_eq!(record.description.as_deref(), Some("tiny"));
        assert_eq!(record.tags, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(record.date.as_deref(), Some("2024-02-29"));
    }

    #[test]
    fn test_unknown_extension_accepts_utf8_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.rs");
        std::fs::write(&path, "fn main() {}").unwrap();

        let record = form(IntakeSource::File(path)).into_record().unwrap();
        assert_eq!(record.file_type.as_deref(), Some("text"));
        assert_eq!(record.name.as_deref(), Some("main"));
    }

    #[test]
    fn test_binary_file_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("image.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G', 0x00, 0x01]).unwrap();

        let err = form(IntakeSource::File(path)).into_record().unwrap_err();
        assert!(matches!(err, CliError::UnsupportedFile(_)));
    }

    #[test]
    fn test_ai_required_and_validated() {
        let mut input = form(IntakeSource::Pasted("x".into()));
        input.name = Some("n".into());
        input.ai = None;
        assert!(matches!(input.clone().into_record(), Err(CliError::Validation(_))));

        input.ai = Some("gemini".into());
        assert!(matches!(input.into_record(), Err(CliError::Validation(_))));
    }

    #[test]
    fn test_pasted_text_requires_name() {
        let input = form(IntakeSource::Pasted("print('hi')".into()));
        assert!(matches!(input.into_record(), Err(CliError::Validation(_))));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let mut input = form(IntakeSource::Empty);
        input.name = Some("n".into());
        input.date = Some("2024-13-01".into());
        assert!(matches!(input.into_record(), Err(CliError::Validation(_))));
    }

    #[test]
    fn test_empty_source_uses_placeholder() {
        let mut input = form(IntakeSource::Empty);
        input.name = Some("Scratch".into());
        input.file_type = Some("python".into());

        let record = input.into_record().unwrap();
        assert_eq!(
            record.content.as_deref(),
            Some("// Created via AI Files Archive\n// Type: python\n\n")
        );
        assert_eq!(record.description.as_deref(), Some(""));
    }
}
