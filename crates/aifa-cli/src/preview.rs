//! Terminal preview with light syntax colouring
//!
//! Not a lexer: one alternation regex per language, applied in a single
//! pass so that a match is never re-coloured by a later rule.

use crate::error::Result;
use colored::Colorize;
use regex::{Captures, Regex};

const JS_KEYWORDS: &[&str] = &[
    "function", "const", "let", "var", "if", "else", "return", "for", "while", "class", "export",
    "import", "async", "await",
];

/// Render `content` for the terminal. `plain` returns it untouched.
pub fn render(content: &str, file_type: &str, plain: bool) -> Result<String> {
    if plain {
        return Ok(content.to_string());
    }
    highlight(content, file_type)
}

/// Colour `content` according to `file_type`
///
/// Only `html` and `javascript` are coloured; other types pass through.
pub fn highlight(content: &str, file_type: &str) -> Result<String> {
    match file_type {
        "html" => highlight_html(content),
        "javascript" => highlight_javascript(content),
        _ => Ok(content.to_string()),
    }
}

fn highlight_html(content: &str) -> Result<String> {
    let pattern = Regex::new(
        r#"(?P<string>"[^"]*")|(?P<open></?)(?P<tag>[A-Za-z][A-Za-z0-9]*)|(?P<ws>\s)(?P<attr>[A-Za-z-]+)="#,
    )?;

    let highlighted = pattern.replace_all(content, |caps: &Captures| {
        if let Some(string) = caps.name("string") {
            string.as_str().green().to_string()
        } else if let (Some(open), Some(tag)) = (caps.name("open"), caps.name("tag")) {
            format!("{}{}", open.as_str(), tag.as_str().red())
        } else if let (Some(ws), Some(attr)) = (caps.name("ws"), caps.name("attr")) {
            format!("{}{}=", ws.as_str(), attr.as_str().blue())
        } else {
            caps[0].to_string()
        }
    });
    Ok(highlighted.into_owned())
}

fn highlight_javascript(content: &str) -> Result<String> {
    let pattern = Regex::new(&format!(
        r#"(?P<comment>//[^\n]*|/\*(?s:.*?)\*/)|(?P<string>"[^"\n]*"|'[^'\n]*')|\b(?P<keyword>{})\b"#,
        JS_KEYWORDS.join("|")
    ))?;

    let highlighted = pattern.replace_all(content, |caps: &Captures| {
        if let Some(comment) = caps.name("comment") {
            comment.as_str().dimmed().to_string()
        } else if let Some(string) = caps.name("string") {
            string.as_str().green().to_string()
        } else if let Some(keyword) = caps.name("keyword") {
            keyword.as_str().magenta().bold().to_string()
        } else {
            caps[0].to_string()
        }
    });
    Ok(highlighted.into_owned())
}
