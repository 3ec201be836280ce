//! Document metadata header.
//!
//! A document may start with `key: value` lines closed by a `---` line:
//!
//! ```text
//! name: Roadmap 2026
//! description: "Q1: platform work"
//! owner: infra
//! ---
//! Platform:
//! - Design, 2026-01, 2026-02: Ann 0.5
//! ```
//!
//! `name` is required. A header without it, or text without a delimiter
//! line, is not a header at all: the whole input is kept as content.
//!
//! # Field order
//! Serialization emits `name`, `gist`, `description`, `createdAt` first,
//! then custom fields in insertion order.
//!
//! # Quoting
//! A value is written in double quotes when it contains `:`, `"` or a line
//! break, or starts or ends with whitespace or `'`. Inside double quotes
//! `\\`, `\"`, `\n` and `\r` are escapes, so every value fits on one line.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Line separating the header from the body.
pub const DELIMITER: &str = "---";

/// Known fields, in serialization order.
const KNOWN_FIELDS: [&str; 4] = ["name", "gist", "description", "createdAt"];

/// Parsed metadata header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    /// Workspace name (required, non-empty).
    pub name: String,
    /// Linked gist identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gist: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Any other fields, in the order first seen.
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

/// Result of splitting a document into header and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    /// The header, if one was present and valid.
    pub frontmatter: Option<Frontmatter>,
    /// The body (or the whole input when there is no valid header).
    pub content: String,
}

impl Frontmatter {
    /// Creates a header with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gist: None,
            description: None,
            created_at: None,
            extra: IndexMap::new(),
        }
    }

    /// Sets the gist id.
    pub fn with_gist(mut self, gist: impl Into<String>) -> Self {
        self.gist = Some(gist.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the creation date.
    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// Sets any field by its header key.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Looks up a field by its header key.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "name" => Some(self.name.as_str()),
            "gist" => self.gist.as_deref(),
            "description" => self.description.as_deref(),
            "createdAt" => self.created_at.as_deref(),
            _ => self.extra.get(key).map(String::as_str),
        }
    }

    /// Sets a field by its header key. Empty optional known fields are
    /// stored as absent.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            "name" => self.name = value,
            "gist" => self.gist = non_empty(value),
            "description" => self.description = non_empty(value),
            "createdAt" => self.created_at = non_empty(value),
            _ => {
                self.extra.insert(key, value);
            }
        }
    }

    /// Fields that serialization would emit, in order.
    fn emitted_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        KNOWN_FIELDS
            .iter()
            .filter_map(|&k| self.get(k).map(|v| (k, v)))
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .filter(|(_, v)| !v.is_empty())
    }
}

/// Splits a document at its first standalone `---` line.
///
/// Returns the input unchanged as content when there is no delimiter or
/// the header has no non-empty `name`.
pub fn parse(text: &str) -> ParsedDocument {
    let Some((header, body)) = split_at_delimiter(text) else {
        return no_header(text);
    };

    match parse_fields(header) {
        Some(frontmatter) => ParsedDocument {
            frontmatter: Some(frontmatter),
            content: body.to_string(),
        },
        None => no_header(text),
    }
}

/// Renders a header followed by `content`.
///
/// Returns `content` alone when the header has nothing to emit.
pub fn serialize(frontmatter: &Frontmatter, content: &str) -> String {
    let lines: Vec<String> = frontmatter
        .emitted_fields()
        .map(|(k, v)| format_line(k, v))
        .collect();

    if lines.is_empty() {
        return content.to_string();
    }
    format!("{}\n{DELIMITER}\n{content}", lines.join("\n"))
}

/// The header name of `text`, if it has a valid header.
pub fn extract_name(text: &str) -> Option<String> {
    parse(text).frontmatter.map(|fm| fm.name)
}

/// Returns `base`, or `base (n)` with the smallest `n >= 1` not in `existing`.
pub fn generate_unique_name<S: AsRef<str>>(base: &str, existing: &[S]) -> String {
    let taken = |candidate: &str| existing.iter().any(|e| e.as_ref() == candidate);
    if !taken(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{base} ({n})"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn no_header(text: &str) -> ParsedDocument {
    ParsedDocument {
        frontmatter: None,
        content: text.to_string(),
    }
}

/// Finds the first line whose trimmed text is the delimiter.
fn split_at_delimiter(text: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim() == DELIMITER {
            return Some((&text[..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_fields(header: &str) -> Option<Frontmatter> {
    let mut fm = Frontmatter::new(String::new());
    for line in header.lines() {
        let Some((key, value)) = line.trim().split_once(':') else {
            continue;
        };
        fm.set(key.trim(), unquote(value.trim()));
    }
    (!fm.name.is_empty()).then_some(fm)
}

fn unquote(value: &str) -> String {
    if value.len() >= 2 {
        if let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
            return unescape(inner);
        }
        if let Some(inner) = value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
            return inner.to_string();
        }
    }
    value.to_string()
}

/// Reverses [`escape`]. Unknown escapes are kept as written.
fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(e @ ('"' | '\\')) => out.push(e),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Whether `value` would not survive an unquoted `key: value` line.
fn needs_quotes(value: &str) -> bool {
    value.contains([':', '"', '\n', '\r'])
        || value.starts_with(|c: char| c == '\'' || c.is_whitespace())
        || value.ends_with(|c: char| c == '\'' || c.is_whitespace())
}

fn format_line(key: &str, value: &str) -> String {
    if needs_quotes(value) {
        format!("{key}: \"{}\"", escape(value))
    } else {
        format!("{key}: {value}")
    }
}
