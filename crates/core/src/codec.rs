//! Serialization and transport encodings of a [`PromptDocument`].
//!
//! - JSON text (compact and pretty), the canonical exchange format.
//! - Share tokens: base64 of the compact JSON, percent-encoded for use in a
//!   URL fragment.
//! - A two-row, tab-separated flat table for pasting into spreadsheets.
//! - Export file naming for the download actions.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::prompt::{PromptDocument, WRAPPER_KEY};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Characters escaped in share tokens: everything except the unreserved
/// set `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// File stem used by the export actions.
pub const EXPORT_FILE_STEM: &str = "nano-banana-prompt";

/// Separator between values of a list rendered into one table cell.
const LIST_SEPARATOR: &str = ", ";

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Compact JSON of the full document, wrapper included.
pub fn to_json(doc: &PromptDocument) -> Result<String, CoreError> {
    serde_json::to_string(doc).map_err(|e| CoreError::Internal(format!("JSON encode failed: {e}")))
}

/// Pretty-printed (two-space) JSON of the full document.
pub fn to_json_pretty(doc: &PromptDocument) -> Result<String, CoreError> {
    serde_json::to_string_pretty(doc)
        .map_err(|e| CoreError::Internal(format!("JSON encode failed: {e}")))
}

/// Parse a document from JSON text.
///
/// Fails with [`CoreError::Parse`] when the text is not JSON, is not an
/// object carrying the `image_prompt` key, or holds a field of an
/// incompatible JSON type. Field contents are not otherwise validated.
pub fn from_json(text: &str) -> Result<PromptDocument, CoreError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| CoreError::Parse(format!("Malformed JSON: {e}")))?;
    from_value(value)
}

/// Interpret an already-parsed JSON value as a document.
pub fn from_value(value: Value) -> Result<PromptDocument, CoreError> {
    match value.get(WRAPPER_KEY) {
        Some(Value::Object(_)) => {}
        Some(_) => {
            return Err(CoreError::Parse(format!(
                "'{WRAPPER_KEY}' must be a JSON object"
            )))
        }
        None => {
            return Err(CoreError::Parse(format!(
                "Missing top-level '{WRAPPER_KEY}' key"
            )))
        }
    }
    serde_json::from_value(value).map_err(|e| CoreError::Parse(format!("Invalid prompt: {e}")))
}

// ---------------------------------------------------------------------------
// Share tokens
// ---------------------------------------------------------------------------

/// Encode a document as a URL-fragment-safe token.
pub fn to_share_token(doc: &PromptDocument) -> Result<String, CoreError> {
    let json = to_json(doc)?;
    let encoded = STANDARD.encode(json.as_bytes());
    Ok(utf8_percent_encode(&encoded, URI_COMPONENT).to_string())
}

/// Decode a token produced by [`to_share_token`].
///
/// A leading `#` is ignored. Every failure (bad escapes, bad base64,
/// non-UTF-8 payload, invalid document) is a [`CoreError::Decode`].
pub fn from_share_token(token: &str) -> Result<PromptDocument, CoreError> {
    let token = token.strip_prefix('#').unwrap_or(token);
    if token.is_empty() {
        return Err(CoreError::Decode("Empty share token".into()));
    }

    let unescaped = percent_decode_str(token)
        .decode_utf8()
        .map_err(|e| CoreError::Decode(format!("Invalid percent-encoding: {e}")))?;
    let bytes = STANDARD
        .decode(unescaped.as_bytes())
        .map_err(|e| CoreError::Decode(format!("Invalid base64: {e}")))?;
    let json = String::from_utf8(bytes)
        .map_err(|e| CoreError::Decode(format!("Payload is not UTF-8: {e}")))?;

    from_json(&json).map_err(|e| CoreError::Decode(e.to_string()))
}

// ---------------------------------------------------------------------------
// Flat table
// ---------------------------------------------------------------------------

/// Header and value rows of the spreadsheet export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatTable {
    pub headers: Vec<String>,
    pub values: Vec<String>,
}

impl FlatTable {
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Value cell for a `section_field` key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|h| h == key)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    /// Two tab-separated rows joined by a newline.
    pub fn to_tsv(&self) -> String {
        format!("{}\n{}", self.headers.join("\t"), self.values.join("\t"))
    }
}

/// Render one leaf value as a table cell.
fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(LIST_SEPARATOR),
        other => other.to_string(),
    }
}

/// Flatten the section map into `section_field` columns.
///
/// Only two levels are expanded: sections, then their fields. Lists become
/// one comma-joined cell; anything nested deeper is written as compact JSON.
pub fn to_flat_table(doc: &PromptDocument) -> Result<FlatTable, CoreError> {
    let value = serde_json::to_value(&doc.image_prompt)
        .map_err(|e| CoreError::Internal(format!("JSON encode failed: {e}")))?;
    let Value::Object(sections) = value else {
        return Err(CoreError::Internal("Section map is not an object".into()));
    };

    let mut table = FlatTable {
        headers: Vec::new(),
        values: Vec::new(),
    };
    for (section, body) in &sections {
        match body {
            Value::Object(fields) => {
                for (field, leaf) in fields {
                    table.headers.push(format!("{section}_{field}"));
                    table.values.push(cell(leaf));
                }
            }
            leaf => {
                table.headers.push(section.clone());
                table.values.push(cell(leaf));
            }
        }
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Download formats offered by the export action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Compact JSON on one line.
    Txt,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Txt => "txt",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Txt => "text/plain",
        }
    }

    pub fn file_name(self) -> String {
        format!("{EXPORT_FILE_STEM}.{}", self.extension())
    }

    /// Render the export body.
    pub fn render(self, doc: &PromptDocument) -> Result<String, CoreError> {
        match self {
            Self::Json => to_json_pretty(doc),
            Self::Txt => to_json(doc),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
