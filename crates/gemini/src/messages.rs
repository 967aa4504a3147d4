//! Wire types for the Gemini `generateContent` endpoint.
//!
//! Only the subset of the request and response the enhancer uses is
//! modelled. Unknown response fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use nano_core::prompt::{SectionName, WRAPPER_KEY};

/// Instruction placed ahead of the current section map.
pub const ENHANCE_INSTRUCTION: &str = "Analyze this image generation prompt JSON and enhance it creatively. \
Fill in any generic fields with high-quality, artistic details suitable for a pro-grade image generator. \
Keep the structure EXACTLY the same.";

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: &'static str,
    pub response_json_schema: Value,
}

impl GenerateContentRequest {
    /// Build an enhancement request around the compact JSON of the
    /// current section map.
    pub fn enhance(current_json: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(format!("{ENHANCE_INSTRUCTION}\nCurrent JSON: {current_json}")),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_json_schema: document_schema(),
            },
        }
    }
}

/// JSON schema for a wrapped prompt document.
///
/// Sections are open objects so the service may add keys; the negative
/// prompt is a list of strings.
pub fn document_schema() -> Value {
    let mut sections = serde_json::Map::new();
    for section in SectionName::ALL {
        sections.insert(
            section.as_str().to_string(),
            json!({ "type": "object", "additionalProperties": true }),
        );
    }
    sections.insert(
        "negative_prompt".to_string(),
        json!({ "type": "array", "items": { "type": "string" } }),
    );

    json!({
        "type": "object",
        "properties": {
            WRAPPER_KEY: { "type": "object", "properties": sections }
        },
        "required": [WRAPPER_KEY]
    })
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
