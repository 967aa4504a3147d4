//! [`PromptEnhancer`] backed by Gemini.

use async_trait::async_trait;

use nano_core::codec;
use nano_core::enhance::PromptEnhancer;
use nano_core::prompt::{ImagePrompt, PromptDocument};
use nano_core::CoreError;

use crate::api::{GeminiApi, GeminiApiError};
use crate::messages::GenerateContentRequest;

impl From<GeminiApiError> for CoreError {
    fn from(err: GeminiApiError) -> Self {
        CoreError::Transport(err.to_string())
    }
}

#[derive(Debug)]
pub struct GeminiEnhancer {
    api: GeminiApi,
}

impl GeminiEnhancer {
    pub fn new(api: GeminiApi) -> Self {
        Self { api }
    }
}

/// Build the request for one section map.
pub fn build_request(prompt: &ImagePrompt) -> Result<GenerateContentRequest, CoreError> {
    let current = serde_json::to_string(prompt)
        .map_err(|e| CoreError::Internal(format!("JSON encode failed: {e}")))?;
    Ok(GenerateContentRequest::enhance(&current))
}

/// Parse the model's reply as a wrapped document.
///
/// Any parse or shape failure is reported as [`CoreError::Transport`] so the
/// caller sees one failure kind for the whole remote call.
pub fn parse_enhanced(text: &str) -> Result<PromptDocument, CoreError> {
    codec::from_json(text.trim()).map_err(|e| {
        CoreError::Transport(format!("Enhancement response was not a prompt document: {e}"))
    })
}

#[async_trait]
impl PromptEnhancer for GeminiEnhancer {
    async fn enhance(&self, prompt: &ImagePrompt) -> Result<PromptDocument, CoreError> {
        let request = build_request(prompt)?;
        tracing::info!(model = self.api.model(), "Requesting prompt enhancement");
        let text = self.api.generate_text(&request).await?;
        tracing::debug!(bytes = text.len(), "Enhancement response received");
        parse_enhanced(&text)
    }
}
