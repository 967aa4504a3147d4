//! REST client for the Gemini `generateContent` endpoint.
//!
//! Wraps a single model on a single API base URL using [`reqwest`].

use std::time::Duration;

use crate::messages::{GenerateContentRequest, GenerateContentResponse};

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model used for enhancement.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default upper bound on one `generateContent` call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(45);

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client bound to one Gemini model.
pub struct GeminiApi {
    client: reqwest::Client,
    api_url: String,
    model: String,
    api_key: String,
}

/// Errors from the Gemini REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Gemini returned a non-2xx status code.
    #[error("Gemini API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response carried no candidate text.
    #[error("Gemini returned no content (finish reason: {finish_reason})")]
    EmptyResponse { finish_reason: String },
}

impl GeminiApi {
    /// Create a client for `model` at `api_url`, e.g.
    /// `https://generativelanguage.googleapis.com`.
    ///
    /// Every call is abandoned with a timeout error after `timeout`.
    pub fn new(
        api_url: String,
        model: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, GeminiApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_url, model, api_key))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_url: String,
        model: String,
        api_key: String,
    ) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
            api_key,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full URL of the `generateContent` call for this model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url, self.model
        )
    }

    /// Send a `generateContent` request and return the candidate text.
    pub async fn generate_text(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiApiError> {
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await?;

        let parsed: GenerateContentResponse = Self::parse_response(response).await?;
        parsed
            .text()
            .ok_or_else(|| GeminiApiError::EmptyResponse {
                finish_reason: parsed.finish_reason().unwrap_or("unknown").to_string(),
            })
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, or return a
    /// [`GeminiApiError::ApiError`] with the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GeminiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeminiApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GeminiApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

impl std::fmt::Debug for GeminiApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiApi")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
