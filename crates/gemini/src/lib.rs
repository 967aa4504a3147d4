//! Gemini-backed prompt enhancement.
//!
//! Provides the REST client for the `generateContent` endpoint, the
//! request/response wire types, and [`GeminiEnhancer`], the
//! [`nano_core::enhance::PromptEnhancer`] implementation used by the API.

pub mod api;
pub mod enhancer;
pub mod messages;

pub use api::{GeminiApi, GeminiApiError};
pub use enhancer::GeminiEnhancer;
