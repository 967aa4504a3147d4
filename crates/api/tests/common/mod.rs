//! Shared helpers for the API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tokio::sync::Notify;
use tower::ServiceExt;

use nano_api::config::ServerConfig;
use nano_api::router::build_app_router;
use nano_api::state::AppState;
use nano_core::archive::PromptArchive;
use nano_core::enhance::PromptEnhancer;
use nano_core::prompt::ImagePrompt;
use nano_core::store::MemoryStore;
use nano_core::{CoreError, PromptDocument};

/// Mood preset written by [`StubEnhancer`].
pub const ENHANCED_PRESET: &str = "golden-hour reverie";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        enhance_timeout_secs: 1,
        data_dir: std::env::temp_dir(),
        gemini: None,
    }
}

/// State backed by an in-memory store and the given enhancer.
pub fn test_state_with(enhancer: Option<Arc<dyn PromptEnhancer>>) -> AppState {
    let archive = PromptArchive::new(Arc::new(MemoryStore::new()));
    AppState::new(test_config(), archive, enhancer)
}

/// State with an in-memory store and [`StubEnhancer`].
pub fn test_state() -> AppState {
    test_state_with(Some(Arc::new(StubEnhancer)))
}

/// Build the full application router, with the production middleware stack.
pub fn build_test_app(state: AppState) -> Router {
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Stub enhancers
// ---------------------------------------------------------------------------

/// Rewrites the mood preset and keeps everything else.
pub struct StubEnhancer;

#[async_trait]
impl PromptEnhancer for StubEnhancer {
    async fn enhance(&self, prompt: &ImagePrompt) -> Result<PromptDocument, CoreError> {
        let mut image_prompt = prompt.clone();
        image_prompt.mood.preset = ENHANCED_PRESET.to_string();
        Ok(PromptDocument { image_prompt })
    }
}

/// Always fails the way an unreachable service would.
pub struct FailingEnhancer;

#[async_trait]
impl PromptEnhancer for FailingEnhancer {
    async fn enhance(&self, _prompt: &ImagePrompt) -> Result<PromptDocument, CoreError> {
        Err(CoreError::Transport("Gemini API error (503): overloaded".into()))
    }
}

/// Never answers.
pub struct StalledEnhancer;

#[async_trait]
impl PromptEnhancer for StalledEnhancer {
    async fn enhance(&self, _prompt: &ImagePrompt) -> Result<PromptDocument, CoreError> {
        std::future::pending().await
    }
}

/// Blocks until released, then behaves like [`StubEnhancer`].
pub struct GatedEnhancer {
    pub started: Notify,
    pub release: Notify,
}

impl GatedEnhancer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            started: Notify::new(),
            release: Notify::new(),
        })
    }
}

#[async_trait]
impl PromptEnhancer for GatedEnhancer {
    async fn enhance(&self, prompt: &ImagePrompt) -> Result<PromptDocument, CoreError> {
        self.started.notify_one();
        self.release.notified().await;
        StubEnhancer.enhance(prompt).await
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(json)).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(json)).await
}

pub async fn patch_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(json)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect the body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
