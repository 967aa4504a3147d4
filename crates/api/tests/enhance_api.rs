//! HTTP-level integration tests for AI enhancement.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, post, GatedEnhancer, ENHANCED_PRESET};
use nano_core::enhance::PromptEnhancer;

#[tokio::test]
async fn enhancement_applies_service_result() {
    let app = common::build_test_app(common::test_state());
    let response = post(app.clone(), "/api/v1/prompt/enhance").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["prompt"]["image_prompt"]["mood"]["preset"], ENHANCED_PRESET);
    assert_eq!(json["data"]["version"], 1);

    let json = body_json(get(app, "/api/v1/prompt/enhance").await).await;
    assert_eq!(json["data"]["status"], "idle");
    assert_eq!(json["data"]["enabled"], true);
}

#[tokio::test]
async fn failed_enhancement_returns_502_and_keeps_document() {
    let app = common::build_test_app(common::test_state_with(Some(Arc::new(
        common::FailingEnhancer,
    ))));
    let response = post(app.clone(), "/api/v1/prompt/enhance").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert!(json["error"].as_str().unwrap().contains("503"));

    let json = body_json(get(app.clone(), "/api/v1/prompt").await).await;
    assert_eq!(json["data"]["version"], 0);

    // Slot is free again: a retry reaches the service (and fails the same way).
    let response = post(app, "/api/v1/prompt/enhance").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn enhancement_without_service_returns_503() {
    let app = common::build_test_app(common::test_state_with(None));
    let response = post(app.clone(), "/api/v1/prompt/enhance").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(get(app, "/api/v1/prompt/enhance").await).await;
    assert_eq!(json["data"]["enabled"], false);
}

#[tokio::test]
async fn second_request_while_pending_returns_409() {
    let gate = GatedEnhancer::new();
    let enhancer: Arc<dyn PromptEnhancer> = gate.clone();
    let app = common::build_test_app(common::test_state_with(Some(enhancer)));

    let first = tokio::spawn(post(app.clone(), "/api/v1/prompt/enhance"));
    gate.started.notified().await;

    let json = body_json(get(app.clone(), "/api/v1/prompt/enhance").await).await;
    assert_eq!(json["data"]["status"], "pending");

    let response = post(app.clone(), "/api/v1/prompt/enhance").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    gate.release.notify_one();
    let response = first.await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app, "/api/v1/prompt/enhance").await).await;
    assert_eq!(json["data"]["status"], "idle");
}

#[tokio::test]
async fn edits_made_while_pending_are_overwritten() {
    let gate = GatedEnhancer::new();
    let enhancer: Arc<dyn PromptEnhancer> = gate.clone();
    let app = common::build_test_app(common::test_state_with(Some(enhancer)));

    let first = tokio::spawn(post(app.clone(), "/api/v1/prompt/enhance"));
    gate.started.notified().await;

    common::patch_json(
        app.clone(),
        "/api/v1/prompt/fields/camera/lens",
        serde_json::json!({"value": "85mm"}),
    )
    .await;

    gate.release.notify_one();
    first.await.unwrap();

    let json = body_json(get(app, "/api/v1/prompt").await).await;
    let prompt = &json["data"]["prompt"]["image_prompt"];
    assert_eq!(prompt["mood"]["preset"], ENHANCED_PRESET);
    assert_eq!(prompt["camera"]["lens"], "50mm");
}

#[tokio::test]
async fn stalled_service_times_out_and_frees_slot() {
    let app = common::build_test_app(common::test_state_with(Some(Arc::new(
        common::StalledEnhancer,
    ))));

    let response = post(app.clone(), "/api/v1/prompt/enhance").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert!(json["error"].as_str().unwrap().contains("timed out"));

    let json = body_json(get(app.clone(), "/api/v1/prompt/enhance").await).await;
    assert_eq!(json["data"]["status"], "idle");
    let json = body_json(get(app.clone(), "/api/v1/prompt").await).await;
    assert_eq!(json["data"]["version"], 0);

    // A retry reaches the service again instead of getting 409.
    let response = post(app, "/api/v1/prompt/enhance").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
