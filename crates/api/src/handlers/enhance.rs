//! Handlers for AI enhancement of the live prompt.
//!
//! The remote call runs on its own task and finalises the session itself,
//! so a client that disconnects mid-request cannot leave the slot pending.
//! The call is also bounded by `enhance_timeout_secs`; a stalled service
//! fails like any other upstream error.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tokio::sync::Mutex;

use nano_core::enhance::{EnhanceStatus, PromptEnhancer};
use nano_core::{CoreError, PromptSession};

use crate::error::{AppError, AppResult};
use crate::handlers::prompt::PromptSnapshot;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EnhanceStatusView {
    pub enabled: bool,
    pub status: EnhanceStatus,
}

// ---------------------------------------------------------------------------
// GET /prompt/enhance
// ---------------------------------------------------------------------------

pub async fn enhance_status(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let status = state.session.lock().await.enhance_status();
    Ok(Json(DataResponse {
        data: EnhanceStatusView {
            enabled: state.enhancer.is_some(),
            status,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /prompt/enhance
// ---------------------------------------------------------------------------

/// Send the current section map to the enhancement service and apply the
/// result.
///
/// Returns 409 while another enhancement is pending, 502 when the service
/// fails or times out (the document is left unchanged) and 503 when no
/// service is configured.
pub async fn enhance_prompt(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let enhancer = state.enhancer.clone().ok_or_else(|| {
        AppError::Unavailable("Enhancement is not configured; set GEMINI_API_KEY".to_string())
    })?;

    let sent = state.session.lock().await.begin_enhancement()?;
    let limit = Duration::from_secs(state.config.enhance_timeout_secs);
    let task = tokio::spawn(run_enhancement(
        state.session.clone(),
        enhancer,
        sent,
        limit,
    ));

    let snapshot = task
        .await
        .map_err(|e| AppError::InternalError(format!("Enhancement task failed: {e}")))??;
    Ok(Json(DataResponse { data: snapshot }))
}

/// Call the service and settle the session's enhancement slot.
async fn run_enhancement(
    session: Arc<Mutex<PromptSession>>,
    enhancer: Arc<dyn PromptEnhancer>,
    sent: nano_core::ImagePrompt,
    limit: Duration,
) -> Result<PromptSnapshot, CoreError> {
    let call = tokio::spawn(async move {
        match tokio::time::timeout(limit, enhancer.enhance(&sent)).await {
            Ok(result) => result,
            Err(_) => Err(CoreError::Transport(format!(
                "Enhancement timed out after {}s",
                limit.as_secs()
            ))),
        }
    });
    let outcome = call.await;

    let mut session = session.lock().await;
    match outcome {
        Ok(result) => {
            session.finish_enhancement(result).map(|_| ())?;
            Ok(PromptSnapshot::of(&session))
        }
        Err(e) => {
            session.abandon_enhancement();
            Err(CoreError::Internal(format!("Enhancement call aborted: {e}")))
        }
    }
}
