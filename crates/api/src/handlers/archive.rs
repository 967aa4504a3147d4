//! Handlers for the prompt history and library.
//!
//! Archive calls hit the byte store synchronously, so they run on the
//! blocking pool.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use nano_core::archive::PromptArchive;
use nano_core::CoreError;

use crate::error::{AppError, AppResult};
use crate::handlers::prompt::PromptSnapshot;
use crate::response::DataResponse;
use crate::state::AppState;

/// Run an archive operation on the blocking pool.
pub(crate) async fn with_archive<T, F>(archive: &PromptArchive, op: F) -> AppResult<T>
where
    F: FnOnce(&PromptArchive) -> Result<T, CoreError> + Send + 'static,
    T: Send + 'static,
{
    let archive = archive.clone();
    tokio::task::spawn_blocking(move || op(&archive))
        .await
        .map_err(|e| AppError::InternalError(format!("Archive task failed: {e}")))?
        .map_err(AppError::from)
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

pub async fn list_history(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = with_archive(&state.archive, |a| Ok(a.history())).await?;
    tracing::debug!(count = items.len(), "Listed history");
    Ok(Json(DataResponse { data: items }))
}

/// Make a history entry the current document.
pub async fn load_history_entry(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> AppResult<impl IntoResponse> {
    let doc = with_archive(&state.archive, move |a| a.history_entry(index)).await?;
    let mut session = state.session.lock().await;
    session.replace(doc);
    tracing::info!(index, version = session.version(), "Loaded prompt from history");
    Ok(Json(DataResponse {
        data: PromptSnapshot::of(&session),
    }))
}

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

pub async fn list_library(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = with_archive(&state.archive, |a| Ok(a.library())).await?;
    tracing::debug!(count = items.len(), "Listed library");
    Ok(Json(DataResponse { data: items }))
}

/// Save the current document at the head of the library.
pub async fn save_to_library(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let doc = state.session.lock().await.document().clone();
    let items = with_archive(&state.archive, move |a| a.save_to_library(&doc)).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: items })))
}

pub async fn remove_from_library(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> AppResult<impl IntoResponse> {
    let items = with_archive(&state.archive, move |a| a.remove_from_library(index)).await?;
    Ok(Json(DataResponse { data: items }))
}

/// Make a library entry the current document.
pub async fn load_library_entry(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> AppResult<impl IntoResponse> {
    let doc = with_archive(&state.archive, move |a| a.library_entry(index)).await?;
    let mut session = state.session.lock().await;
    session.replace(doc);
    tracing::info!(index, version = session.version(), "Loaded prompt from library");
    Ok(Json(DataResponse {
        data: PromptSnapshot::of(&session),
    }))
}
