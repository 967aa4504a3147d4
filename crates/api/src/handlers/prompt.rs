//! Handlers for the live prompt document.
//!
//! Every mutating handler swaps a new document into the session and returns
//! the resulting [`PromptSnapshot`].

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use nano_core::codec::{self, ExportFormat};
use nano_core::options::editor_options;
use nano_core::patch::{join_negative_terms, parse_negative_terms};
use nano_core::profile::{compute_profile, token_density, ProfileAxis, PromptProfile, TokenDensity};
use nano_core::{FieldEdit, PromptDocument, PromptSession};

use crate::error::{AppError, AppResult};
use crate::handlers::archive::with_archive;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// The current document together with its version counter.
#[derive(Debug, Serialize)]
pub struct PromptSnapshot {
    pub version: u64,
    pub prompt: PromptDocument,
}

impl PromptSnapshot {
    pub fn of(session: &PromptSession) -> Self {
        Self {
            version: session.version(),
            prompt: session.document().clone(),
        }
    }
}

fn snapshot(session: &PromptSession) -> Json<DataResponse<PromptSnapshot>> {
    Json(DataResponse {
        data: PromptSnapshot::of(session),
    })
}

/// Body for `PATCH /prompt/fields/{section}/{field}`.
#[derive(Debug, Deserialize)]
pub struct FieldInput {
    pub value: Value,
}

/// Body for `PUT /prompt/negative`. `terms` wins when both are given.
#[derive(Debug, Deserialize)]
pub struct NegativeInput {
    pub terms: Option<Vec<String>>,
    /// Comma-separated terms, as typed into a single text box.
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub profile: PromptProfile,
    pub axes: [ProfileAxis; 5],
    pub tokens: TokenDensity,
}

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    #[serde(default)]
    pub format: ExportFormat,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShareToken {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ShareLoadResult {
    /// `false` when the token was malformed and the document was kept.
    pub loaded: bool,
    #[serde(flatten)]
    pub snapshot: PromptSnapshot,
}

// ---------------------------------------------------------------------------
// GET /prompt, PUT /prompt
// ---------------------------------------------------------------------------

pub async fn get_prompt(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let session = state.session.lock().await;
    Ok(snapshot(&session))
}

/// Replace the whole document. The body must carry the `image_prompt`
/// wrapper; missing fields take their defaults.
pub async fn replace_prompt(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let doc = codec::from_value(body)?;
    let mut session = state.session.lock().await;
    session.replace(doc);
    tracing::info!(version = session.version(), "Prompt replaced");
    Ok(snapshot(&session))
}

// ---------------------------------------------------------------------------
// POST /prompt/reset, POST /prompt/randomize
// ---------------------------------------------------------------------------

pub async fn reset_prompt(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    session.reset();
    tracing::info!(version = session.version(), "Prompt reset to defaults");
    Ok(snapshot(&session))
}

pub async fn randomize_prompt(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    session.randomize();
    tracing::info!(version = session.version(), "Prompt randomized");
    Ok(snapshot(&session))
}

// ---------------------------------------------------------------------------
// PATCH /prompt/fields/{section}/{field}
// ---------------------------------------------------------------------------

/// Set one field. Integer values are clamped to the field's slider range.
pub async fn edit_field(
    State(state): State<AppState>,
    Path((section, field)): Path<(String, String)>,
    Json(input): Json<FieldInput>,
) -> AppResult<impl IntoResponse> {
    let edit = FieldEdit::from_path(&section, &field, input.value)?.clamped();
    let mut session = state.session.lock().await;
    session.apply_edit(edit);
    Ok(snapshot(&session))
}

// ---------------------------------------------------------------------------
// PUT /prompt/negative
// ---------------------------------------------------------------------------

pub async fn set_negative(
    State(state): State<AppState>,
    Json(input): Json<NegativeInput>,
) -> AppResult<impl IntoResponse> {
    let terms = match (input.terms, input.text) {
        (Some(terms), _) => terms,
        (None, Some(text)) => parse_negative_terms(&text),
        (None, None) => {
            return Err(AppError::BadRequest(
                "Provide either `terms` or `text`".to_string(),
            ))
        }
    };
    let mut session = state.session.lock().await;
    session.set_negative_terms(terms);
    tracing::debug!(
        terms = %join_negative_terms(&session.document().image_prompt.negative_prompt),
        "Negative prompt updated"
    );
    Ok(snapshot(&session))
}

// ---------------------------------------------------------------------------
// GET /prompt/profile
// ---------------------------------------------------------------------------

pub async fn get_profile(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let session = state.session.lock().await;
    let doc = session.document();
    let profile = compute_profile(doc);
    Ok(Json(DataResponse {
        data: ProfileView {
            profile,
            axes: profile.axes(),
            tokens: token_density(doc),
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /prompt/options
// ---------------------------------------------------------------------------

/// Choice lists and slider ranges for building an editor.
pub async fn get_options() -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: editor_options(),
    }))
}

// ---------------------------------------------------------------------------
// GET /prompt/export, GET /prompt/sheet
// ---------------------------------------------------------------------------

/// Download the document as `nano-banana-prompt.json` (pretty) or `.txt`
/// (compact).
pub async fn export_prompt(
    State(state): State<AppState>,
    Query(params): Query<ExportParams>,
) -> AppResult<impl IntoResponse> {
    let format = params.format;
    let body = {
        let session = state.session.lock().await;
        format.render(session.document())?
    };
    tracing::info!(file = %format.file_name(), bytes = body.len(), "Prompt exported");
    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, format.content_type().to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            ),
        ],
        body,
    ))
}

/// Header row and value row, tab-separated, ready to paste into a sheet.
pub async fn get_sheet(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let table = {
        let session = state.session.lock().await;
        codec::to_flat_table(session.document())?
    };
    Ok((
        [(CONTENT_TYPE, "text/tab-separated-values; charset=utf-8")],
        table.to_tsv(),
    ))
}

// ---------------------------------------------------------------------------
// GET /prompt/share, POST /prompt/share
// ---------------------------------------------------------------------------

pub async fn get_share_token(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let session = state.session.lock().await;
    let token = codec::to_share_token(session.document())?;
    Ok(Json(DataResponse {
        data: ShareToken { token },
    }))
}

/// Load a share token (a leading `#` is accepted). A malformed token is not
/// an error: the current document is kept and `loaded` is `false`.
pub async fn load_share_token(
    State(state): State<AppState>,
    Json(input): Json<ShareToken>,
) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    let loaded = session.load_share_fragment(&input.token);
    Ok(Json(DataResponse {
        data: ShareLoadResult {
            loaded,
            snapshot: PromptSnapshot::of(&session),
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /prompt/generate
// ---------------------------------------------------------------------------

/// Record the current document at the head of the history.
pub async fn generate(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let doc = state.session.lock().await.document().clone();
    let history = with_archive(&state.archive, move |a| a.record_history(&doc)).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: history })))
}
