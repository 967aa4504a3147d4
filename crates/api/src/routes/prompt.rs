//! Route definitions for the live prompt, mounted at `/prompt`.
//!
//! ```text
//! GET    /                          get_prompt
//! PUT    /                          replace_prompt
//! POST   /reset                     reset_prompt
//! POST   /randomize                 randomize_prompt
//! PATCH  /fields/{section}/{field}  edit_field
//! PUT    /negative                  set_negative
//! GET    /profile                   get_profile
//! GET    /options                   get_options
//! GET    /export                    export_prompt
//! GET    /sheet                     get_sheet
//! GET    /share                     get_share_token
//! POST   /share                     load_share_token
//! POST   /generate                  generate
//! GET    /enhance                   enhance_status
//! POST   /enhance                   enhance_prompt
//! ```

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::{enhance, prompt};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(prompt::get_prompt).put(prompt::replace_prompt))
        .route("/reset", post(prompt::reset_prompt))
        .route("/randomize", post(prompt::randomize_prompt))
        .route("/fields/{section}/{field}", patch(prompt::edit_field))
        .route("/negative", put(prompt::set_negative))
        .route("/profile", get(prompt::get_profile))
        .route("/options", get(prompt::get_options))
        .route("/export", get(prompt::export_prompt))
        .route("/sheet", get(prompt::get_sheet))
        .route(
            "/share",
            get(prompt::get_share_token).post(prompt::load_share_token),
        )
        .route("/generate", post(prompt::generate))
        .route(
            "/enhance",
            get(enhance::enhance_status).post(enhance::enhance_prompt),
        )
}
