//! Route definitions for saved prompts.
//!
//! ```text
//! HISTORY (/history):
//! GET    /                list_history
//! POST   /{index}/load    load_history_entry
//!
//! LIBRARY (/library):
//! GET    /                list_library
//! POST   /                save_to_library
//! DELETE /{index}         remove_from_library
//! POST   /{index}/load    load_library_entry
//! ```

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::archive;
use crate::state::AppState;

/// History routes, mounted at `/history`.
pub fn history_router() -> Router<AppState> {
    Router::new()
        .route("/", get(archive::list_history))
        .route("/{index}/load", post(archive::load_history_entry))
}

/// Library routes, mounted at `/library`.
pub fn library_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(archive::list_library).post(archive::save_to_library),
        )
        .route("/{index}", delete(archive::remove_from_library))
        .route("/{index}/load", post(archive::load_library_entry))
}
