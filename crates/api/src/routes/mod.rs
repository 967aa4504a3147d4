pub mod archive;
pub mod health;
pub mod prompt;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /prompt                                  current document (GET), replace (PUT)
/// /prompt/reset                            restore defaults (POST)
/// /prompt/randomize                        random document (POST)
/// /prompt/fields/{section}/{field}         single-field edit (PATCH)
/// /prompt/negative                         replace negative terms (PUT)
/// /prompt/profile                          radar profile and token density
/// /prompt/options                          editor choice lists and slider ranges
/// /prompt/export                           download (?format=json|txt)
/// /prompt/sheet                            tab-separated sheet text
/// /prompt/share                            share token (GET), load token (POST)
/// /prompt/generate                         record current in history (POST)
/// /prompt/enhance                          slot status (GET), run (POST)
///
/// /history                                 list
/// /history/{index}/load                    make entry current (POST)
///
/// /library                                 list, save current
/// /library/{index}                         remove (DELETE)
/// /library/{index}/load                    make entry current (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/prompt", prompt::router())
        .nest("/history", archive::history_router())
        .nest("/library", archive::library_router())
}
