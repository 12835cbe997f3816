//! Route definitions for the `/notes` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Routes mounted at `/notes`.
///
/// ```text
/// GET    /              -> list_notes
/// POST   /              -> create_note
/// GET    /{id}          -> get_note
/// GET    /{id}/pdf      -> download_note
/// POST   /{id}/resend   -> resend_note
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notes::list_notes).post(notes::create_note))
        .route("/{id}", get(notes::get_note))
        .route("/{id}/pdf", get(notes::download_note))
        .route("/{id}/resend", post(notes::resend_note))
}
