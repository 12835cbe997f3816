pub mod health;
pub mod notes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /notes                GET list, POST create
/// /notes/{id}           GET header + items + tracking
/// /notes/{id}/pdf       GET archived document (marks downloaded)
/// /notes/{id}/resend    POST re-send notification
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/notes", notes::router())
}
