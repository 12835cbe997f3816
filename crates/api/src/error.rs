use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use salenote_archive::ArchiveError;
use salenote_catalog::CatalogError;
use salenote_core::error::CoreError;
use salenote_render::RenderError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for classified domain errors and adds variants for
/// the infrastructure layers. Implements [`IntoResponse`] to produce
/// consistent `{ "error", "code" }` JSON error responses.
///
/// Validation-stage errors keep their detail; anything that can only occur
/// after the first write responds with a sanitized internal-error body so
/// callers see "try again later" rather than infrastructure detail.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A classified domain error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A catalog lookup failed at the transport or protocol level.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An archive operation failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Document rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::BadRequest(msg) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
                }
                CoreError::ReferenceNotFound { .. } => (
                    StatusCode::NOT_FOUND,
                    "REFERENCE_NOT_FOUND",
                    core.to_string(),
                ),
                CoreError::ReferenceConflict(msg) => {
                    (StatusCode::CONFLICT, "CONFLICT", msg.clone())
                }
                CoreError::Communication(msg) => {
                    tracing::error!(error = %msg, "Upstream communication failure");
                    (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_ERROR",
                        "A dependent service is unavailable".to_string(),
                    )
                }
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
            },

            // --- Catalog transport failures ---
            AppError::Catalog(err) => {
                tracing::error!(error = %err, "Catalog request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "A dependent service is unavailable".to_string(),
                )
            }

            // --- Archive ---
            // A missing object is its own retrievable condition: the note
            // exists but its archival step never completed.
            AppError::Archive(ArchiveError::NotFound { key }) => {
                tracing::warn!(key = %key, "Archived document missing");
                (
                    StatusCode::NOT_FOUND,
                    "ARTIFACT_MISSING",
                    "The archived document for this note is missing".to_string(),
                )
            }
            AppError::Archive(err) => {
                tracing::error!(error = %err, "Archive operation failed");
                internal_error()
            }

            // --- Everything else is a sanitized 500 ---
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal_error()
            }
            AppError::Render(err) => {
                tracing::error!(error = %err, "Document rendering failed");
                internal_error()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred, please try again later".to_string(),
    )
}
