//! Handlers for the `/notes` resource.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use salenote_catalog::Catalog;
use salenote_core::error::CoreError;
use salenote_core::request::CreateNoteRequest;
use salenote_db::models::Note;
use salenote_db::repositories::{LineItemRepo, NoteRepo, TrackingRepo};

use crate::error::{AppError, AppResult};
use crate::fulfillment;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a note or fail with the classified not-found error.
async fn ensure_note_exists(pool: &sqlx::PgPool, id: Uuid) -> AppResult<Note> {
    NoteRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Note",
            id: id.to_string(),
        })
    })
}

// ---------------------------------------------------------------------------
// POST /notes
// ---------------------------------------------------------------------------

/// Issue a new sales note: validate, price, persist, render, archive, and
/// notify the customer.
pub async fn create_note(
    State(state): State<AppState>,
    Json(raw): Json<CreateNoteRequest>,
) -> AppResult<impl IntoResponse> {
    let created = fulfillment::create(&state, raw).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /notes
// ---------------------------------------------------------------------------

/// List all notes, most recently created first.
pub async fn list_notes(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let notes = NoteRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: notes }))
}

// ---------------------------------------------------------------------------
// GET /notes/{id}
// ---------------------------------------------------------------------------

/// Return a note's header, line items, and tracking metadata.
///
/// A note written by a creation that faulted partway still resolves: the
/// item list may be empty and the tracking block `null`.
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let note = ensure_note_exists(&state.pool, id).await?;
    let line_items = LineItemRepo::list_for_note(&state.pool, id).await?;
    let tracking = TrackingRepo::find_by_note(&state.pool, id).await?;

    Ok(Json(serde_json::json!({
        "data": {
            "note": note,
            "line_items": line_items,
            "tracking": tracking,
        }
    })))
}

// ---------------------------------------------------------------------------
// GET /notes/{id}/pdf
// ---------------------------------------------------------------------------

/// Stream the archived document back to the caller.
///
/// Marks the note as downloaded in both stores afterwards: first the
/// object-store metadata, then the record-store flag. The two updates are
/// independent and not atomic.
pub async fn download_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let note = ensure_note_exists(&state.pool, id).await?;

    let customer = state
        .catalog
        .customer(&note.customer_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Customer",
                id: note.customer_id.clone(),
            })
        })?;

    let bytes = state.archive.fetch(&customer.tax_id, &note.folio).await?;

    state
        .archive
        .mark_downloaded(&customer.tax_id, &note.folio)
        .await?;
    TrackingRepo::mark_downloaded(&state.pool, id).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}.pdf\"", note.folio),
        ),
    ];
    Ok((headers, bytes))
}

// ---------------------------------------------------------------------------
// POST /notes/{id}/resend
// ---------------------------------------------------------------------------

/// Re-send the issued-note notification.
///
/// Bumps the send counter on the archived object and in the record store
/// (two independent calls), then dispatches the notification detached.
pub async fn resend_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let note = ensure_note_exists(&state.pool, id).await?;

    let customer = state
        .catalog
        .customer(&note.customer_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Customer",
                id: note.customer_id.clone(),
            })
        })?;

    let send_count = state
        .archive
        .increment_send_count(&customer.tax_id, &note.folio, Utc::now())
        .await?;
    TrackingRepo::increment_send_count(&state.pool, id).await?;

    fulfillment::dispatch_notification(&state, customer.email.clone(), note.folio.clone(), id);

    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({
            "data": {
                "folio": note.folio,
                "send_count": send_count,
            }
        })),
    ))
}
