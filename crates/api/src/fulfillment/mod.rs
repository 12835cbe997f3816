//! The note creation workflow.
//!
//! A strictly ordered sequence with early exits and no loops back:
//! validate the request shape, resolve references against the catalog,
//! price, write the three record sets, render, archive, then dispatch a
//! detached notification. Validation failures return before any write.
//! Failures from the header write onward are surfaced as-is with **no
//! compensation**: earlier writes stay in place and the retrieval path
//! tolerates the partial state.

pub mod references;

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use salenote_core::{folio, pricing, request};
use salenote_db::models::{LineItem, Note, NoteTracking};
use salenote_db::repositories::{LineItemRepo, NoteRepo, TrackingRepo};
use salenote_render::{DocumentLine, NoteDocument};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Creation result returned to the caller.
#[derive(Debug, Serialize)]
pub struct CreatedNote {
    pub id: Uuid,
    pub folio: String,
    pub total: f64,
}

/// Run the full creation workflow for one request.
pub async fn create(
    state: &AppState,
    raw: request::CreateNoteRequest,
) -> AppResult<CreatedNote> {
    // -- Validation; no writes have happened yet --
    let request = request::validate(raw)?;
    let bundle = references::resolve(state.catalog.as_ref(), &request).await?;

    // -- Pricing --
    let amounts: Vec<f64> = request
        .items
        .iter()
        .map(|item| pricing::line_amount(item.quantity, item.unit_price))
        .collect();
    let total = pricing::note_total(amounts.iter().copied());

    let now = Utc::now();
    let note_id = Uuid::new_v4();
    let note_folio = folio::generate(now);

    let note = Note {
        id: note_id,
        folio: note_folio.clone(),
        customer_id: request.customer_id.clone(),
        billing_address_id: request.billing_address_id.clone(),
        shipping_address_id: request.shipping_address_id.clone(),
        total,
        created_at: now,
    };

    // -- Persistence: three independent writes, no enclosing transaction.
    // A failure below leaves whatever was already written.
    NoteRepo::create(&state.pool, &note).await?;

    for (item, amount) in request.items.iter().zip(&amounts) {
        let line = LineItem {
            id: Uuid::new_v4(),
            note_id,
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            amount: *amount,
        };
        LineItemRepo::create(&state.pool, &line).await?;
    }

    let tracking = NoteTracking {
        note_id,
        send_count: 1,
        downloaded: false,
        last_sent_at: now,
    };
    TrackingRepo::create(&state.pool, &tracking).await?;

    // -- Render and archive --
    let document = NoteDocument {
        folio: note_folio.clone(),
        issued_at: now,
        customer: bundle.customer.clone(),
        lines: request
            .items
            .iter()
            .zip(&bundle.products)
            .zip(&amounts)
            .map(|((item, product), amount)| DocumentLine {
                quantity: item.quantity,
                product_name: product.name.clone(),
                unit_price: item.unit_price,
                amount: *amount,
            })
            .collect(),
        total,
    };

    let bytes = tokio::task::spawn_blocking(move || salenote_render::render(&document))
        .await
        .map_err(|e| AppError::Internal(format!("Render task failed: {e}")))??;

    state
        .archive
        .store(&bundle.customer.tax_id, &note_folio, bytes, now)
        .await?;

    // -- Detached notification; outcome is logged and dropped --
    dispatch_notification(state, bundle.customer.email.clone(), note_folio.clone(), note_id);

    tracing::info!(note_id = %note_id, folio = %note_folio, total, "Sales note issued");

    Ok(CreatedNote {
        id: note_id,
        folio: note_folio,
        total,
    })
}

/// Fire-and-forget notification dispatch.
///
/// Spawned detached from the request: the response never waits on it and a
/// delivery failure is only ever logged.
pub fn dispatch_notification(state: &AppState, recipient: String, folio: String, note_id: Uuid) {
    let notifier = Arc::clone(&state.notifier);
    tokio::spawn(async move {
        if let Err(e) = notifier.send_issued(&recipient, &folio, note_id).await {
            tracing::warn!(folio = %folio, error = %e, "Notification dispatch failed");
        }
    });
}
