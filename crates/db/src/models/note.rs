//! Sales-note header model.

use salenote_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `notes` table.
///
/// Immutable after creation; mutable per-note state lives in
/// [`crate::models::NoteTracking`]. The total is computed once at creation
/// from the line items and never recomputed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Note {
    pub id: Uuid,
    pub folio: String,
    pub customer_id: String,
    pub billing_address_id: String,
    pub shipping_address_id: String,
    pub total: f64,
    pub created_at: Timestamp,
}
