//! Per-note tracking metadata model.

use salenote_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `note_tracking` table, one-to-one with a note.
///
/// The same counters are mirrored as side-channel metadata on the archived
/// object. This row is the source of truth for application logic; the
/// object metadata is a best-effort operational mirror, and the two are
/// updated by independent calls with no cross-store atomicity.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NoteTracking {
    pub note_id: Uuid,
    pub send_count: i32,
    pub downloaded: bool,
    pub last_sent_at: Timestamp,
}
