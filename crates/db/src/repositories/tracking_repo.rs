//! Repository for the `note_tracking` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::tracking::NoteTracking;

const COLUMNS: &str = "note_id, send_count, downloaded, last_sent_at";

/// Persistence operations for per-note tracking metadata.
pub struct TrackingRepo;

impl TrackingRepo {
    /// Insert the tracking row created alongside a note
    /// (send count 1, not yet downloaded).
    pub async fn create(pool: &PgPool, tracking: &NoteTracking) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO note_tracking (note_id, send_count, downloaded, last_sent_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(tracking.note_id)
        .bind(tracking.send_count)
        .bind(tracking.downloaded)
        .bind(tracking.last_sent_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Tracking metadata for a note, if any was ever written.
    pub async fn find_by_note(
        pool: &PgPool,
        note_id: Uuid,
    ) -> Result<Option<NoteTracking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM note_tracking WHERE note_id = $1");
        sqlx::query_as::<_, NoteTracking>(&query)
            .bind(note_id)
            .fetch_optional(pool)
            .await
    }

    /// Set the downloaded flag. Idempotent: a second call leaves the flag
    /// `true` without error. Upserts so a note whose tracking row was never
    /// written still records the download.
    pub async fn mark_downloaded(pool: &PgPool, note_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO note_tracking (note_id, downloaded, last_sent_at) \
             VALUES ($1, TRUE, NOW()) \
             ON CONFLICT (note_id) DO UPDATE SET downloaded = TRUE",
        )
        .bind(note_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Bump the send counter and refresh the last-send timestamp in one
    /// statement. Returns `false` if the note has no tracking row.
    pub async fn increment_send_count(pool: &PgPool, note_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE note_tracking \
             SET send_count = send_count + 1, last_sent_at = NOW() \
             WHERE note_id = $1",
        )
        .bind(note_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
