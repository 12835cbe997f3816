//! Repository for the `notes` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::note::Note;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, folio, customer_id, billing_address_id, shipping_address_id, total, created_at";

/// Persistence operations for note headers.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a note header. The caller supplies the full row, id and
    /// folio included.
    pub async fn create(pool: &PgPool, note: &Note) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO notes \
                 (id, folio, customer_id, billing_address_id, shipping_address_id, total, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(note.id)
        .bind(&note.folio)
        .bind(&note.customer_id)
        .bind(&note.billing_address_id)
        .bind(&note.shipping_address_id)
        .bind(note.total)
        .bind(note.created_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a note by its internal id.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all notes, most recently created first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes ORDER BY created_at DESC");
        sqlx::query_as::<_, Note>(&query).fetch_all(pool).await
    }
}
