//! Repository for the `line_items` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::line_item::LineItem;

const COLUMNS: &str = "id, note_id, product_id, quantity, unit_price, amount";

/// Persistence operations for note line items.
pub struct LineItemRepo;

impl LineItemRepo {
    /// Insert one line item. The creation path calls this once per line,
    /// sequentially, in request order.
    pub async fn create(pool: &PgPool, item: &LineItem) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO line_items (id, note_id, product_id, quantity, unit_price, amount) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(item.id)
        .bind(item.note_id)
        .bind(&item.product_id)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(item.amount)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// All line items belonging to a note. Returns an empty vector for a
    /// note with no items (possible when a creation faulted partway).
    pub async fn list_for_note(pool: &PgPool, note_id: Uuid) -> Result<Vec<LineItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM line_items WHERE note_id = $1");
        sqlx::query_as::<_, LineItem>(&query)
            .bind(note_id)
            .fetch_all(pool)
            .await
    }
}
