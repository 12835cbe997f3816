//! Line-item model.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `line_items` table.
///
/// `amount` is derived (`quantity * unit_price`) at creation time and never
/// settable independently. Rows are written once per note creation and
/// never mutated or deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LineItem {
    pub id: Uuid,
    pub note_id: Uuid,
    pub product_id: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub amount: f64,
}
