//! Integration tests for the three sales-note record sets.
//!
//! Exercises the repository layer against a real database:
//! - header / line-item / tracking round trips
//! - the partially-written state a faulted creation can leave behind
//! - idempotent download flagging and send-count increments

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use salenote_db::models::{LineItem, Note, NoteTracking};
use salenote_db::repositories::{LineItemRepo, NoteRepo, TrackingRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_note(folio: &str) -> Note {
    Note {
        id: Uuid::new_v4(),
        folio: folio.to_string(),
        customer_id: "cust-1".to_string(),
        billing_address_id: "addr-b".to_string(),
        shipping_address_id: "addr-s".to_string(),
        total: 25.0,
        created_at: Utc::now(),
    }
}

fn new_line_item(note_id: Uuid, product_id: &str, quantity: i32, unit_price: f64) -> LineItem {
    LineItem {
        id: Uuid::new_v4(),
        note_id,
        product_id: product_id.to_string(),
        quantity,
        unit_price,
        amount: f64::from(quantity) * unit_price,
    }
}

fn new_tracking(note_id: Uuid) -> NoteTracking {
    NoteTracking {
        note_id,
        send_count: 1,
        downloaded: false,
        last_sent_at: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Test: header round trip and listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_note_round_trip(pool: PgPool) {
    let note = new_note("NV-1700000000001");
    NoteRepo::create(&pool, &note).await.unwrap();

    let found = NoteRepo::find_by_id(&pool, note.id)
        .await
        .unwrap()
        .expect("note should exist");
    assert_eq!(found.folio, "NV-1700000000001");
    assert_eq!(found.customer_id, "cust-1");
    assert_eq!(found.total, 25.0);

    let all = NoteRepo::list_all(&pool).await.unwrap();
    assert!(all.iter().any(|n| n.id == note.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_unknown_note_returns_none(pool: PgPool) {
    let found = NoteRepo::find_by_id(&pool, Uuid::new_v4()).await.unwrap();
    assert!(found.is_none());
}

// ---------------------------------------------------------------------------
// Test: line items are filtered by owning note
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_line_items_filtered_by_note(pool: PgPool) {
    let note_a = new_note("NV-1");
    let note_b = new_note("NV-2");
    NoteRepo::create(&pool, &note_a).await.unwrap();
    NoteRepo::create(&pool, &note_b).await.unwrap();

    LineItemRepo::create(&pool, &new_line_item(note_a.id, "prod-1", 2, 10.0))
        .await
        .unwrap();
    LineItemRepo::create(&pool, &new_line_item(note_a.id, "prod-2", 1, 5.0))
        .await
        .unwrap();
    LineItemRepo::create(&pool, &new_line_item(note_b.id, "prod-3", 4, 1.0))
        .await
        .unwrap();

    let items = LineItemRepo::list_for_note(&pool, note_a.id).await.unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.note_id == note_a.id));
    assert!(items.iter().all(|i| i.amount == f64::from(i.quantity) * i.unit_price));
}

// ---------------------------------------------------------------------------
// Test: a faulted creation leaves a readable partial state
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_header_without_items_reads_back_empty(pool: PgPool) {
    // A creation that faulted after the header write leaves exactly this.
    let note = new_note("NV-3");
    NoteRepo::create(&pool, &note).await.unwrap();

    let items = LineItemRepo::list_for_note(&pool, note.id).await.unwrap();
    assert!(items.is_empty());

    let tracking = TrackingRepo::find_by_note(&pool, note.id).await.unwrap();
    assert!(tracking.is_none());
}

// ---------------------------------------------------------------------------
// Test: tracking mutations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_downloaded_is_idempotent(pool: PgPool) {
    let note = new_note("NV-4");
    NoteRepo::create(&pool, &note).await.unwrap();
    TrackingRepo::create(&pool, &new_tracking(note.id)).await.unwrap();

    TrackingRepo::mark_downloaded(&pool, note.id).await.unwrap();
    TrackingRepo::mark_downloaded(&pool, note.id).await.unwrap();

    let tracking = TrackingRepo::find_by_note(&pool, note.id)
        .await
        .unwrap()
        .expect("tracking should exist");
    assert!(tracking.downloaded);
    assert_eq!(tracking.send_count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_downloaded_upserts_missing_tracking(pool: PgPool) {
    // Header written, tracking write never happened.
    let note = new_note("NV-5");
    NoteRepo::create(&pool, &note).await.unwrap();

    TrackingRepo::mark_downloaded(&pool, note.id).await.unwrap();

    let tracking = TrackingRepo::find_by_note(&pool, note.id)
        .await
        .unwrap()
        .expect("download should have created the row");
    assert!(tracking.downloaded);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_increment_send_count(pool: PgPool) {
    let note = new_note("NV-6");
    NoteRepo::create(&pool, &note).await.unwrap();
    let initial = new_tracking(note.id);
    TrackingRepo::create(&pool, &initial).await.unwrap();

    let bumped = TrackingRepo::increment_send_count(&pool, note.id).await.unwrap();
    assert!(bumped);

    let tracking = TrackingRepo::find_by_note(&pool, note.id)
        .await
        .unwrap()
        .expect("tracking should exist");
    assert_eq!(tracking.send_count, 2);
    assert!(tracking.last_sent_at >= initial.last_sent_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_increment_send_count_without_row_reports_false(pool: PgPool) {
    let note = new_note("NV-7");
    NoteRepo::create(&pool, &note).await.unwrap();

    let bumped = TrackingRepo::increment_send_count(&pool, note.id).await.unwrap();
    assert!(!bumped);
}
