use std::sync::Arc;

use salenote_archive::ArchiveStore;
use salenote_catalog::CatalogClient;
use salenote_notify::Notifier;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// The client handles are the only long-lived state; requests share nothing
/// else.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: salenote_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Catalog service client (customers, addresses, products).
    pub catalog: Arc<CatalogClient>,
    /// Archived-document store.
    pub archive: Arc<ArchiveStore>,
    /// Notification dispatcher client.
    pub notifier: Arc<Notifier>,
}
