//! Client for the external catalog service.
//!
//! The catalog owns the customer, address, and product reference data; this
//! service only ever reads it. Lookups follow a found / not-found / error
//! contract: HTTP 404 maps to `Ok(None)`, any other non-2xx response or
//! transport failure surfaces as a [`CatalogError`].

use async_trait::async_trait;

pub mod client;
pub mod types;

pub use client::{CatalogClient, CatalogError};
pub use types::{Address, AddressKind, Customer, Product};

/// Read access to the three reference catalogs.
///
/// Implemented by [`CatalogClient`] over HTTP; test code substitutes an
/// in-memory implementation.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn customer(&self, id: &str) -> Result<Option<Customer>, CatalogError>;
    async fn address(&self, id: &str) -> Result<Option<Address>, CatalogError>;
    async fn product(&self, id: &str) -> Result<Option<Product>, CatalogError>;
}
