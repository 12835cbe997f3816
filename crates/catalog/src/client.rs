//! HTTP implementation of the catalog lookup contract.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::types::{Address, Customer, Product};
use crate::Catalog;

/// Timeout applied to every catalog request. A timed-out lookup is
/// indistinguishable from any other transport failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the catalog HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx status other than 404.
    #[error("Catalog API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the catalog service.
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new client for a catalog instance.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://host:3001`.
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, base_url }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// GET a resource, mapping 404 to `None` and any other non-2xx status
    /// to [`CatalogError::Api`].
    async fn fetch_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, CatalogError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(Some(response.json::<T>().await?))
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn customer(&self, id: &str) -> Result<Option<Customer>, CatalogError> {
        self.fetch_optional(&format!("/api/customers/{id}")).await
    }

    async fn address(&self, id: &str) -> Result<Option<Address>, CatalogError> {
        self.fetch_optional(&format!("/api/addresses/{id}")).await
    }

    async fn product(&self, id: &str) -> Result<Option<Product>, CatalogError> {
        self.fetch_optional(&format!("/api/products/{id}")).await
    }
}
