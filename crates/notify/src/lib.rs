//! Client for the outbound notification dispatcher.
//!
//! Delivery is best-effort with no retry: the fulfilment path spawns
//! [`Notifier::send_issued`] detached, logs a failure, and drops the
//! outcome. Nothing downstream ever observes whether the customer was
//! actually notified.

use std::time::Duration;

use uuid::Uuid;

/// HTTP request timeout for a single dispatch attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from notification dispatch.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The dispatcher returned a non-2xx status code.
    #[error("Notification dispatcher returned HTTP {0}")]
    HttpStatus(u16),
}

/// Client for the notification dispatcher service.
pub struct Notifier {
    client: reqwest::Client,
    base_url: String,
    /// Public base URL of this service, used to build download links.
    download_base_url: String,
}

impl Notifier {
    /// Create a new dispatcher client.
    ///
    /// * `base_url` - Dispatcher base URL, e.g. `http://host:3003`.
    /// * `download_base_url` - Public base URL of this service.
    pub fn new(base_url: String, download_base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url,
            download_base_url,
        }
    }

    /// Ask the dispatcher to tell the customer their note was issued,
    /// including a link to download the document.
    pub async fn send_issued(
        &self,
        recipient: &str,
        folio: &str,
        note_id: Uuid,
    ) -> Result<(), NotifyError> {
        let download_link = format!("{}/api/v1/notes/{}/pdf", self.download_base_url, note_id);
        let payload = serde_json::json!({
            "recipient": recipient,
            "folio": folio,
            "download_link": download_link,
        });

        let response = self
            .client
            .post(format!("{}/api/notifications/send", self.base_url))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}
