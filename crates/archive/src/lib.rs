//! S3-backed archive for rendered sales-note documents.
//!
//! One object per note at `{tax_id}/{folio}.pdf`, carrying the tracking
//! counters as object metadata:
//!
//! ```text
//! hora-envio      ISO timestamp of the last send
//! nota-descargada "true" once the document has been downloaded
//! veces-enviado   send counter, starts at "1"
//! ```
//!
//! S3 object metadata is not independently addressable, so both mutations
//! are a head-object followed by a copy-object-onto-itself with a REPLACE
//! directive. The pair is not atomic: two concurrent mutations race and the
//! last writer wins, which can drop a counter increment. The record store
//! holds the authoritative copy; this metadata is an operational mirror.

use std::collections::HashMap;

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::MetadataDirective;
use aws_sdk_s3::Client;

use salenote_core::types::Timestamp;

/// Metadata key for the last-send timestamp.
pub const META_LAST_SEND: &str = "hora-envio";
/// Metadata key for the downloaded flag.
pub const META_DOWNLOADED: &str = "nota-descargada";
/// Metadata key for the send counter.
pub const META_SEND_COUNT: &str = "veces-enviado";

const CONTENT_TYPE_PDF: &str = "application/pdf";

/// Errors from the archive layer.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// No object exists under the derived key. On the download path this
    /// means the note's archival step never completed.
    #[error("Archived document not found: {key}")]
    NotFound { key: String },

    #[error("Archive write failed: {0}")]
    Store(String),

    #[error("Archive read failed: {0}")]
    Retrieve(String),
}

/// Derive the object key for a note's archived document.
///
/// Pure function of the customer tax id and the note folio, so the key can
/// always be recomputed from a stored note. Neither input may contain `/`;
/// tax ids and generated folios never do.
pub fn object_key(tax_id: &str, folio: &str) -> String {
    format!("{tax_id}/{folio}.pdf")
}

/// Parse a stored send counter, treating an absent or unreadable value as 1.
pub fn parse_send_count(raw: Option<&String>) -> i32 {
    raw.and_then(|v| v.parse().ok()).unwrap_or(1)
}

/// S3-backed document archive.
pub struct ArchiveStore {
    client: Client,
    bucket: String,
}

impl ArchiveStore {
    /// Create an archive store using default credentials from the
    /// environment (AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, or IAM role).
    pub async fn new(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: Client::new(&config),
            bucket: bucket.into(),
        }
    }

    /// Create with a custom endpoint (for S3-compatible services like MinIO).
    pub async fn with_endpoint(bucket: impl Into<String>, endpoint: &str) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .endpoint_url(endpoint)
            .force_path_style(true) // Required for MinIO and most S3-compatible services
            .build();
        Self {
            client: Client::from_conf(s3_config),
            bucket: bucket.into(),
        }
    }

    /// Create with an explicit client (for testing).
    pub fn with_client(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Store rendered document bytes under the derived key with the initial
    /// tracking metadata (sent once, not yet downloaded).
    pub async fn store(
        &self,
        tax_id: &str,
        folio: &str,
        bytes: Vec<u8>,
        sent_at: Timestamp,
    ) -> Result<String, ArchiveError> {
        let key = object_key(tax_id, folio);
        let size = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(CONTENT_TYPE_PDF)
            .metadata(META_LAST_SEND, sent_at.to_rfc3339())
            .metadata(META_DOWNLOADED, "false")
            .metadata(META_SEND_COUNT, "1")
            .send()
            .await
            .map_err(|e| ArchiveError::Store(format!("S3 upload failed: {e}")))?;

        tracing::debug!(key = %key, size, bucket = %self.bucket, "Archived rendered document");
        Ok(key)
    }

    /// Retrieve the archived bytes for a note.
    pub async fn fetch(&self, tax_id: &str, folio: &str) -> Result<Vec<u8>, ArchiveError> {
        let key = object_key(tax_id, folio);

        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| {
                let service_err = e.into_service_error();
                if service_err.is_no_such_key() {
                    ArchiveError::NotFound { key: key.clone() }
                } else {
                    ArchiveError::Retrieve(format!("S3 download failed: {service_err}"))
                }
            })?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| ArchiveError::Retrieve(format!("S3 body read failed: {e}")))?
            .into_bytes()
            .to_vec();

        Ok(bytes)
    }

    /// Flip the downloaded flag on the archived object. Idempotent at the
    /// metadata level; racing writers resolve last-write-wins.
    pub async fn mark_downloaded(&self, tax_id: &str, folio: &str) -> Result<(), ArchiveError> {
        let key = object_key(tax_id, folio);
        let mut metadata = self.head_metadata(&key).await?;
        metadata.insert(META_DOWNLOADED.to_string(), "true".to_string());
        self.rewrite_metadata(&key, metadata).await?;

        tracing::debug!(key = %key, "Marked archived document as downloaded");
        Ok(())
    }

    /// Bump the send counter and refresh the last-send timestamp on the
    /// archived object. Returns the new counter value.
    pub async fn increment_send_count(
        &self,
        tax_id: &str,
        folio: &str,
        sent_at: Timestamp,
    ) -> Result<i32, ArchiveError> {
        let key = object_key(tax_id, folio);
        let mut metadata = self.head_metadata(&key).await?;

        let next = parse_send_count(metadata.get(META_SEND_COUNT)) + 1;
        metadata.insert(META_SEND_COUNT.to_string(), next.to_string());
        metadata.insert(META_LAST_SEND.to_string(), sent_at.to_rfc3339());
        self.rewrite_metadata(&key, metadata).await?;

        tracing::debug!(key = %key, send_count = next, "Updated archive send counter");
        Ok(next)
    }

    // ---- private helpers ----

    async fn head_metadata(&self, key: &str) -> Result<HashMap<String, String>, ArchiveError> {
        let head = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service_err = e.into_service_error();
                if service_err.is_not_found() {
                    ArchiveError::NotFound {
                        key: key.to_string(),
                    }
                } else {
                    ArchiveError::Retrieve(format!("S3 head failed: {service_err}"))
                }
            })?;

        Ok(head.metadata().cloned().unwrap_or_default())
    }

    /// Rewrite the object in place with replaced metadata: a copy of the
    /// object onto its own key with a REPLACE directive. Costs a full
    /// object rewrite per metadata change.
    async fn rewrite_metadata(
        &self,
        key: &str,
        metadata: HashMap<String, String>,
    ) -> Result<(), ArchiveError> {
        let mut request = self
            .client
            .copy_object()
            .bucket(&self.bucket)
            .copy_source(format!("{}/{}", self.bucket, key))
            .key(key)
            .metadata_directive(MetadataDirective::Replace);

        for (name, value) in metadata {
            request = request.metadata(name, value);
        }

        request
            .send()
            .await
            .map_err(|e| ArchiveError::Store(format!("S3 metadata rewrite failed: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_derived_from_tax_id_and_folio() {
        assert_eq!(
            object_key("XAXX010101000", "NV-1700000000123"),
            "XAXX010101000/NV-1700000000123.pdf"
        );
    }

    #[test]
    fn key_derivation_is_stable() {
        // The key must be re-derivable from a stored note alone.
        let first = object_key("ABC850101XYZ", "NV-42");
        let second = object_key("ABC850101XYZ", "NV-42");
        assert_eq!(first, second);
    }

    #[test]
    fn send_count_parses_stored_values() {
        assert_eq!(parse_send_count(Some(&"3".to_string())), 3);
        assert_eq!(parse_send_count(Some(&"1".to_string())), 1);
    }

    #[test]
    fn send_count_defaults_to_one() {
        assert_eq!(parse_send_count(None), 1);
        assert_eq!(parse_send_count(Some(&"garbage".to_string())), 1);
        assert_eq!(parse_send_count(Some(&String::new())), 1);
    }
}
