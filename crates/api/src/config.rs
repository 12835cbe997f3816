/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3002`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Public base URL of this service, used in notification download links.
    pub public_base_url: String,
    /// Base URL of the catalog service (customers, addresses, products).
    pub catalog_url: String,
    /// Base URL of the notification dispatcher.
    pub notifier_url: String,
    /// Object-storage bucket holding archived documents.
    pub archive_bucket: String,
    /// Optional custom S3 endpoint (MinIO and other S3-compatible stores).
    pub archive_endpoint: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3002`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `PUBLIC_BASE_URL`      | `http://localhost:3002`    |
    /// | `CATALOG_URL`          | `http://localhost:3001`    |
    /// | `NOTIFIER_URL`         | `http://localhost:3003`    |
    /// | `ARCHIVE_BUCKET`       | `sales-note-archive`       |
    /// | `ARCHIVE_ENDPOINT`     | (unset: AWS default)       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3002".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3002".into());

        let catalog_url =
            std::env::var("CATALOG_URL").unwrap_or_else(|_| "http://localhost:3001".into());

        let notifier_url =
            std::env::var("NOTIFIER_URL").unwrap_or_else(|_| "http://localhost:3003".into());

        let archive_bucket =
            std::env::var("ARCHIVE_BUCKET").unwrap_or_else(|_| "sales-note-archive".into());

        let archive_endpoint = std::env::var("ARCHIVE_ENDPOINT").ok();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            public_base_url,
            catalog_url,
            notifier_url,
            archive_bucket,
            archive_endpoint,
        }
    }
}
