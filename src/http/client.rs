use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::{AppError, AppResult};

/// Build the HTTP client shared by the feed source and the notifier.
///
/// One client per process gives connection pooling across cycles. Features:
/// - whole-request and connect timeouts from [`HttpConfig`]
/// - gzip / deflate response decoding
/// - rustls for TLS (no OpenSSL dependency)
/// - `newsrelay/<version>` User-Agent
pub fn build_http_client(config: &HttpConfig) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .deflate(true)
        .user_agent(format!("newsrelay/{}", crate::pkg_version()))
        .build()
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::new(e).context("Failed to build HTTP client"),
        })
}
