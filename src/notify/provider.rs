use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::Article;

/// Outcome of one delivery attempt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Whether the endpoint acknowledged the message
    pub success: bool,
    /// HTTP status, absent on transport failure
    pub status_code: Option<u16>,
    /// Response body or transport error text
    pub response: Option<String>,
    pub duration_ms: u64,
}

impl NotificationResult {
    pub fn failed(response: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            success: false,
            status_code: None,
            response: Some(response.into()),
            duration_ms,
        }
    }
}

/// A messaging endpoint that receives one message per article.
///
/// A transport failure is a delivered-with-failure result, not an `Err`;
/// `Err` is reserved for problems building the request.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    async fn send(&self, article: &Article) -> AppResult<NotificationResult>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
