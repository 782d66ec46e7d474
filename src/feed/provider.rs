use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::Article;

/// A remote source of candidate articles.
///
/// Implementations report failures as errors; deciding what to substitute is
/// left to the caller.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the current batch of candidates, in feed order
    async fn fetch(&self) -> AppResult<Vec<Article>>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}
