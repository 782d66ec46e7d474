use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use super::provider::FeedSource;
use crate::config::FeedConfig;
use crate::error::{AppError, AppResult};
use crate::models::Article;

const SERVICE: &str = "newsapi";

/// Top-headlines response. `articles` is kept as raw values so one malformed
/// entry does not discard the whole batch.
#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Option<Vec<serde_json::Value>>,
}

/// NewsAPI top-headlines client
pub struct NewsApiClient {
    client: reqwest::Client,
    config: FeedConfig,
}

impl NewsApiClient {
    pub fn new(client: reqwest::Client, config: FeedConfig) -> Self {
        Self { client, config }
    }

    /// `{endpoint}?country={country}&apiKey={api_key}`
    fn request_url(&self) -> AppResult<Url> {
        Url::parse_with_params(
            &self.config.endpoint,
            &[
                ("country", self.config.country.as_str()),
                ("apiKey", self.config.api_key.as_str()),
            ],
        )
        .map_err(|e| {
            AppError::external(
                SERVICE,
                format!("invalid endpoint '{}': {}", self.config.endpoint, e),
                Some(e.into()),
            )
        })
    }

    fn into_articles(response: HeadlinesResponse) -> AppResult<Vec<Article>> {
        if response.status.as_deref() == Some("error") {
            return Err(AppError::external(
                SERVICE,
                format!(
                    "{}: {}",
                    response.code.as_deref().unwrap_or("unknown"),
                    response.message.as_deref().unwrap_or("no message")
                ),
                None,
            ));
        }

        let raw = response.articles.unwrap_or_default();
        let total = raw.len();
        let articles: Vec<Article> = raw
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match serde_json::from_value::<Article>(raw) {
                Ok(article) => Some(article),
                Err(e) => {
                    tracing::debug!(index, error = %e, "Skipping unreadable feed entry");
                    None
                }
            })
            .collect();

        if articles.len() < total {
            tracing::debug!(
                kept = articles.len(),
                skipped = total - articles.len(),
                "Dropped feed entries without a usable url"
            );
        }

        Ok(articles)
    }
}

#[async_trait]
impl FeedSource for NewsApiClient {
    async fn fetch(&self) -> AppResult<Vec<Article>> {
        let url = self.request_url()?;

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors embed the URL, which carries the api key
                let e = e.without_url();
                AppError::external(SERVICE, format!("request failed: {}", e), Some(e.into()))
            })?
            .error_for_status()
            .map_err(|e| {
                let e = e.without_url();
                AppError::external(SERVICE, format!("HTTP error: {}", e), Some(e.into()))
            })?;

        let body: HeadlinesResponse = resp.json().await.map_err(|e| {
            let e = e.without_url();
            AppError::external(SERVICE, format!("invalid JSON: {}", e), Some(e.into()))
        })?;

        Self::into_articles(body)
    }

    fn name(&self) -> &'static str {
        SERVICE
    }
}
