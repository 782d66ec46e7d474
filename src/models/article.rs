use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};

/// Publisher block as delivered by NewsAPI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One feed entry.
///
/// Identity is the URL: two articles with the same `url` are the same
/// article no matter what the other fields say. The optional fields keep the
/// shape NewsAPI delivered so the store file stays readable by other tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ArticleSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Article {
    /// Minimal article, mostly useful in tests and fakes
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            source: None,
            author: None,
            title: title.into(),
            description: None,
            url: url.into(),
            url_to_image: None,
            published_at: None,
            content: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Stable identifier, derived from the URL
    pub fn id(&self) -> &str {
        &self.url
    }
}

impl PartialEq for Article {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for Article {}

impl Hash for Article {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_url_only() {
        let a = Article::new("First headline", "https://example.com/a");
        let b = Article::new("Edited headline", "https://example.com/a").with_description("x");
        let c = Article::new("First headline", "https://example.com/c");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.id(), "https://example.com/a");
    }

    #[test]
    fn test_deserialize_newsapi_article() {
        let json = r#"{
            "source": {"id": null, "name": "Example Times"},
            "author": "Jane Doe",
            "title": "Something happened",
            "description": null,
            "url": "https://example.com/story",
            "urlToImage": "https://example.com/story.jpg",
            "publishedAt": "2024-05-01T12:00:00Z",
            "content": "Body [+1200 chars]"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Something happened");
        assert_eq!(article.description, None);
        assert_eq!(article.url_to_image.as_deref(), Some("https://example.com/story.jpg"));
        assert_eq!(
            article.source.and_then(|s| s.name).as_deref(),
            Some("Example Times")
        );
    }

    #[test]
    fn test_null_title_reads_as_empty() {
        let article: Article =
            serde_json::from_str(r#"{"title": null, "url": "https://example.com/x"}"#).unwrap();
        assert_eq!(article.title, "");
    }

    #[test]
    fn test_missing_url_is_rejected() {
        let result = serde_json::from_str::<Article>(r#"{"title": "no link"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_camel_case_keys() {
        let mut article = Article::new("t", "https://example.com/t");
        article.published_at = Some("2024-05-01T12:00:00Z".to_string());
        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(value["publishedAt"], "2024-05-01T12:00:00Z");
        assert!(value.get("source").is_none());
    }
}
