//! Telegram Bot API provider.
//!
//! Posts one `sendMessage` per article with HTML parse mode, link previews
//! on and notifications silenced.

use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;

use super::provider::{NotificationProvider, NotificationResult};
use crate::config::TelegramConfig;
use crate::error::AppResult;
use crate::models::Article;

const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Serialize)]
struct SendMessageBody<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
    disable_notification: bool,
}

/// Escape the characters Telegram's HTML parser treats as markup
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Message text for an article: bold title, description, "Read more" link
pub fn render_html(article: &Article) -> String {
    let description = article
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(NO_DESCRIPTION);

    format!(
        "<b>{}</b>\n\n{}\n\n<a href='{}'>Read more</a>",
        escape_html(&article.title),
        escape_html(description),
        escape_html(&article.url)
    )
}

pub struct TelegramProvider {
    client: reqwest::Client,
    config: TelegramConfig,
}

impl TelegramProvider {
    pub fn new(client: reqwest::Client, config: TelegramConfig) -> Self {
        Self { client, config }
    }

    /// `ok` from the Bot API response; anything unreadable counts as not ok
    fn acknowledged(body: &str) -> bool {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("ok").and_then(|ok| ok.as_bool()))
            .unwrap_or(false)
    }
}

#[async_trait]
impl NotificationProvider for TelegramProvider {
    async fn send(&self, article: &Article) -> AppResult<NotificationResult> {
        let start = Instant::now();
        let text = render_html(article);
        let body = SendMessageBody {
            chat_id: &self.config.chat_id,
            text: &text,
            parse_mode: "HTML",
            disable_web_page_preview: false,
            disable_notification: true,
        };

        let response = self
            .client
            .post(self.config.send_message_url())
            .json(&body)
            .send()
            .await;

        match response {
            Ok(resp) => {
                let status_code = resp.status().as_u16();
                let response_text = resp.text().await.ok();
                let success = response_text.as_deref().is_some_and(Self::acknowledged);

                Ok(NotificationResult {
                    success,
                    status_code: Some(status_code),
                    response: response_text,
                    duration_ms: start.elapsed().as_millis() as u64,
                })
            }
            // The URL contains the bot token, keep it out of the error text
            Err(e) => Ok(NotificationResult::failed(
                e.without_url().to_string(),
                start.elapsed().as_millis() as u64,
            )),
        }
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}
