//! Delivery of articles to a messaging channel

mod provider;
mod telegram;

pub use provider::{NotificationProvider, NotificationResult};
pub use telegram::{TelegramProvider, render_html};
