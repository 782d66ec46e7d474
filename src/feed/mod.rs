//! Feed sources: where candidate articles come from

mod newsapi;
mod provider;

pub use newsapi::NewsApiClient;
pub use provider::FeedSource;
