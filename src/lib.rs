//! newsrelay library
//!
//! Polls NewsAPI top headlines, remembers what was already forwarded in a
//! JSON file, and posts every new article to a Telegram channel.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod http;
pub mod logger;
pub mod models;
pub mod notify;
pub mod scheduler;
pub mod store;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
