//! Configuration management for newsrelay
//!
//! Settings are loaded once at startup from layered sources and then passed
//! by reference into each component.
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local overrides (not committed to version control)
//! 4. `NEWSRELAY_*` environment variables

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    ApplicationConfig, FeedConfig, HttpConfig, LoggerSettings, SchedulerConfig, Settings,
    StoreConfig, TelegramConfig,
};
