//! Configuration validation logic
//!
//! Runs once after loading. The first failing rule is reported as a
//! [`ConfigError::ValidationError`] naming the offending key.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{
    FeedConfig, FileSettings, HttpConfig, LoggerSettings, SchedulerConfig, Settings, StoreConfig,
    TelegramConfig,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// One year
const MAX_INTERVAL_MINUTES: u64 = 525_600;

/// Accepts absolute http(s) URLs only
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::ValidationError {
        field: field.to_string(),
        message: format!("Invalid URL '{}': {}", value, e),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: format!("URL must use http or https, got '{}'", url.scheme()),
        });
    }

    Ok(())
}

fn require_non_empty(field: &str, value: &str, hint: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: format!("{} is required. {}", field, hint),
        });
    }
    Ok(())
}

impl FeedConfig {
    /// # Validation Rules
    /// - endpoint must be an http(s) URL
    /// - api_key must not be empty
    /// - country must be a two-letter code
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_http_url("feed.endpoint", &self.endpoint)?;
        require_non_empty(
            "feed.api_key",
            &self.api_key,
            "Set NEWSRELAY_FEED__API_KEY or feed.api_key.",
        )?;

        if self.country.len() != 2 || !self.country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::ValidationError {
                field: "feed.country".to_string(),
                message: format!("Country must be a two-letter code, got '{}'", self.country),
            });
        }

        Ok(())
    }
}

impl TelegramConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_http_url("telegram.api_base", &self.api_base)?;
        require_non_empty(
            "telegram.bot_token",
            &self.bot_token,
            "Set NEWSRELAY_TELEGRAM__BOT_TOKEN or telegram.bot_token.",
        )?;
        require_non_empty(
            "telegram.chat_id",
            &self.chat_id,
            "Use the channel's @username or numeric id.",
        )?;
        Ok(())
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::validation(
                "store.path",
                "Store path cannot be empty.",
            ));
        }
        Ok(())
    }
}

impl SchedulerConfig {
    /// `send_delay_ms` may be zero; the interval may not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_minutes == 0 {
            return Err(ConfigError::validation(
                "scheduler.interval_minutes",
                "Interval must be at least 1 minute.",
            ));
        }
        if self.interval_minutes > MAX_INTERVAL_MINUTES {
            return Err(ConfigError::ValidationError {
                field: "scheduler.interval_minutes".to_string(),
                message: format!(
                    "Interval must be at most {} minutes, got {}",
                    MAX_INTERVAL_MINUTES, self.interval_minutes
                ),
            });
        }
        Ok(())
    }
}

impl HttpConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::validation(
                "http.timeout_secs",
                "Request timeout must be greater than 0 seconds.",
            ));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::validation(
                "http.connect_timeout_secs",
                "Connect timeout must be greater than 0 seconds.",
            ));
        }
        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validate all sections, returning the first error encountered
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.feed.validate()?;
        self.telegram.validate()?;
        self.store.validate()?;
        self.scheduler.validate()?;
        self.http.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.feed.api_key = "feed-key".to_string();
        settings.telegram.bot_token = "123:abc".to_string();
        settings.telegram.chat_id = "@headlines".to_string();
        settings
    }

    fn failing_field(settings: &Settings) -> String {
        match settings.validate() {
            Err(ConfigError::ValidationError { field, .. }) => field,
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_settings() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_default_settings_missing_credentials() {
        assert_eq!(failing_field(&Settings::default()), "feed.api_key");
    }

    #[test]
    fn test_missing_bot_token() {
        let mut settings = valid_settings();
        settings.telegram.bot_token = "  ".to_string();
        assert_eq!(failing_field(&settings), "telegram.bot_token");
    }

    #[test]
    fn test_missing_chat_id() {
        let mut settings = valid_settings();
        settings.telegram.chat_id.clear();
        assert_eq!(failing_field(&settings), "telegram.chat_id");
    }

    #[test]
    fn test_invalid_feed_endpoint() {
        let mut settings = valid_settings();
        settings.feed.endpoint = "newsapi.org/v2".to_string();
        assert_eq!(failing_field(&settings), "feed.endpoint");

        settings.feed.endpoint = "ftp://newsapi.org/v2".to_string();
        assert_eq!(failing_field(&settings), "feed.endpoint");
    }

    #[test]
    fn test_invalid_country() {
        let mut settings = valid_settings();
        settings.feed.country = "usa".to_string();
        assert_eq!(failing_field(&settings), "feed.country");
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut settings = valid_settings();
        settings.scheduler.interval_minutes = 0;
        assert_eq!(failing_field(&settings), "scheduler.interval_minutes");
    }

    #[test]
    fn test_interval_upper_bound() {
        let mut settings = valid_settings();
        settings.scheduler.interval_minutes = MAX_INTERVAL_MINUTES;
        assert!(settings.validate().is_ok());

        settings.scheduler.interval_minutes = 400_000_000_000_000_000;
        assert_eq!(failing_field(&settings), "scheduler.interval_minutes");
    }

    #[test]
    fn test_zero_send_delay_allowed() {
        let mut settings = valid_settings();
        settings.scheduler.send_delay_ms = 0;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_http_timeout_rejected() {
        let mut settings = valid_settings();
        settings.http.timeout_secs = 0;
        assert_eq!(failing_field(&settings), "http.timeout_secs");
    }

    #[test]
    fn test_invalid_log_level() {
        let mut settings = valid_settings();
        settings.logger.level = "verbose".to_string();
        assert_eq!(failing_field(&settings), "logger.level");
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let mut settings = valid_settings();
        settings.logger.level = "DEBUG".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_file_logging_requires_path() {
        let mut settings = valid_settings();
        settings.logger.file.enabled = true;
        settings.logger.file.path = String::new();
        assert_eq!(failing_field(&settings), "logger.file.path");
    }
}
