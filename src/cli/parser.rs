//! CLI argument parsing with clap

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::Environment as AppEnvironment;

/// Relay new headlines from NewsAPI to a Telegram channel
#[derive(Parser, Debug, Default)]
#[command(name = "newsrelay")]
#[command(about = "Relay new headlines from NewsAPI to a Telegram channel")]
#[command(long_about = "
newsrelay polls NewsAPI top headlines on a fixed interval, remembers every
article it has already forwarded in a local JSON file, and posts each new one
to a Telegram channel. With no arguments it runs until interrupted.

Credentials are read from configuration, usually from the environment:
    NEWSRELAY_FEED__API_KEY, NEWSRELAY_TELEGRAM__BOT_TOKEN,
    NEWSRELAY_TELEGRAM__CHAT_ID

EXAMPLES:
    # Poll forever with config/default.toml + environment overrides
    newsrelay

    # Use one configuration file
    newsrelay --config /etc/newsrelay.toml

    # Run a single cycle and exit
    newsrelay --once

    # Check configuration without contacting any service
    newsrelay --dry-run
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Configuration file path (single-file mode, skips config/ layering)
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection (selects config/{env}.toml)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Run one cycle and exit
    #[arg(long, conflicts_with = "dry_run")]
    pub once: bool,

    /// Validate configuration and exit
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "production", alias = "prod")]
    Production,
    #[value(name = "test")]
    Test,
}

impl From<Environment> for AppEnvironment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => AppEnvironment::Development,
            Environment::Production => AppEnvironment::Production,
            Environment::Test => AppEnvironment::Test,
        }
    }
}

impl Cli {
    /// Log level implied by `--verbose` / `--quiet`, if any
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}
