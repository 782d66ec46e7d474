//! Turns parsed CLI arguments into validated [`Settings`]

use super::parser::Cli;
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Pick the loader for the CLI flags, load, apply overrides, validate.
///
/// `--config FILE` selects single-file mode; otherwise the layered loader
/// reads `NEWSRELAY_CONFIG_DIR` / `NEWSRELAY_CONFIG_FILE`. `--env` replaces
/// the environment taken from `NEWSRELAY_APP_ENV`.
pub fn load_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::from_file(path),
        None => ConfigLoader::new()?,
    };
    let loader = match cli.env {
        Some(env) => loader.with_environment(env.into()),
        None => loader,
    };

    let mut settings = loader.load_unvalidated()?;
    apply_overrides(cli, &mut settings);
    settings.validate()?;
    Ok(settings)
}

/// CLI flags take precedence over every configuration source
pub fn apply_overrides(cli: &Cli, settings: &mut Settings) {
    if let Some(level) = cli.log_level_override() {
        settings.logger.level = level.to_string();
    }
}
