use clap::Parser;
use newsrelay::cli::{Cli, execute, load_settings};
use newsrelay::logger::init_logger;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The logger is not installed yet, so configuration errors go to stderr
    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_logger(settings.logger.clone().into_logger_config()?)?;

    tracing::info!(
        version = newsrelay::pkg_version(),
        country = %settings.feed.country,
        chat_id = %settings.telegram.chat_id,
        store = %settings.store.path.display(),
        interval_minutes = settings.scheduler.interval_minutes,
        api_key_configured = !settings.feed.api_key.is_empty(),
        bot_token_configured = !settings.telegram.bot_token.is_empty(),
        "Starting newsrelay"
    );

    execute(&cli, settings).await?;
    Ok(())
}
