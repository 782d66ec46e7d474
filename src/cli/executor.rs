//! Wires settings into a running scheduler

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::parser::Cli;
use crate::config::Settings;
use crate::error::AppResult;
use crate::feed::NewsApiClient;
use crate::http::build_http_client;
use crate::notify::TelegramProvider;
use crate::scheduler::{NewsCycle, Scheduler, shutdown_signal};
use crate::store::JsonFileStore;

/// Build the production pipeline: NewsAPI feed, Telegram notifier, JSON store.
///
/// One HTTP client is shared by both services.
pub fn build_scheduler(settings: &Settings) -> AppResult<Scheduler> {
    let client = build_http_client(&settings.http)?;

    let feed = NewsApiClient::new(client.clone(), settings.feed.clone());
    let notifier = TelegramProvider::new(client, settings.telegram.clone());
    let store = JsonFileStore::from_config(&settings.store);

    let cycle = NewsCycle::new(
        Arc::new(feed),
        Arc::new(notifier),
        store,
        settings.scheduler.send_delay(),
    );

    Ok(Scheduler::new(cycle, settings.scheduler.interval()))
}

/// Run according to the CLI mode.
///
/// - `--dry-run`: build everything, contact nothing
/// - `--once`: a single cycle
/// - default: loop until SIGINT/SIGTERM; the running cycle is allowed to finish
pub async fn execute(cli: &Cli, settings: Settings) -> AppResult<()> {
    settings.validate()?;
    let scheduler = build_scheduler(&settings)?;

    if cli.dry_run {
        tracing::info!(
            store = %scheduler.cycle().store().path().display(),
            "Configuration is valid (dry run)"
        );
        return Ok(());
    }

    if cli.once {
        let report = scheduler.run_once().await;
        tracing::info!(
            fetched = report.fetched,
            new = report.new_articles,
            delivered = report.delivered,
            issues = report.issues.len(),
            "Single cycle finished"
        );
        return Ok(());
    }

    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_token.cancel();
    });

    scheduler.run(token).await;
    Ok(())
}
