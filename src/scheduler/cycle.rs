use std::sync::Arc;
use std::time::Duration;

use super::report::{CycleIssue, CycleReport, CycleStage};
use crate::feed::FeedSource;
use crate::models::Article;
use crate::notify::NotificationProvider;
use crate::store::{JsonFileStore, filter_new};

/// One fetch → filter → persist → deliver pass.
///
/// No step aborts the cycle: every failure is logged, recorded in the
/// report, and replaced with an empty list or a failed delivery.
///
/// New articles are written to the store before delivery. A delivery that
/// fails is therefore never retried on a later cycle.
pub struct NewsCycle {
    feed: Arc<dyn FeedSource>,
    notifier: Arc<dyn NotificationProvider>,
    store: JsonFileStore,
    send_delay: Duration,
}

impl NewsCycle {
    pub fn new(
        feed: Arc<dyn FeedSource>,
        notifier: Arc<dyn NotificationProvider>,
        store: JsonFileStore,
        send_delay: Duration,
    ) -> Self {
        Self {
            feed,
            notifier,
            store,
            send_delay,
        }
    }

    pub fn store(&self) -> &JsonFileStore {
        &self.store
    }

    #[tracing::instrument(name = "cycle", skip(self))]
    pub async fn run_once(&self) -> CycleReport {
        let mut report = CycleReport::default();
        tracing::info!(source = self.feed.name(), "Checking news");

        let existing = match self.store.load().await {
            Ok(existing) => existing,
            Err(e) => {
                tracing::error!(error = %e, path = %self.store.path().display(), "Failed to load store, continuing with an empty one");
                report.issues.push(CycleIssue::from_error(CycleStage::LoadStore, &e));
                Vec::new()
            }
        };

        let candidates = match self.feed.fetch().await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(error = %e, source = self.feed.name(), "Feed fetch failed");
                report.issues.push(CycleIssue::from_error(CycleStage::Fetch, &e));
                Vec::new()
            }
        };
        report.fetched = candidates.len();

        let to_send = filter_new(&existing, &candidates);
        report.new_articles = to_send.len();

        if to_send.is_empty() {
            tracing::info!(fetched = report.fetched, "No new articles found");
            return report;
        }

        tracing::info!(count = to_send.len(), "Found new articles");

        let mut updated = existing;
        updated.extend(to_send.iter().cloned());
        match self.store.save(&updated).await {
            Ok(()) => report.store_written = true,
            Err(e) => {
                tracing::error!(error = %e, path = %self.store.path().display(), "Failed to save store");
                report.issues.push(CycleIssue::from_error(CycleStage::SaveStore, &e));
            }
        }

        for article in &to_send {
            self.deliver(article, &mut report).await;
            tokio::time::sleep(self.send_delay).await;
        }

        tracing::info!(
            attempted = report.attempted,
            delivered = report.delivered,
            failed = report.failed_deliveries(),
            "Cycle complete"
        );

        report
    }

    async fn deliver(&self, article: &Article, report: &mut CycleReport) {
        report.attempted += 1;

        match self.notifier.send(article).await {
            Ok(result) if result.success => {
                report.delivered += 1;
                tracing::info!(
                    title = %short_title(&article.title),
                    duration_ms = result.duration_ms,
                    "Sent"
                );
            }
            Ok(result) => {
                tracing::warn!(
                    title = %article.title,
                    url = %article.url,
                    provider = self.notifier.name(),
                    status_code = ?result.status_code,
                    response = ?result.response,
                    "Failed to send"
                );
                report.issues.push(CycleIssue {
                    stage: CycleStage::Deliver,
                    kind: "not_acknowledged",
                    message: format!("{} was not acknowledged", article.url),
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, url = %article.url, provider = self.notifier.name(), "Failed to send");
                report.issues.push(CycleIssue::from_error(CycleStage::Deliver, &e));
            }
        }
    }
}

/// First 50 characters, for log lines
fn short_title(title: &str) -> String {
    let mut chars = title.chars();
    let head: String = chars.by_ref().take(50).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
