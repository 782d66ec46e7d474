mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{Diagnostics, RecordingNotifier, ScriptedFeed, article};
use newsrelay::scheduler::{CycleStage, NewsCycle};
use newsrelay::store::JsonFileStore;
use tempfile::TempDir;

fn cycle(
    dir: &TempDir,
    feed: Arc<ScriptedFeed>,
    notifier: Arc<RecordingNotifier>,
) -> NewsCycle {
    NewsCycle::new(
        feed,
        notifier,
        JsonFileStore::new(dir.path().join("news_data.json")),
        Duration::ZERO,
    )
}

fn stored_urls(store: &JsonFileStore) -> Vec<String> {
    let bytes = std::fs::read(store.path()).unwrap();
    let articles: Vec<newsrelay::models::Article> = serde_json::from_slice(&bytes).unwrap();
    articles.into_iter().map(|a| a.url).collect()
}

#[tokio::test]
async fn test_only_unseen_articles_are_delivered() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("news_data.json"));
    store.save(&[article(1)]).await.unwrap();

    let notifier = Arc::new(RecordingNotifier::new());
    let feed = Arc::new(ScriptedFeed::always(vec![article(1), article(2)]));
    let cycle = cycle(&dir, feed, notifier.clone());

    let report = cycle.run_once().await;

    assert_eq!(report.fetched, 2);
    assert_eq!(report.new_articles, 1);
    assert_eq!(report.delivered, 1);
    assert!(report.issues.is_empty());
    assert_eq!(notifier.sent_urls(), vec!["https://example.com/2"]);
    assert_eq!(
        stored_urls(&store),
        vec!["https://example.com/1", "https://example.com/2"]
    );
}

#[tokio::test]
async fn test_second_cycle_with_same_feed_sends_nothing() {
    let dir = TempDir::new().unwrap();
    let notifier = Arc::new(RecordingNotifier::new());
    let feed = Arc::new(ScriptedFeed::always(vec![article(1), article(2)]));
    let cycle = cycle(&dir, feed, notifier.clone());

    let first = cycle.run_once().await;
    let second = cycle.run_once().await;

    assert_eq!(first.delivered, 2);
    assert_eq!(second.new_articles, 0);
    assert!(!second.store_written);
    assert_eq!(notifier.sent_urls().len(), 2);
}

#[tokio::test]
async fn test_fetch_failure_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("news_data.json"));
    store.save(&[article(1)]).await.unwrap();
    let before = std::fs::read(store.path()).unwrap();

    let notifier = Arc::new(RecordingNotifier::new());
    let feed = Arc::new(ScriptedFeed::new(vec![None]));
    let cycle = cycle(&dir, feed, notifier.clone());

    let (diagnostics, _guard) = Diagnostics::capture();
    let report = cycle.run_once().await;

    assert_eq!(diagnostics.messages(), vec!["Feed fetch failed"]);
    assert_eq!(report.fetched, 0);
    assert_eq!(report.issues_at(CycleStage::Fetch).count(), 1);
    assert_eq!(report.issues[0].kind, "external_api");
    assert!(notifier.sent_urls().is_empty());
    assert_eq!(std::fs::read(store.path()).unwrap(), before);
}

#[tokio::test]
async fn test_failed_delivery_is_recorded_and_not_retried() {
    let dir = TempDir::new().unwrap();
    let notifier = Arc::new(RecordingNotifier::rejecting(&["https://example.com/2"]));
    let feed = Arc::new(ScriptedFeed::always(vec![article(1), article(2)]));
    let cycle = cycle(&dir, feed, notifier.clone());

    let first = cycle.run_once().await;
    assert_eq!(first.attempted, 2);
    assert_eq!(first.delivered, 1);
    assert_eq!(first.failed_deliveries(), 1);
    assert_eq!(first.issues_at(CycleStage::Deliver).count(), 1);

    // Persisted before delivery, so the rejected article is already "seen"
    let second = cycle.run_once().await;
    assert_eq!(second.attempted, 0);
    assert_eq!(notifier.sent_urls().len(), 2);
    assert_eq!(stored_urls(cycle.store()).len(), 2);
}

#[tokio::test]
async fn test_duplicate_urls_within_batch_are_kept() {
    let dir = TempDir::new().unwrap();
    let notifier = Arc::new(RecordingNotifier::new());
    let feed = Arc::new(ScriptedFeed::always(vec![article(7), article(7)]));
    let cycle = cycle(&dir, feed, notifier.clone());

    let report = cycle.run_once().await;

    assert_eq!(report.attempted, 2);
    assert_eq!(notifier.sent_urls().len(), 2);
    assert_eq!(stored_urls(cycle.store()).len(), 2);
}

#[tokio::test]
async fn test_corrupt_store_is_treated_as_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("news_data.json"), "{not json").unwrap();

    let notifier = Arc::new(RecordingNotifier::new());
    let feed = Arc::new(ScriptedFeed::always(vec![article(1)]));
    let cycle = cycle(&dir, feed, notifier.clone());

    let report = cycle.run_once().await;

    assert_eq!(report.issues_at(CycleStage::LoadStore).count(), 1);
    assert_eq!(report.delivered, 1);
    assert_eq!(stored_urls(cycle.store()), vec!["https://example.com/1"]);
}

#[tokio::test]
async fn test_unwritable_store_still_delivers() {
    let dir = TempDir::new().unwrap();
    // A directory where the file should be: load and save both fail
    let path = dir.path().join("news_data.json");
    std::fs::create_dir(&path).unwrap();

    let notifier = Arc::new(RecordingNotifier::new());
    let feed = Arc::new(ScriptedFeed::always(vec![article(1)]));
    let cycle = NewsCycle::new(feed, notifier.clone(), JsonFileStore::new(path), Duration::ZERO);

    let report = cycle.run_once().await;

    assert!(!report.store_written);
    assert_eq!(report.issues_at(CycleStage::SaveStore).count(), 1);
    assert_eq!(report.delivered, 1);
}

#[tokio::test(start_paused = true)]
async fn test_send_delay_follows_every_attempt() {
    let dir = TempDir::new().unwrap();
    let notifier = Arc::new(RecordingNotifier::rejecting(&["https://example.com/1"]));
    let feed = Arc::new(ScriptedFeed::always(vec![article(1), article(2), article(3)]));
    let cycle = NewsCycle::new(
        feed,
        notifier,
        JsonFileStore::new(dir.path().join("news_data.json")),
        Duration::from_secs(1),
    );

    let start = tokio::time::Instant::now();
    let report = cycle.run_once().await;

    assert_eq!(report.attempted, 3);
    assert!(start.elapsed() >= Duration::from_secs(3));
}
