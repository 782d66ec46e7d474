#![allow(dead_code)]

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use newsrelay::error::{AppError, AppResult};
use newsrelay::feed::FeedSource;
use newsrelay::models::Article;
use newsrelay::notify::{NotificationProvider, NotificationResult};
use tokio_util::sync::CancellationToken;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

pub fn article(n: u32) -> Article {
    Article::new(format!("Headline {n}"), format!("https://example.com/{n}"))
}

/// Feed that replays scripted batches, then keeps returning the last one.
///
/// `None` in the script means "fail this fetch".
pub struct ScriptedFeed {
    script: Mutex<VecDeque<Option<Vec<Article>>>>,
    last: Mutex<Option<Vec<Article>>>,
    calls: AtomicUsize,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl ScriptedFeed {
    pub fn new(script: Vec<Option<Vec<Article>>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(Some(Vec::new())),
            calls: AtomicUsize::new(0),
            cancel_after: None,
        }
    }

    pub fn always(batch: Vec<Article>) -> Self {
        Self::new(vec![Some(batch)])
    }

    /// Cancel `token` once the `n`th fetch has been served
    pub fn cancel_after(mut self, n: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((n, token));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for ScriptedFeed {
    async fn fetch(&self) -> AppResult<Vec<Article>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((limit, token)) = &self.cancel_after
            && n >= *limit
        {
            token.cancel();
        }

        let next = self.script.lock().unwrap().pop_front();
        let step = match next {
            Some(step) => {
                *self.last.lock().unwrap() = step.clone();
                step
            }
            None => self.last.lock().unwrap().clone(),
        };

        step.ok_or_else(|| AppError::external("fake", "feed unreachable", None))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Notifier that records every article it is asked to send
pub struct RecordingNotifier {
    sent: Mutex<Vec<Article>>,
    reject: Vec<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject: Vec::new(),
        }
    }

    /// Report these URLs as not acknowledged
    pub fn rejecting(urls: &[&str]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject: urls.iter().map(|u| u.to_string()).collect(),
        }
    }

    pub fn sent_urls(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|a| a.url.clone()).collect()
    }
}

#[async_trait]
impl NotificationProvider for RecordingNotifier {
    async fn send(&self, article: &Article) -> AppResult<NotificationResult> {
        self.sent.lock().unwrap().push(article.clone());
        let success = !self.reject.contains(&article.url);
        Ok(NotificationResult {
            success,
            status_code: Some(if success { 200 } else { 400 }),
            response: Some(format!("{{\"ok\": {success}}}")),
            duration_ms: 0,
        })
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Collects the messages of every warn or error event
#[derive(Clone, Default)]
pub struct Diagnostics {
    messages: Arc<Mutex<Vec<String>>>,
}

impl Diagnostics {
    /// Install as the thread's subscriber until the guard is dropped
    pub fn capture() -> (Self, tracing::subscriber::DefaultGuard) {
        let diagnostics = Self::default();
        let subscriber = tracing_subscriber::registry().with(diagnostics.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (diagnostics, guard)
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}

impl<S: Subscriber> Layer<S> for Diagnostics {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() <= Level::WARN {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.messages.lock().unwrap().push(visitor.0);
        }
    }
}
