//! Feed loading with last-request-wins sequencing.
//!
//! A `FeedLoader` owns the state of one feed widget: the current filters,
//! the last good data, a loading/error status. Every fetch runs on its own
//! tokio task and reports back over a channel owned by the loader, tagged
//! with a sequence number taken when the request was issued.
//!
//! Rules:
//! - Entering `Loading` clears the error; the previous data stays visible.
//! - A response older than the last applied one is discarded. In-flight
//!   requests are never cancelled.
//! - Success from the newest request replaces the data verbatim.
//! - Failure of the newest request sets a user-facing message and keeps
//!   the last good data. Failures of superseded requests are dropped.
//! - While a newer request is outstanding, a successful older response may
//!   replace the data but the loader stays `Loading`.

pub mod model;
pub mod source;

use crate::error::{DevhubError, DevhubResult};
use source::{ChallengesSource, FeedSource, JobsSource, NewsSource, PostsSource};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub type NewsFeed = FeedLoader<NewsSource>;
pub type JobsFeed = FeedLoader<JobsSource>;
pub type ChallengesFeed = FeedLoader<ChallengesSource>;
pub type PostsFeed = FeedLoader<PostsSource>;

/// Loader status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// Nothing requested yet.
    Idle,
    Loading,
    Success,
    Error,
}

/// A fetch result tagged with the sequence number of its request.
pub struct FeedResponse<T> {
    pub seq: u64,
    pub result: DevhubResult<Vec<T>>,
}

pub struct FeedLoader<S: FeedSource> {
    source: Arc<S>,
    filters: S::Filters,
    status: FeedStatus,
    data: Vec<S::Item>,
    error: Option<String>,
    /// Sequence number of the newest request issued.
    issued: u64,
    /// Sequence number of the newest response applied.
    applied: u64,
    in_flight: usize,
    tx: mpsc::UnboundedSender<FeedResponse<S::Item>>,
    rx: mpsc::UnboundedReceiver<FeedResponse<S::Item>>,
}

impl<S: FeedSource> FeedLoader<S> {
    /// Create an idle loader with default filters.
    pub fn new(source: S) -> Self {
        Self::with_filters(Arc::new(source), S::Filters::default())
    }

    /// Create an idle loader sharing `source`, starting from `filters`.
    pub fn with_filters(source: Arc<S>, filters: S::Filters) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            filters,
            status: FeedStatus::Idle,
            data: Vec::new(),
            error: None,
            issued: 0,
            applied: 0,
            in_flight: 0,
            tx,
            rx,
        }
    }

    /// Issue a fetch with the current filters and enter `Loading`.
    ///
    /// Returns the sequence number of the new request. Must be called from
    /// within a tokio runtime.
    pub fn refresh(&mut self) -> u64 {
        self.issued += 1;
        let seq = self.issued;
        self.status = FeedStatus::Loading;
        self.error = None;
        self.in_flight += 1;
        debug!(feed = self.source.name(), seq, "Fetch issued");

        let source = Arc::clone(&self.source);
        let filters = self.filters.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            // Fetch on an inner task so a panicking source still reports back.
            let fetch = tokio::spawn(async move { source.fetch(&filters).await });
            let result = match fetch.await {
                Ok(result) => result,
                Err(e) => Err(DevhubError::Task(e.to_string())),
            };
            let _ = tx.send(FeedResponse { seq, result });
        });

        seq
    }

    /// Change the filters, refetching if they differ from the current ones.
    ///
    /// Returns the new request's sequence number, or `None` when the filters
    /// were unchanged.
    pub fn set_filters(&mut self, filters: S::Filters) -> Option<u64> {
        if filters == self.filters {
            return None;
        }
        self.filters = filters;
        Some(self.refresh())
    }

    /// Apply a response according to the sequencing rules.
    ///
    /// Returns `true` when the response changed the loader state.
    pub fn apply(&mut self, response: FeedResponse<S::Item>) -> bool {
        let FeedResponse { seq, result } = response;
        let name = self.source.name();

        if seq <= self.applied || seq > self.issued {
            debug!(feed = name, seq, applied = self.applied, "Stale response discarded");
            return false;
        }
        let newest = seq == self.issued;

        match result {
            Ok(items) => {
                debug!(feed = name, seq, count = items.len(), newest, "Response applied");
                self.applied = seq;
                self.data = items;
                if newest {
                    self.status = FeedStatus::Success;
                }
                true
            }
            Err(e) if newest => {
                warn!(feed = name, seq, error = %e, "Error fetching {}", name);
                self.applied = seq;
                self.error = Some(format!("Failed to fetch {}", name));
                self.status = FeedStatus::Error;
                true
            }
            Err(e) => {
                debug!(feed = name, seq, error = %e, "Superseded request failed, ignored");
                false
            }
        }
    }

    /// Wait for the next response and apply it.
    ///
    /// Returns `None` immediately when nothing is in flight, otherwise
    /// whether the response was applied.
    pub async fn wait_next(&mut self) -> Option<bool> {
        if self.in_flight == 0 {
            return None;
        }
        let response = self.rx.recv().await?;
        self.in_flight -= 1;
        Some(self.apply(response))
    }

    /// Apply every response that has already arrived, without waiting.
    ///
    /// Returns how many of them changed the state.
    pub fn try_apply_ready(&mut self) -> usize {
        let mut changed = 0;
        while let Ok(response) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            if self.apply(response) {
                changed += 1;
            }
        }
        changed
    }

    /// Wait until the newest request has resolved.
    pub async fn settle(&mut self) -> FeedStatus {
        while self.status == FeedStatus::Loading {
            if self.wait_next().await.is_none() {
                break;
            }
        }
        self.status
    }

    pub fn status(&self) -> FeedStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FeedStatus::Loading
    }

    /// Last good data.
    pub fn data(&self) -> &[S::Item] {
        &self.data
    }

    /// User-facing error of the newest request, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filters(&self) -> &S::Filters {
        &self.filters
    }

    pub fn name(&self) -> &'static str {
        self.source.name()
    }

    /// Number of requests issued but not yet received.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    type Gate = oneshot::Sender<DevhubResult<Vec<String>>>;

    /// Source whose responses are released by hand, keyed by filter.
    #[derive(Default)]
    struct GatedSource {
        pending: Mutex<HashMap<String, oneshot::Receiver<DevhubResult<Vec<String>>>>>,
    }

    impl GatedSource {
        fn gate(&self, filter: &str) -> Gate {
            let (tx, rx) = oneshot::channel();
            self.pending.lock().unwrap().insert(filter.to_string(), rx);
            tx
        }
    }

    #[async_trait]
    impl FeedSource for GatedSource {
        type Item = String;
        type Filters = String;

        fn name(&self) -> &'static str {
            "gated"
        }

        async fn fetch(&self, filters: &String) -> DevhubResult<Vec<String>> {
            let rx = self.pending.lock().unwrap().remove(filters);
            match rx {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(DevhubError::Task("gate dropped".into()))),
                None => Err(DevhubError::Task(format!("no gate for {}", filters))),
            }
        }
    }

    fn items(values: &[&str]) -> DevhubResult<Vec<String>> {
        Ok(values.iter().map(|v| v.to_string()).collect())
    }

    fn failure() -> DevhubResult<Vec<String>> {
        Err(DevhubError::Api {
            status: 503,
            body: "unavailable".into(),
        })
    }

    fn loader(source: &Arc<GatedSource>, filter: &str) -> FeedLoader<GatedSource> {
        FeedLoader::with_filters(Arc::clone(source), filter.to_string())
    }

    #[tokio::test]
    async fn test_starts_idle() {
        let source = Arc::new(GatedSource::default());
        let mut feed = loader(&source, "a");
        assert_eq!(feed.status(), FeedStatus::Idle);
        assert!(feed.data().is_empty());
        assert_eq!(feed.wait_next().await, None);
        assert_eq!(feed.settle().await, FeedStatus::Idle);
    }

    #[tokio::test]
    async fn test_success_stores_data_verbatim() {
        let source = Arc::new(GatedSource::default());
        let gate = source.gate("a");
        let mut feed = loader(&source, "a");

        feed.refresh();
        assert!(feed.is_loading());
        gate.send(items(&["z", "a", "m"])).unwrap();

        assert_eq!(feed.settle().await, FeedStatus::Success);
        assert_eq!(feed.data(), ["z", "a", "m"]);
        assert_eq!(feed.error(), None);
        assert_eq!(feed.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_stale_response_after_newer_is_discarded() {
        let source = Arc::new(GatedSource::default());
        let gate_a = source.gate("a");
        let gate_b = source.gate("b");
        let mut feed = loader(&source, "a");

        let seq_a = feed.refresh();
        let seq_b = feed.set_filters("b".to_string()).unwrap();
        assert!(seq_b > seq_a);

        gate_b.send(items(&["b1"])).unwrap();
        assert_eq!(feed.wait_next().await, Some(true));
        assert_eq!(feed.status(), FeedStatus::Success);

        gate_a.send(items(&["a1"])).unwrap();
        assert_eq!(feed.wait_next().await, Some(false));

        assert_eq!(feed.status(), FeedStatus::Success);
        assert_eq!(feed.data(), ["b1"]);
        assert_eq!(feed.filters(), "b");
    }

    #[tokio::test]
    async fn test_older_response_first_keeps_loading() {
        let source = Arc::new(GatedSource::default());
        let gate_a = source.gate("a");
        let gate_b = source.gate("b");
        let mut feed = loader(&source, "a");

        feed.refresh();
        feed.set_filters("b".to_string());

        gate_a.send(items(&["a1"])).unwrap();
        assert_eq!(feed.wait_next().await, Some(true));
        assert_eq!(feed.data(), ["a1"]);
        assert!(feed.is_loading());

        gate_b.send(items(&["b1"])).unwrap();
        assert_eq!(feed.settle().await, FeedStatus::Success);
        assert_eq!(feed.data(), ["b1"]);
    }

    #[tokio::test]
    async fn test_error_keeps_last_good_data() {
        let source = Arc::new(GatedSource::default());
        let mut feed = loader(&source, "a");

        let gate = source.gate("a");
        feed.refresh();
        gate.send(items(&["x"])).unwrap();
        feed.settle().await;

        let gate = source.gate("a");
        feed.refresh();
        gate.send(failure()).unwrap();

        assert_eq!(feed.settle().await, FeedStatus::Error);
        assert_eq!(feed.error(), Some("Failed to fetch gated"));
        assert_eq!(feed.data(), ["x"]);
    }

    #[tokio::test]
    async fn test_refresh_clears_error_but_not_data() {
        let source = Arc::new(GatedSource::default());
        let mut feed = loader(&source, "a");

        let gate = source.gate("a");
        feed.refresh();
        gate.send(items(&["x"])).unwrap();
        feed.settle().await;

        let gate = source.gate("a");
        feed.refresh();
        gate.send(failure()).unwrap();
        feed.settle().await;
        assert!(feed.error().is_some());

        let gate = source.gate("a");
        feed.refresh();
        assert!(feed.is_loading());
        assert_eq!(feed.error(), None);
        assert_eq!(feed.data(), ["x"]);

        gate.send(items(&["y"])).unwrap();
        assert_eq!(feed.settle().await, FeedStatus::Success);
        assert_eq!(feed.data(), ["y"]);
    }

    #[tokio::test]
    async fn test_superseded_error_is_dropped() {
        let source = Arc::new(GatedSource::default());
        let gate_a = source.gate("a");
        let gate_b = source.gate("b");
        let mut feed = loader(&source, "a");

        feed.refresh();
        feed.set_filters("b".to_string());

        gate_a.send(failure()).unwrap();
        assert_eq!(feed.wait_next().await, Some(false));
        assert!(feed.is_loading());
        assert_eq!(feed.error(), None);

        gate_b.send(items(&["b1"])).unwrap();
        assert_eq!(feed.settle().await, FeedStatus::Success);
    }

    #[tokio::test]
    async fn test_unchanged_filters_do_not_refetch() {
        let source = Arc::new(GatedSource::default());
        let mut feed = loader(&source, "a");
        assert_eq!(feed.set_filters("a".to_string()), None);
        assert_eq!(feed.status(), FeedStatus::Idle);
        assert_eq!(feed.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_apply_rejects_unknown_sequence_numbers() {
        let source = Arc::new(GatedSource::default());
        let mut feed = loader(&source, "a");
        let response = FeedResponse {
            seq: 5,
            result: items(&["ghost"]),
        };
        assert!(!feed.apply(response));
        assert!(feed.data().is_empty());
    }

    #[tokio::test]
    async fn test_try_apply_ready() {
        let source = Arc::new(GatedSource::default());
        let gate = source.gate("a");
        let mut feed = loader(&source, "a");

        feed.refresh();
        assert_eq!(feed.try_apply_ready(), 0);

        gate.send(items(&["x"])).unwrap();
        while feed.try_apply_ready() == 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(feed.status(), FeedStatus::Success);
        assert_eq!(feed.in_flight(), 0);
    }

    struct PanickingSource;

    #[async_trait]
    impl FeedSource for PanickingSource {
        type Item = String;
        type Filters = ();

        fn name(&self) -> &'static str {
            "panicking"
        }

        async fn fetch(&self, _filters: &()) -> DevhubResult<Vec<String>> {
            panic!("source exploded");
        }
    }

    #[tokio::test]
    async fn test_panicking_source_ends_in_error() {
        let mut feed = FeedLoader::new(PanickingSource);
        feed.refresh();
        assert_eq!(feed.settle().await, FeedStatus::Error);
        assert_eq!(feed.error(), Some("Failed to fetch panicking"));
    }
}
