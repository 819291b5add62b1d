//! Debounced, cancellable search
//!
//! Each [`SearchSession::submit`] cancels the search in flight and starts a
//! new one on a background thread. The worker sleeps for the debounce, runs
//! the read-only search against the shared [`CatalogIndex`] and sends the
//! outcome back. The owning context publishes outcomes in [`poll`], which
//! drops anything cancelled or superseded, so a slow stale query can never
//! overwrite a newer one.
//!
//! [`poll`]: SearchSession::poll

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::catalog::Node;
use crate::store::CatalogIndex;

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(2);

/// Cooperative cancellation flag shared with a background search.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

struct SearchOutcome {
    generation: u64,
    query: String,
    token: CancellationToken,
    nodes: Vec<Node>,
}

pub struct SearchSession {
    index: Arc<CatalogIndex>,
    debounce: Duration,
    generation: u64,
    in_flight: Option<CancellationToken>,
    tx: async_channel::Sender<SearchOutcome>,
    rx: async_channel::Receiver<SearchOutcome>,
    results: Vec<Node>,
    published_query: Option<String>,
}

impl SearchSession {
    pub fn new(index: Arc<CatalogIndex>, debounce: Duration) -> Self {
        let (tx, rx) = async_channel::unbounded();
        Self {
            index,
            debounce,
            generation: 0,
            in_flight: None,
            tx,
            rx,
            results: Vec::new(),
            published_query: None,
        }
    }

    /// Start searching for `query`, cancelling any search in flight.
    ///
    /// A blank query clears the results immediately without a background task.
    pub fn submit(&mut self, query: &str) {
        self.cancel();
        self.generation += 1;

        if query.trim().is_empty() {
            self.results.clear();
            self.published_query = None;
            return;
        }

        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());

        let generation = self.generation;
        let query = query.to_string();
        let index = Arc::clone(&self.index);
        let debounce = self.debounce;
        let tx = self.tx.clone();

        let spawned = thread::Builder::new()
            .name("catalog-search".to_string())
            .spawn(move || {
                if !debounce.is_zero() {
                    thread::sleep(debounce);
                }
                if token.is_cancelled() {
                    return;
                }

                let nodes = index.search(&query);

                if token.is_cancelled() {
                    debug!(query = %query, "Search cancelled before publish");
                    return;
                }
                let outcome = SearchOutcome {
                    generation,
                    query,
                    token,
                    nodes,
                };
                // send_blocking since this is a plain thread; a closed channel means the session is gone
                let _ = tx.send_blocking(outcome);
            });

        if let Err(err) = spawned {
            warn!(error = %err, "Failed to spawn search thread");
            self.in_flight = None;
        }
    }

    /// Cancel the search in flight, if any. Published results are kept.
    pub fn cancel(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }

    pub fn is_searching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Publish any finished search. Returns true when results changed.
    pub fn poll(&mut self) -> bool {
        let mut published = false;
        while let Ok(outcome) = self.rx.try_recv() {
            if outcome.token.is_cancelled() || outcome.generation != self.generation {
                debug!(query = %outcome.query, "Discarding stale search result");
                continue;
            }
            debug!(
                query = %outcome.query,
                result_count = outcome.nodes.len(),
                "Publishing search results"
            );
            self.results = outcome.nodes;
            self.published_query = Some(outcome.query);
            self.in_flight = None;
            published = true;
        }
        published
    }

    /// Poll until the current search publishes or `timeout` elapses.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.poll() {
                return true;
            }
            if self.in_flight.is_none() || Instant::now() >= deadline {
                return false;
            }
            thread::sleep(WAIT_POLL_INTERVAL);
        }
    }

    pub fn results(&self) -> &[Node] {
        &self.results
    }

    /// The query whose results are currently published.
    pub fn published_query(&self) -> Option<&str> {
        self.published_query.as_deref()
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.cancel();
    }
}
