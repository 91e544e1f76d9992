//! Search pipeline orchestration.
//!
//! One dispatch = one request token. The token is bumped before anything else
//! happens, so a newer dispatch always supersedes the previous one: a worker
//! whose token is no longer current drops its result instead of sending it,
//! and the consumer re-checks with `is_current` for anything that raced past.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use crossbeam_channel as channel;
use tracing::{debug, info, warn};

use crate::search::connectivity::Connectivity;
use crate::search::extract::extract;
use crate::search::fetch::BookFetch;
use crate::search::models::{ErrorKind, SearchRequest, SearchResult};
use crate::search::query::QueryBuilder;

/// Loader emission toward the presentation side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Started { token: u64 },
    Finished { token: u64, result: SearchResult },
}

impl SearchEvent {
    pub fn token(&self) -> u64 {
        match self {
            SearchEvent::Started { token } => *token,
            SearchEvent::Finished { token, .. } => *token,
        }
    }
}

pub struct SearchLoader {
    builder: QueryBuilder,
    gate: Arc<dyn Connectivity>,
    fetcher: Arc<dyn BookFetch>,
    epoch: Arc<AtomicU64>,
    tx: channel::Sender<SearchEvent>,
}

impl SearchLoader {
    pub fn new(
        builder: QueryBuilder,
        gate: Arc<dyn Connectivity>,
        fetcher: Arc<dyn BookFetch>,
    ) -> (Self, channel::Receiver<SearchEvent>) {
        let (tx, rx) = channel::unbounded();
        let loader = Self {
            builder,
            gate,
            fetcher,
            epoch: Arc::new(AtomicU64::new(0)),
            tx,
        };
        (loader, rx)
    }

    pub fn current_token(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Whether `token` still belongs to the newest dispatch. Consumers must
    /// drop any event that fails this check before projecting UI state.
    pub fn is_current(&self, token: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == token
    }

    /// Start a new search, superseding any in-flight one.
    ///
    /// The connectivity check runs on the calling thread (it is cheap); fetch
    /// and decode run on a worker thread so the caller is never blocked on
    /// network I/O. Returns the request token for event filtering.
    pub fn dispatch(&self, raw_query: &str) -> u64 {
        let token = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let request = self.builder.build(raw_query);
        info!("dispatch #{token}: {:?}", request.raw_query);

        if !self.gate.is_reachable() {
            info!("dispatch #{token}: network unreachable, skipping fetch");
            let _ = self.tx.send(SearchEvent::Finished {
                token,
                result: SearchResult::NoConnection,
            });
            return token;
        }

        let _ = self.tx.send(SearchEvent::Started { token });

        let fetcher = Arc::clone(&self.fetcher);
        let epoch = Arc::clone(&self.epoch);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = run_pipeline(fetcher.as_ref(), &request);
            if epoch.load(Ordering::SeqCst) != token {
                debug!("request #{token} superseded, result dropped");
                return;
            }
            let _ = tx.send(SearchEvent::Finished { token, result });
        });

        token
    }
}

/// Fetch and decode one request. Failures collapse to the coarse taxonomy
/// here; nothing past this point sees a raw error.
fn run_pipeline(fetcher: &dyn BookFetch, request: &SearchRequest) -> SearchResult {
    let body = match fetcher.fetch(&request.encoded_url) {
        Ok(body) => body,
        Err(err) => {
            warn!("fetch failed for {:?}: {err}", request.raw_query);
            return SearchResult::Failure(ErrorKind::Network);
        }
    };

    match extract(&body) {
        Ok(books) if books.is_empty() => SearchResult::Empty,
        Ok(books) => SearchResult::Success(books),
        Err(err) => {
            warn!("decode failed for {:?}: {err}", request.raw_query);
            SearchResult::Failure(ErrorKind::Parse)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::fetch::FetchError;
    use crate::search::models::Book;
    use std::sync::atomic::AtomicUsize;
    use std::time::{Duration, Instant};

    struct GateStub(bool);

    impl Connectivity for GateStub {
        fn is_reachable(&self) -> bool {
            self.0
        }
    }

    struct FnFetcher<F>(F)
    where
        F: Fn(&str) -> Result<Vec<u8>, FetchError> + Send + Sync;

    impl<F> BookFetch for FnFetcher<F>
    where
        F: Fn(&str) -> Result<Vec<u8>, FetchError> + Send + Sync,
    {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            (self.0)(url)
        }
    }

    fn volumes_body(title: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "items": [{"volumeInfo": {
                "title": title,
                "authors": ["Author"],
                "infoLink": "https://books.example/1",
            }}]
        }))
        .unwrap()
    }

    fn loader_with(
        gate: bool,
        fetcher: impl Fn(&str) -> Result<Vec<u8>, FetchError> + Send + Sync + 'static,
    ) -> (SearchLoader, channel::Receiver<SearchEvent>) {
        SearchLoader::new(
            QueryBuilder::default(),
            Arc::new(GateStub(gate)),
            Arc::new(FnFetcher(fetcher)),
        )
    }

    fn recv(rx: &channel::Receiver<SearchEvent>) -> SearchEvent {
        rx.recv_timeout(Duration::from_secs(5)).unwrap()
    }

    /// Drain events the way a consumer would: stale tokens are dropped, and
    /// the terminal state for the newest token is returned.
    fn settle(loader: &SearchLoader, rx: &channel::Receiver<SearchEvent>) -> SearchResult {
        loop {
            let event = recv(rx);
            if !loader.is_current(event.token()) {
                continue;
            }
            if let SearchEvent::Finished { result, .. } = event {
                return result;
            }
        }
    }

    #[test]
    fn unreachable_gate_short_circuits_with_zero_fetches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let (loader, rx) = loader_with(false, move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok(volumes_body("never"))
        });

        let token = loader.dispatch("rust");
        match recv(&rx) {
            SearchEvent::Finished { token: t, result } => {
                assert_eq!(t, token);
                assert_eq!(result, SearchResult::NoConnection);
            }
            other => panic!("expected Finished, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn success_empty_and_failures_map_to_results() {
        let (loader, rx) = loader_with(true, |url| {
            if url.contains("hit") {
                Ok(volumes_body("Found"))
            } else if url.contains("none") {
                Ok(b"{\"items\": []}".to_vec())
            } else if url.contains("garbled") {
                Ok(b"not json".to_vec())
            } else {
                Err(FetchError::HttpStatus(500))
            }
        });

        loader.dispatch("hit");
        match settle(&loader, &rx) {
            SearchResult::Success(books) => {
                assert_eq!(
                    books,
                    vec![Book {
                        title: "Found".to_string(),
                        author: "Author".to_string(),
                        info_url: "https://books.example/1".to_string(),
                    }]
                );
            }
            other => panic!("expected Success, got {other:?}"),
        }

        loader.dispatch("none");
        assert_eq!(settle(&loader, &rx), SearchResult::Empty);

        loader.dispatch("garbled");
        assert_eq!(
            settle(&loader, &rx),
            SearchResult::Failure(ErrorKind::Parse)
        );

        loader.dispatch("boom");
        assert_eq!(
            settle(&loader, &rx),
            SearchResult::Failure(ErrorKind::Network)
        );
    }

    #[test]
    fn dispatch_emits_started_before_finished() {
        let (loader, rx) = loader_with(true, |_| Ok(volumes_body("x")));
        let token = loader.dispatch("rust");
        assert_eq!(recv(&rx), SearchEvent::Started { token });
        assert!(matches!(recv(&rx), SearchEvent::Finished { token: t, .. } if t == token));
    }

    #[test]
    fn late_result_of_superseded_request_never_surfaces() {
        let (release_tx, release_rx) = channel::unbounded::<()>();
        let (loader, rx) = loader_with(true, move |url| {
            if url.contains("slow") {
                release_rx.recv().unwrap();
                Ok(volumes_body("Slow"))
            } else {
                Ok(volumes_body("Fast"))
            }
        });

        let slow = loader.dispatch("slow");
        let fast = loader.dispatch("fast");
        assert_ne!(slow, fast);

        // The fast request finishes while the slow one is still parked.
        assert_eq!(settle(&loader, &rx), SearchResult::Success(vec![Book {
            title: "Fast".to_string(),
            author: "Author".to_string(),
            info_url: "https://books.example/1".to_string(),
        }]));

        // Now let the superseded worker complete; its result must be dropped.
        release_tx.send(()).unwrap();
        match rx.recv_timeout(Duration::from_millis(500)) {
            Err(channel::RecvTimeoutError::Timeout) => {}
            other => panic!("superseded result leaked: {other:?}"),
        }
    }

    #[test]
    fn stale_event_already_queued_is_dropped_by_is_current() {
        let (loader, rx) = loader_with(true, |_| Ok(volumes_body("First")));

        let first = loader.dispatch("first");
        // Wait for the first request's Started + Finished to sit in the queue.
        let deadline = Instant::now() + Duration::from_secs(5);
        while rx.len() < 2 {
            assert!(Instant::now() < deadline, "first request never finished");
            thread::sleep(Duration::from_millis(10));
        }

        let second = loader.dispatch("second");
        assert!(!loader.is_current(first));

        // Consumer-side filtering must surface only the second outcome.
        let result = settle(&loader, &rx);
        assert_eq!(loader.current_token(), second);
        assert!(matches!(result, SearchResult::Success(_)));
    }
}
