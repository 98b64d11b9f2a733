//! End-to-end session flows against a scripted catalog.
//!
//! These tests run the real driver loop on a paused clock, with a catalog
//! whose per-query latency is scripted. That makes out-of-order completions
//! reproducible, which is where most session bugs live.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use cinevision_core::driver::Driver;
use cinevision_core::engine::{Engine, Message};
use cinevision_core::input::Key;
use cinevision_core::providers::{CatalogProvider, ProviderError};
use cinevision_core::EngineConfig;
use cinevision_model::{
    ImagePath, MediaDetails, MediaKey, MediaKind, SearchPage, SearchResult,
};

enum Reply {
    Page(Vec<u64>),
    Fail,
}

/// Catalog stub whose responses and latencies are scripted per query.
struct ScriptedCatalog {
    scripts: HashMap<String, (Duration, Reply)>,
    detail_latency: Duration,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl ScriptedCatalog {
    fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            detail_latency: Duration::from_millis(10),
            search_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    fn script(mut self, query: &str, latency_ms: u64, ids: &[u64]) -> Self {
        self.scripts.insert(
            query.to_string(),
            (Duration::from_millis(latency_ms), Reply::Page(ids.to_vec())),
        );
        self
    }

    fn script_failure(mut self, query: &str, latency_ms: u64) -> Self {
        self.scripts.insert(
            query.to_string(),
            (Duration::from_millis(latency_ms), Reply::Fail),
        );
        self
    }

    fn with_detail_latency(mut self, latency_ms: u64) -> Self {
        self.detail_latency = Duration::from_millis(latency_ms);
        self
    }

    fn result(id: u64) -> SearchResult {
        SearchResult {
            key: MediaKey::new(MediaKind::Movie, id),
            title: format!("Movie {id}"),
            poster_path: Some(ImagePath::new(format!("/poster-{id}.jpg"))),
            backdrop_path: None,
            rating: 6.5,
            release_date: "2005-06-10".to_string(),
            overview: String::new(),
        }
    }
}

#[async_trait]
impl CatalogProvider for ScriptedCatalog {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, ProviderError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let Some((latency, reply)) = self.scripts.get(query) else {
            return Ok(SearchPage {
                results: vec![],
                page,
                total_pages: 1,
            });
        };
        sleep(*latency).await;
        match reply {
            Reply::Page(ids) => Ok(SearchPage {
                results: ids.iter().copied().map(Self::result).collect(),
                page,
                total_pages: 1,
            }),
            Reply::Fail => Err(ProviderError::ApiError("scripted failure".to_string())),
        }
    }

    async fn details(&self, _key: MediaKey) -> Result<MediaDetails, ProviderError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        sleep(self.detail_latency).await;
        Ok(MediaDetails {
            genres: vec!["Action".to_string()],
            runtime_minutes: Some(120),
            cast: vec![],
            backdrop_path: None,
        })
    }

    fn name(&self) -> &'static str {
        "scripted"
    }

    fn image_base_url(&self) -> &str {
        "https://image.tmdb.org/t/p"
    }
}

fn spawn(catalog: &Arc<ScriptedCatalog>) -> Driver {
    Driver::spawn(
        Engine::new(EngineConfig::default()),
        Arc::clone(catalog),
        |_| {},
    )
}

#[tokio::test(start_paused = true)]
async fn a_slow_response_for_an_abandoned_query_is_discarded() {
    let catalog = Arc::new(
        ScriptedCatalog::new()
            .script("slow", 300, &[1, 2])
            .script("fast", 10, &[7, 8, 9]),
    );
    let driver = spawn(&catalog);
    driver.send(Message::QueryFocusChanged(true));

    driver.send(Message::QueryEdited("slow".to_string()));
    driver.send(Message::KeyPressed(Key::Enter));
    sleep(Duration::from_millis(50)).await;

    driver.send(Message::QueryEdited("fast".to_string()));
    driver.send(Message::KeyPressed(Key::Enter));
    sleep(Duration::from_millis(20)).await;

    // The fast response has already been applied.
    assert_eq!(driver.latest().items.len(), 3);

    // The slow response lands now and must change nothing.
    sleep(Duration::from_millis(300)).await;
    let snapshot = driver.latest();
    assert_eq!(snapshot.items.len(), 3);
    assert_eq!(snapshot.committed_query.as_deref(), Some("fast"));
    assert!(snapshot.error.is_none());
    assert_eq!(catalog.search_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn wiggling_focus_issues_one_detail_request_per_item() {
    let catalog = Arc::new(
        ScriptedCatalog::new()
            .script("m", 5, &[1, 2])
            .with_detail_latency(200),
    );
    let driver = spawn(&catalog);

    driver.send(Message::QueryEdited("m".to_string()));
    sleep(Duration::from_millis(500)).await;
    assert_eq!(driver.latest().items.len(), 2);

    // Wiggle while both enrichment calls are still in flight.
    driver.send(Message::KeyPressed(Key::ArrowRight));
    driver.send(Message::KeyPressed(Key::ArrowLeft));
    driver.send(Message::KeyPressed(Key::ArrowRight));
    driver.send(Message::KeyPressed(Key::ArrowLeft));
    sleep(Duration::from_millis(300)).await;

    assert_eq!(catalog.detail_calls.load(Ordering::SeqCst), 2);
    let snapshot = driver.latest();
    assert_eq!(snapshot.focus, 0);
    assert!(snapshot.focused_details.is_some());
}

#[tokio::test(start_paused = true)]
async fn clearing_the_query_never_touches_the_network() {
    let catalog = Arc::new(ScriptedCatalog::new().script("q", 5, &[1]));
    let driver = spawn(&catalog);

    driver.send(Message::QueryEdited("q".to_string()));
    sleep(Duration::from_millis(500)).await;
    assert_eq!(driver.latest().items.len(), 1);

    driver.send(Message::KeyPressed(Key::Escape));
    sleep(Duration::from_millis(10)).await;
    let snapshot = driver.latest();
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.query, "");

    // A whitespace-only commit clears again instead of searching.
    driver.send(Message::QueryEdited("   ".to_string()));
    sleep(Duration::from_millis(600)).await;
    assert!(driver.latest().committed_query.is_none());
    assert_eq!(catalog.search_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn a_provider_failure_surfaces_the_canned_message() {
    let catalog = Arc::new(
        ScriptedCatalog::new()
            .script("good", 5, &[1, 2])
            .script_failure("bad", 5),
    );
    let driver = spawn(&catalog);

    driver.send(Message::QueryEdited("good".to_string()));
    sleep(Duration::from_millis(500)).await;
    assert_eq!(driver.latest().items.len(), 2);

    driver.send(Message::QueryEdited("bad".to_string()));
    sleep(Duration::from_millis(500)).await;

    let snapshot = driver.latest();
    assert_eq!(snapshot.error.as_deref(), Some("Failed to fetch results."));
    assert!(!snapshot.is_searching);
    // The previous results stay on the stage.
    assert_eq!(snapshot.items.len(), 2);
}
