//! Test doubles shared by the unit tests.

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::subscriber::DefaultGuard;

use feed_search_repository::{ClusterHealth, HealthStatus, SearchEngineClient, SearchError};
use feed_search_shared::{PostDocument, SearchQuery, SearchResponse};

pub fn post(id: &str, text: &str) -> PostDocument {
    PostDocument::new(id, text, "Title", Utc::now(), "Author")
}

/// Log lines written while a [`capture_logs`] guard is held.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<StdMutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut bytes) = self.0.lock() {
            bytes.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route this thread's tracing output into a buffer until the guard drops.
pub fn capture_logs() -> (DefaultGuard, LogBuffer) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    (tracing::subscriber::set_default(subscriber), buffer)
}

/// Mock engine that records calls and can be told to fail.
#[derive(Default)]
pub struct MockEngine {
    index_exists: AtomicBool,
    should_fail: bool,
    should_fail_create: bool,
    unhealthy_polls: AtomicUsize,
    exists_calls: AtomicUsize,
    create_calls: AtomicUsize,
    index_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    health_calls: AtomicUsize,
    created_body: Mutex<Option<Value>>,
    queries: Mutex<Vec<SearchQuery>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the index already present.
    pub fn with_existing_index(self) -> Self {
        self.index_exists.store(true, Ordering::SeqCst);
        self
    }

    /// Fail every index, document and search call.
    pub fn failing(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Fail only index creation; the existence check still reports no index.
    pub fn failing_create(mut self) -> Self {
        self.should_fail_create = true;
        self
    }

    /// Fail the next `polls` health checks.
    pub fn unhealthy_for(self, polls: usize) -> Self {
        self.unhealthy_polls.store(polls, Ordering::SeqCst);
        self
    }

    pub fn set_healthy(&self) {
        self.unhealthy_polls.store(0, Ordering::SeqCst);
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn index_calls(&self) -> usize {
        self.index_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    pub async fn created_body(&self) -> Option<Value> {
        self.created_body.lock().await.clone()
    }

    pub async fn queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().await.clone()
    }
}

#[async_trait]
impl SearchEngineClient for MockEngine {
    async fn index_exists(&self, _index: &str) -> Result<bool, SearchError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(SearchError::connection("Mock failure"));
        }
        Ok(self.index_exists.load(Ordering::SeqCst))
    }

    async fn create_index(&self, _index: &str, body: &Value) -> Result<(), SearchError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail || self.should_fail_create {
            return Err(SearchError::index_creation("Mock failure"));
        }
        *self.created_body.lock().await = Some(body.clone());
        self.index_exists.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn index_document(
        &self,
        _index: &str,
        _document: &PostDocument,
    ) -> Result<(), SearchError> {
        self.index_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(SearchError::index("Mock failure"));
        }
        Ok(())
    }

    async fn delete_document(&self, _index: &str, _id: &str) -> Result<(), SearchError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(SearchError::delete("Mock failure"));
        }
        Ok(())
    }

    async fn search(
        &self,
        _index: &str,
        query: &SearchQuery,
    ) -> Result<SearchResponse, SearchError> {
        if self.should_fail {
            return Err(SearchError::query("Mock failure"));
        }
        self.queries.lock().await.push(query.clone());
        Ok(SearchResponse::default())
    }

    async fn health_check(&self) -> Result<ClusterHealth, SearchError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.unhealthy_polls.load(Ordering::SeqCst);
        if remaining > 0 {
            self.unhealthy_polls.store(remaining - 1, Ordering::SeqCst);
            return Err(SearchError::connection("connection refused"));
        }
        Ok(ClusterHealth {
            cluster_name: "mock".to_string(),
            status: HealthStatus::Green,
            number_of_nodes: 1,
        })
    }
}
