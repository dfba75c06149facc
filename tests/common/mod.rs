// Test helpers are intentionally partially used
#![allow(dead_code)]

use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use visitor_counter::domain::{VisitorRecord, VisitorStore, VisitorStorePtr, VISITOR_RECORD_ID};
use visitor_counter::{create_noop_metrics, MemoryStore, ResponseHeaders, VisitorHandler};

pub const TEST_ORIGIN: &str = "https://www.thepott.dev";

// ============================================================================
// Store doubles
// ============================================================================

/// Wraps a [`MemoryStore`] and counts every call that reaches it.
pub struct CountingStore {
    inner: MemoryStore,
    increments: AtomicUsize,
    reads: AtomicUsize,
}

impl CountingStore {
    // ---
    pub fn with_count(count_visitors: u64) -> Self {
        // ---
        Self {
            inner: MemoryStore::with_count(VISITOR_RECORD_ID, count_visitors),
            increments: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn increments(&self) -> usize {
        self.increments.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl VisitorStore for CountingStore {
    // ---
    async fn increment(&self, id: &str, field: &str, delta: u64) -> Result<()> {
        // ---
        self.increments.fetch_add(1, Ordering::SeqCst);
        self.inner.increment(id, field, delta).await
    }

    async fn get(&self, id: &str) -> Result<Option<VisitorRecord>> {
        // ---
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get(id).await
    }
}

/// A store whose every call fails, as if the table were unreachable.
pub struct UnreachableStore;

#[async_trait::async_trait]
impl VisitorStore for UnreachableStore {
    // ---
    async fn increment(&self, _id: &str, _field: &str, _delta: u64) -> Result<()> {
        Err(anyhow!("dispatch failure: connection refused (secret-host:8000)"))
    }

    async fn get(&self, _id: &str) -> Result<Option<VisitorRecord>> {
        Err(anyhow!("dispatch failure: connection refused (secret-host:8000)"))
    }
}

// ============================================================================
// Handler setup
// ============================================================================

pub fn test_handler(store: VisitorStorePtr) -> VisitorHandler {
    // ---
    VisitorHandler::new(
        store,
        ResponseHeaders::new(TEST_ORIGIN),
        create_noop_metrics().expect("noop metrics"),
    )
}

/// Handler plus a handle on its counting store.
pub fn counting_handler(count_visitors: u64) -> (VisitorHandler, Arc<CountingStore>) {
    // ---
    let store = Arc::new(CountingStore::with_count(count_visitors));
    (test_handler(store.clone()), store)
}

pub fn event(method: &str, path: &str) -> Value {
    // ---
    json!({
        "resource": path,
        "httpMethod": method,
        "path": path,
        "headers": { "Accept": "application/json" },
        "queryStringParameters": null,
        "body": null,
        "isBase64Encoded": false
    })
}

pub fn expected_headers() -> Value {
    // ---
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Headers": "Content-Type",
        "Access-Control-Allow-Origin": TEST_ORIGIN,
        "Access-Control-Allow-Methods": "OPTIONS,POST,GET"
    })
}
