use super::memory_store::*;
use crate::domain::{VisitorRecord, VisitorStore, COUNT_FIELD, VISITOR_RECORD_ID};
use std::sync::Arc;

#[tokio::test]
async fn missing_record_reads_as_none() {
    // ---
    let store = MemoryStore::new();

    let record = store.get(VISITOR_RECORD_ID).await.unwrap();
    assert_eq!(record, None);
}

#[tokio::test]
async fn increment_creates_missing_record() {
    // ---
    let store = MemoryStore::new();

    store.increment(VISITOR_RECORD_ID, COUNT_FIELD, 1).await.unwrap();

    let record = store.get(VISITOR_RECORD_ID).await.unwrap();
    assert_eq!(record, Some(VisitorRecord::new(VISITOR_RECORD_ID, 1)));
}

#[tokio::test]
async fn increment_adds_to_seeded_count() {
    // ---
    let store = MemoryStore::with_count(VISITOR_RECORD_ID, 41);

    store.increment(VISITOR_RECORD_ID, COUNT_FIELD, 1).await.unwrap();
    store.increment(VISITOR_RECORD_ID, COUNT_FIELD, 1).await.unwrap();

    let record = store.get(VISITOR_RECORD_ID).await.unwrap().unwrap();
    assert_eq!(record.count_visitors, 43);
}

#[tokio::test]
async fn record_without_counter_field_is_an_error() {
    // ---
    let store = MemoryStore::new();
    store.increment(VISITOR_RECORD_ID, "other_field", 1).await.unwrap();

    assert!(store.get(VISITOR_RECORD_ID).await.is_err());
}

#[tokio::test]
async fn overflow_is_reported() {
    // ---
    let store = MemoryStore::with_count(VISITOR_RECORD_ID, u64::MAX);

    assert!(store.increment(VISITOR_RECORD_ID, COUNT_FIELD, 1).await.is_err());

    let record = store.get(VISITOR_RECORD_ID).await.unwrap().unwrap();
    assert_eq!(record.count_visitors, u64::MAX);
}

#[tokio::test]
async fn concurrent_increments_are_not_lost() {
    // ---
    let store = Arc::new(MemoryStore::new());

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.increment(VISITOR_RECORD_ID, COUNT_FIELD, 1).await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let record = store.get(VISITOR_RECORD_ID).await.unwrap().unwrap();
    assert_eq!(record.count_visitors, 50);
}
