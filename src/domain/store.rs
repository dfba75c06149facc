use super::visitor::VisitorRecord;
use anyhow::Result;
use std::sync::Arc;

/// Abstraction over the key-value table holding the visitor record.
///
/// Implementations must apply `increment` atomically on the store side; the
/// handler never reads before writing and holds no locks of its own.
#[async_trait::async_trait]
pub trait VisitorStore: Send + Sync {
    // ---
    /// Atomically add `delta` to the numeric `field` of the record `id`.
    ///
    /// A missing record is created with the field starting at zero.
    async fn increment(&self, id: &str, field: &str, delta: u64) -> Result<()>;

    /// Point lookup of the record `id`. `Ok(None)` when no such record exists.
    async fn get(&self, id: &str) -> Result<Option<VisitorRecord>>;
}

/// Type alias for any backend that implements VisitorStore.
pub type VisitorStorePtr = Arc<dyn VisitorStore>;
