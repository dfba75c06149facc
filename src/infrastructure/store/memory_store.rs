use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::{VisitorRecord, VisitorStore, VisitorStorePtr, COUNT_FIELD};

type Fields = HashMap<String, u64>;

/// Creates an empty in-process store.
pub fn create_memory_store() -> Result<VisitorStorePtr> {
    // ---
    Ok(Arc::new(MemoryStore::new()))
}

/// In-process store for local development and tests.
///
/// Records live as long as the process; every operation takes the lock once,
/// which makes `increment` atomic with respect to concurrent callers.
#[derive(Default)]
pub struct MemoryStore {
    // ---
    records: Mutex<HashMap<String, Fields>>,
}

impl MemoryStore {
    // ---
    pub fn new() -> Self {
        // ---
        Self::default()
    }

    /// Builds a store already holding `id` with the given visit count.
    pub fn with_count(id: &str, count_visitors: u64) -> Self {
        // ---
        let fields = HashMap::from([(COUNT_FIELD.to_string(), count_visitors)]);
        Self {
            records: Mutex::new(HashMap::from([(id.to_string(), fields)])),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Fields>>> {
        // ---
        self.records
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))
    }
}

#[async_trait::async_trait]
impl VisitorStore for MemoryStore {
    // ---
    async fn increment(&self, id: &str, field: &str, delta: u64) -> Result<()> {
        // ---
        let mut records = self.lock()?;
        let value = records
            .entry(id.to_string())
            .or_default()
            .entry(field.to_string())
            .or_insert(0);

        *value = value
            .checked_add(delta)
            .ok_or_else(|| anyhow!("counter '{field}' of '{id}' overflowed"))?;

        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<VisitorRecord>> {
        // ---
        let records = self.lock()?;
        let Some(fields) = records.get(id) else {
            return Ok(None);
        };

        let count = fields
            .get(COUNT_FIELD)
            .copied()
            .ok_or_else(|| anyhow!("record '{id}' has no '{COUNT_FIELD}' attribute"))?;

        Ok(Some(VisitorRecord::new(id, count)))
    }
}
