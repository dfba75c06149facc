use anyhow::{Context, Result};
use redis::{AsyncCommands, Client};
use std::sync::Arc;

use crate::domain::{VisitorRecord, VisitorStore, VisitorStorePtr, COUNT_FIELD};

/// Creates a Redis-backed store. Connections are opened lazily per operation.
pub fn create_redis_store(url: &str, namespace: &str) -> Result<VisitorStorePtr> {
    // ---
    let client = Client::open(url).context("Invalid Redis connection string")?;
    Ok(Arc::new(RedisStore::new(client, namespace)))
}

/// Stores each record as a Redis hash under `<namespace>:<id>`.
///
/// `HINCRBY` is atomic on the server and creates both the hash and the field
/// when they are missing.
pub struct RedisStore {
    // ---
    client: Client,
    namespace: String,
}

impl RedisStore {
    // ---
    pub fn new(client: Client, namespace: &str) -> Self {
        // ---
        Self {
            client,
            namespace: namespace.to_string(),
        }
    }

    fn key(&self, id: &str) -> String {
        // ---
        format!("{}:{}", self.namespace, id)
    }

    async fn get_conn(&self) -> Result<redis::aio::MultiplexedConnection> {
        // ---
        self.client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to connect to Redis")
    }
}

#[async_trait::async_trait]
impl VisitorStore for RedisStore {
    // ---
    async fn increment(&self, id: &str, field: &str, delta: u64) -> Result<()> {
        // ---
        let mut conn = self.get_conn().await?;

        let _: i64 = conn
            .hincr(self.key(id), field, delta)
            .await
            .with_context(|| format!("HINCRBY {field} on '{id}' failed"))?;

        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<VisitorRecord>> {
        // ---
        let mut conn = self.get_conn().await?;

        let count: Option<u64> = conn
            .hget(self.key(id), COUNT_FIELD)
            .await
            .with_context(|| format!("HGET {COUNT_FIELD} on '{id}' failed"))?;

        Ok(count.map(|count| VisitorRecord::new(id, count)))
    }
}
