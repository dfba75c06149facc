pub mod metrics;
mod store;

// Re-export the factory functions for easy access
pub use self::metrics::{create_noop_metrics, create_prom_metrics};
pub use store::{
    create_dynamodb_store, // ---
    create_memory_store,
    create_redis_store,
    MemoryStore,
};
