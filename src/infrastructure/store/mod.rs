mod dynamodb_store;
mod memory_store;
mod redis_store;

#[cfg(test)]
mod tests;

pub use dynamodb_store::create_dynamodb_store;
pub use memory_store::{create_memory_store, MemoryStore};
pub use redis_store::create_redis_store;
