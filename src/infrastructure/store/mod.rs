//! Key-value store backends.
//!
//! - [`RedisStore`] - Production Redis backend, one logical database per namespace
//! - [`MemoryStore`] - In-process backend for tests and local development

mod memory_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
