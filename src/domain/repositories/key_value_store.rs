//! Store capability used by every component of the shortening pipeline.

use async_trait::async_trait;
use std::time::Duration;

/// Errors raised by a key-value store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store operation error: {0}")]
    Operation(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Remaining lifetime of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTtl {
    /// The key does not exist (or has already expired).
    Missing,
    /// The key exists without an expiry.
    Persistent,
    /// The key expires after the given duration.
    Expires(Duration),
}

/// Networked key-value store with expiring keys.
///
/// Each instance addresses a single namespace. Single-key operations are
/// expected to be atomic; no multi-key transactions are used.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis database
/// - [`crate::infrastructure::store::MemoryStore`] - In-process map for tests and local runs
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored at `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` at `key`, replacing any previous value, expiring after `ttl`.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()>;

    /// Atomically decrements the integer at `key` and returns the new value.
    ///
    /// A missing key is treated as `0`. The key's TTL is left untouched.
    async fn decr(&self, key: &str) -> StoreResult<i64>;

    /// Reads the remaining lifetime of `key`.
    async fn ttl(&self, key: &str) -> StoreResult<KeyTtl>;

    /// Sets an expiry on an existing key. Returns `false` if the key is missing.
    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<bool>;

    /// Checks whether the backend is reachable.
    async fn ping(&self) -> bool;
}
