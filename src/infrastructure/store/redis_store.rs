//! Redis-backed key-value store.

use crate::domain::repositories::{KeyTtl, KeyValueStore, StoreError, StoreResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// A single Redis logical database used as one key namespace.
///
/// Uses `ConnectionManager` for connection reuse and automatic reconnects.
/// Unlike a cache, every error is propagated: the store is the source of truth.
pub struct RedisStore {
    client: ConnectionManager,
    name: &'static str,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// `redis_url` must already select the logical database for this namespace
    /// (e.g. `redis://localhost:6379/1`). `name` is used in logs only.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, name: &'static str) -> StoreResult<Self> {
        info!("Connecting {} store to Redis", name);

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ {} store connected", name);

        Ok(Self {
            client: manager,
            name,
        })
    }
}

fn op_error(command: &str, e: redis::RedisError) -> StoreError {
    if e.is_io_error() || e.is_connection_dropped() {
        StoreError::Connection(format!("{} failed: {}", command, e))
    } else {
        StoreError::Operation(format!("{} failed: {}", command, e))
    }
}

/// Converts a Redis `TTL` reply (`-2` missing, `-1` no expiry).
fn ttl_from_reply(seconds: i64) -> KeyTtl {
    match seconds {
        -2 => KeyTtl::Missing,
        s if s < 0 => KeyTtl::Persistent,
        s => KeyTtl::Expires(Duration::from_secs(s as u64)),
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.client.clone();
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| op_error("GET", e))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
        let mut conn = self.client.clone();
        // SETEX rejects a zero expiry
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, value, seconds)
            .await
            .map_err(|e| op_error("SETEX", e))?;
        debug!("{} SET {} (TTL: {}s)", self.name, key, seconds);
        Ok(())
    }

    async fn decr(&self, key: &str) -> StoreResult<i64> {
        let mut conn = self.client.clone();
        conn.decr::<_, _, i64>(key, 1)
            .await
            .map_err(|e| op_error("DECR", e))
    }

    async fn ttl(&self, key: &str) -> StoreResult<KeyTtl> {
        let mut conn = self.client.clone();
        let seconds = conn
            .ttl::<_, i64>(key)
            .await
            .map_err(|e| op_error("TTL", e))?;
        Ok(ttl_from_reply(seconds))
    }

    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<bool> {
        let mut conn = self.client.clone();
        let seconds = ttl.as_secs().max(1) as i64;
        conn.expire::<_, bool>(key, seconds)
            .await
            .map_err(|e| op_error("EXPIRE", e))
    }

    async fn ping(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_reply_missing() {
        assert_eq!(ttl_from_reply(-2), KeyTtl::Missing);
    }

    #[test]
    fn test_ttl_reply_persistent() {
        assert_eq!(ttl_from_reply(-1), KeyTtl::Persistent);
    }

    #[test]
    fn test_ttl_reply_expiring() {
        assert_eq!(
            ttl_from_reply(1800),
            KeyTtl::Expires(Duration::from_secs(1800))
        );
    }
}
