//! In-process key-value store with expiring keys.

use crate::domain::repositories::{KeyTtl, KeyValueStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// A store kept entirely in memory.
///
/// Mirrors the Redis semantics the service relies on (lazy expiry, `DECR` on a
/// missing key starting from zero, TTL preserved across `DECR`). Expiry is
/// measured on the Tokio clock, so tests can pause and advance time.
///
/// # Use Cases
///
/// - Unit and integration tests
/// - Local development without Redis (`STORE_BACKEND=memory`)
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using MemoryStore");
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Operation("memory store lock poisoned".to_string()))
    }

    /// Returns the live entry for `key`, evicting it first if it has expired.
    fn live_entry<'a>(
        entries: &'a mut HashMap<String, Entry>,
        key: &str,
        now: Instant,
    ) -> Option<&'a mut Entry> {
        if entries.get(key).is_some_and(|e| !e.is_live(now)) {
            entries.remove(key);
        }
        entries.get_mut(key)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut entries = self.lock()?;
        Ok(Self::live_entry(&mut entries, key, Instant::now()).map(|e| e.value.clone()))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
        let mut entries = self.lock()?;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Some(Instant::now() + ttl),
            },
        );
        Ok(())
    }

    async fn decr(&self, key: &str) -> StoreResult<i64> {
        let mut entries = self.lock()?;
        let now = Instant::now();

        match Self::live_entry(&mut entries, key, now) {
            Some(entry) => {
                let current: i64 = entry.value.parse().map_err(|_| {
                    StoreError::Operation("value is not an integer or out of range".to_string())
                })?;
                let next = current - 1;
                entry.value = next.to_string();
                Ok(next)
            }
            None => {
                entries.insert(
                    key.to_string(),
                    Entry {
                        value: "-1".to_string(),
                        expires_at: None,
                    },
                );
                Ok(-1)
            }
        }
    }

    async fn ttl(&self, key: &str) -> StoreResult<KeyTtl> {
        let mut entries = self.lock()?;
        let now = Instant::now();

        Ok(match Self::live_entry(&mut entries, key, now) {
            None => KeyTtl::Missing,
            Some(Entry {
                expires_at: None, ..
            }) => KeyTtl::Persistent,
            Some(Entry {
                expires_at: Some(at),
                ..
            }) => KeyTtl::Expires(at.saturating_duration_since(now)),
        })
    }

    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<bool> {
        let mut entries = self.lock()?;
        let now = Instant::now();

        match Self::live_entry(&mut entries, key, now) {
            Some(entry) => {
                entry.expires_at = Some(now + ttl);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> bool {
        self.entries.lock().is_ok()
    }
}
