//! Alias record mapping a short key to its original URL.

use std::time::Duration;

/// Number of characters kept from a generated identifier.
pub const GENERATED_ALIAS_LEN: usize = 6;

/// A short alias pointing at a normalized original URL.
///
/// Stored in the alias namespace with a TTL equal to `expiry_hours`. The mapping
/// is never mutated after creation; it disappears when the store expires it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRecord {
    pub alias: String,
    pub url: String,
    pub expiry_hours: u32,
}

impl AliasRecord {
    pub fn new(alias: String, url: String, expiry_hours: u32) -> Self {
        Self {
            alias,
            url,
            expiry_hours,
        }
    }

    /// Lifetime of the record in the store.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.expiry_hours) * 60 * 60)
    }
}
