//! Short alias selection and collision checking.

use std::sync::Arc;

use crate::domain::repositories::{KeyValueStore, StoreResult};
use crate::utils::code_generator::generate_alias;

/// Top-level path segments served by the router itself. A record stored
/// under one of these could never be resolved.
pub const RESERVED_ALIASES: &[&str] = &["health", "api"];

/// Picks aliases and checks them against live records in the alias namespace.
///
/// No retry is attempted on collision: a taken alias, custom or generated, is
/// reported back to the caller.
pub struct KeyAllocator {
    store: Arc<dyn KeyValueStore>,
}

impl KeyAllocator {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Uses a non-empty `custom_alias` verbatim, otherwise generates a random one.
    pub fn allocate(&self, custom_alias: Option<&str>) -> String {
        match custom_alias {
            Some(alias) if !alias.is_empty() => alias.to_string(),
            _ => generate_alias(),
        }
    }

    /// Returns true if `alias` is not reserved and no live record uses it.
    ///
    /// # Errors
    ///
    /// Propagates store failures unchanged.
    pub async fn check_available(&self, alias: &str) -> StoreResult<bool> {
        if RESERVED_ALIASES.contains(&alias) {
            return Ok(false);
        }
        Ok(self.store.get(alias).await?.is_none())
    }
}
