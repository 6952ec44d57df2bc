//! Store interfaces for the domain layer.
//!
//! The service owns no state of its own: alias mappings and quota counters both
//! live in an external store reached through [`KeyValueStore`]. Implementations
//! live in `crate::infrastructure::store`; a `mockall` mock is generated for tests.

pub mod key_value_store;

pub use key_value_store::{KeyTtl, KeyValueStore, StoreError, StoreResult};

#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
