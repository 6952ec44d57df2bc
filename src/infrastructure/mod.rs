//! Infrastructure layer for external integrations.
//!
//! Provides concrete implementations of [`crate::domain::repositories::KeyValueStore`].
//!
//! # Modules
//!
//! - [`store`] - Redis and in-memory store backends

pub mod store;
