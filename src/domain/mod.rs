//! Domain layer containing the records the service keeps and the store it
//! keeps them in.
//!
//! - [`entities`] - Alias and quota records
//! - [`repositories`] - The [`repositories::KeyValueStore`] capability
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.

pub mod entities;
pub mod repositories;
