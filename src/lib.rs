//! # Redis URL Shortener
//!
//! Turns long URLs into short aliases that redirect back to them, with a
//! per-client request quota and protection against shortening the service's own
//! domain.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Alias and quota records, store capability trait
//! - **Application Layer** ([`application`]) - Normalizer, rate limiter, key
//!   allocator, shorten orchestrator and resolver
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory stores
//! - **API Layer** ([`api`]) - Handlers, DTOs and middleware
//!
//! All shared state lives in the key-value store: aliases in one logical
//! database (TTL = requested expiry), quota counters in another (TTL = quota
//! window). The process itself keeps nothing between requests.
//!
//! ## Quick Start
//!
//! ```bash
//! export DOMAIN="localhost:3000"
//! export REDIS_URL="redis://localhost:6379"
//! cargo run
//!
//! curl -X POST localhost:3000/api/v1 -d '{"url":"example.com/page"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::{AppError, ErrorKind};
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        KeyAllocator, QuotaPolicy, RateLimiter, Resolver, ShortenService, UrlNormalizer,
    };
    pub use crate::domain::entities::{AliasRecord, QuotaRecord, QuotaStatus};
    pub use crate::domain::repositories::{KeyTtl, KeyValueStore, StoreError};
    pub use crate::error::{AppError, ErrorKind};
    pub use crate::infrastructure::store::{MemoryStore, RedisStore};
    pub use crate::state::AppState;
}
