//! Application layer services implementing the shortening and resolve pipelines.
//!
//! Services consume the [`crate::domain::repositories::KeyValueStore`] capability
//! and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::url_normalizer::UrlNormalizer`] - Scheme enforcement and loop prevention
//! - [`services::rate_limiter::RateLimiter`] - Per-client quota windows
//! - [`services::key_allocator::KeyAllocator`] - Alias choice and collision checks
//! - [`services::shorten_service::ShortenService`] - Shorten pipeline orchestration
//! - [`services::resolver::Resolver`] - Alias lookup

pub mod services;
