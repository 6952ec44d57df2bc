//! Business logic services for the application layer.

pub mod key_allocator;
pub mod rate_limiter;
pub mod resolver;
pub mod shorten_service;
pub mod url_normalizer;

pub use key_allocator::KeyAllocator;
pub use rate_limiter::{QuotaCheck, QuotaPolicy, RateLimiter};
pub use resolver::Resolver;
pub use shorten_service::{DEFAULT_EXPIRY_HOURS, ShortenCommand, ShortenOutcome, ShortenService};
pub use url_normalizer::UrlNormalizer;
