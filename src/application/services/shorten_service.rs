//! Shortening pipeline orchestration.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::services::key_allocator::KeyAllocator;
use crate::application::services::rate_limiter::{QuotaCheck, RateLimiter};
use crate::application::services::url_normalizer::UrlNormalizer;
use crate::domain::entities::{AliasRecord, QuotaStatus};
use crate::domain::repositories::KeyValueStore;
use crate::error::AppError;

/// Expiry applied when a request leaves it unset or zero.
pub const DEFAULT_EXPIRY_HOURS: u32 = 24;

/// A decoded shorten request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortenCommand {
    pub url: String,
    pub custom_alias: Option<String>,
    pub expiry_hours: Option<u32>,
}

/// Result of a successful shorten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenOutcome {
    pub record: AliasRecord,
    /// `<domain>/<alias>`
    pub short_url: String,
    pub quota: QuotaStatus,
}

/// Per-request coordinator over the rate limiter, normalizer, allocator and
/// alias store. Keeps no state between requests.
///
/// # Pipeline
///
/// 1. Quota check (may deny)
/// 2. Decode body
/// 3. Validate URL syntax
/// 4. Reject the service's own domain
/// 5. Enforce `http://` scheme
/// 6. Pick alias and check it is free
/// 7. Persist alias with TTL
/// 8. Consume quota and report what is left
///
/// The availability check and the write are not atomic: two concurrent
/// requests for the same alias can both pass step 6, and the later write wins.
pub struct ShortenService {
    limiter: RateLimiter,
    normalizer: UrlNormalizer,
    allocator: KeyAllocator,
    aliases: Arc<dyn KeyValueStore>,
    default_expiry_hours: u32,
}

impl ShortenService {
    pub fn new(
        limiter: RateLimiter,
        normalizer: UrlNormalizer,
        aliases: Arc<dyn KeyValueStore>,
        default_expiry_hours: u32,
    ) -> Self {
        Self {
            limiter,
            normalizer,
            allocator: KeyAllocator::new(aliases.clone()),
            aliases,
            default_expiry_hours,
        }
    }

    /// Runs the full pipeline for `client_id`.
    ///
    /// `decode` is invoked only after the quota check passed, so an exhausted
    /// client is rejected before its body is even looked at.
    ///
    /// # Errors
    ///
    /// - [`AppError::RateLimited`] when the client has no quota left
    /// - whatever `decode` returns (normally [`AppError::MalformedBody`])
    /// - [`AppError::InvalidUrl`] for syntactically invalid URLs
    /// - [`AppError::DomainNotAllowed`] for URLs on the service's own domain
    /// - [`AppError::AliasInUse`] when the alias is held by a live record
    /// - [`AppError::StoreUnavailable`] on any store failure before the write completes
    ///
    /// Nothing is written and no quota is consumed on any of these paths.
    pub async fn shorten<F>(&self, client_id: &str, decode: F) -> Result<ShortenOutcome, AppError>
    where
        F: FnOnce() -> Result<ShortenCommand, AppError>,
    {
        if let QuotaCheck::Denied { reset_after } = self
            .limiter
            .check_and_reserve(client_id)
            .await
            .map_err(AppError::StoreUnavailable)?
        {
            return Err(AppError::RateLimited {
                reset_minutes: reset_after.as_secs() / 60,
            });
        }

        let command = decode()?;

        if let Err(e) = self.normalizer.validate(&command.url) {
            info!(client = client_id, reason = %e, "rejected invalid URL");
            return Err(AppError::InvalidUrl);
        }

        if self.normalizer.is_self_referential(&command.url) {
            info!(client = client_id, url = %command.url, "rejected self-referential URL");
            return Err(AppError::DomainNotAllowed);
        }

        let url = self.normalizer.enforce_scheme(&command.url);

        let alias = self.allocator.allocate(command.custom_alias.as_deref());
        if !self
            .allocator
            .check_available(&alias)
            .await
            .map_err(AppError::StoreUnavailable)?
        {
            info!(client = client_id, alias = %alias, "alias already in use");
            return Err(AppError::AliasInUse);
        }

        let expiry_hours = match command.expiry_hours {
            Some(hours) if hours > 0 => hours,
            _ => self.default_expiry_hours,
        };
        let record = AliasRecord::new(alias, url, expiry_hours);

        self.aliases
            .set_ex(&record.alias, &record.url, record.ttl())
            .await
            .map_err(AppError::StoreUnavailable)?;

        // The alias is already live; quota bookkeeping is best-effort from here.
        let quota = match self.limiter.commit(client_id).await {
            Ok(status) => status,
            Err(e) => {
                warn!(client = client_id, error = %e, "failed to commit quota");
                QuotaStatus {
                    remaining: String::new(),
                    reset_after: self.limiter.policy().window,
                }
            }
        };

        let short_url = format!("{}/{}", self.normalizer.domain(), record.alias);
        info!(
            client = client_id,
            alias = %record.alias,
            expiry_hours = record.expiry_hours,
            "short URL created"
        );

        Ok(ShortenOutcome {
            record,
            short_url,
            quota,
        })
    }
}
