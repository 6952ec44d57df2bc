//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};

use crate::application::services::{ShortenCommand, ShortenOutcome};

/// Request body for `POST /api/v1`.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    /// The URL to shorten. A missing field is treated as empty and later
    /// rejected as an invalid URL.
    #[serde(default)]
    pub url: String,

    /// Optional custom alias, used verbatim.
    #[serde(default)]
    pub short: Option<String>,

    /// Optional lifetime in hours; unset or `0` means the default.
    #[serde(default)]
    pub expiry: Option<u32>,
}

impl From<ShortenRequest> for ShortenCommand {
    fn from(req: ShortenRequest) -> Self {
        Self {
            url: req.url,
            custom_alias: req.short,
            expiry_hours: req.expiry,
        }
    }
}

/// Successful shorten response.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    /// Normalized original URL.
    pub url: String,
    /// Full short URL, `<domain>/<alias>`.
    pub short: String,
    /// Lifetime in hours.
    pub expiry: u32,
    /// Remaining requests in the current window, as stored.
    pub rate_limit: String,
    /// Minutes until the quota window resets.
    pub rate_limit_reset: u64,
}

impl From<ShortenOutcome> for ShortenResponse {
    fn from(outcome: ShortenOutcome) -> Self {
        Self {
            rate_limit_reset: outcome.quota.reset_minutes(),
            url: outcome.record.url,
            short: outcome.short_url,
            expiry: outcome.record.expiry_hours,
            rate_limit: outcome.quota.remaining,
        }
    }
}
