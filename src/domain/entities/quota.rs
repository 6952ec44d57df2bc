//! Per-client quota record.

use std::time::Duration;

/// Remaining shorten requests for one client within a replenishment window.
///
/// The store holds the count as a decimal string keyed by client identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaRecord {
    pub remaining: i64,
}

impl QuotaRecord {
    /// Parses the stored count.
    ///
    /// Anything that is not an integer counts as an exhausted quota, so a
    /// corrupted record blocks the client until the window expires it.
    pub fn parse(raw: &str) -> Self {
        Self {
            remaining: raw.trim().parse().unwrap_or(0),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining <= 0
    }
}

/// Snapshot of a client's quota returned after a successful shorten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaStatus {
    /// Remaining count exactly as stored (string, mirrors the wire format).
    pub remaining: String,
    pub reset_after: Duration,
}

impl QuotaStatus {
    /// Reset window in whole minutes, rounded down.
    pub fn reset_minutes(&self) -> u64 {
        self.reset_after.as_secs() / 60
    }
}
