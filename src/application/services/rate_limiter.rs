//! Fixed-window request quota per client identity.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::entities::{QuotaRecord, QuotaStatus};
use crate::domain::repositories::{KeyTtl, KeyValueStore, StoreResult};

/// Quota settings taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPolicy {
    /// Requests granted to a client at the start of each window.
    pub initial_quota: u32,
    /// Replenishment window; the quota record expires after this long.
    pub window: Duration,
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            initial_quota: 10,
            window: Duration::from_secs(30 * 60),
        }
    }
}

/// Outcome of the pre-flight quota check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaCheck {
    Allowed,
    Denied { reset_after: Duration },
}

/// Tracks remaining shorten requests per client in the quota namespace.
///
/// The check and the commit are separate store round-trips. Quota is only
/// consumed by [`RateLimiter::commit`], which callers invoke after a shorten
/// fully succeeded.
pub struct RateLimiter {
    store: Arc<dyn KeyValueStore>,
    policy: QuotaPolicy,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn KeyValueStore>, policy: QuotaPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> QuotaPolicy {
        self.policy
    }

    /// Reads the client's quota record, creating it on first sight.
    ///
    /// - Absent: stores the full quota with the window TTL and allows.
    /// - Remaining `<= 0`: denies, reporting the record's remaining TTL.
    /// - Otherwise: allows without consuming anything.
    ///
    /// # Errors
    ///
    /// Propagates store failures unchanged.
    pub async fn check_and_reserve(&self, client_id: &str) -> StoreResult<QuotaCheck> {
        let Some(raw) = self.store.get(client_id).await? else {
            self.store
                .set_ex(
                    client_id,
                    &self.policy.initial_quota.to_string(),
                    self.policy.window,
                )
                .await?;
            debug!(client = client_id, "quota window opened");
            return Ok(QuotaCheck::Allowed);
        };

        if !QuotaRecord::parse(&raw).is_exhausted() {
            return Ok(QuotaCheck::Allowed);
        }

        let reset_after = self.window_remaining(client_id).await?;
        debug!(
            client = client_id,
            reset_secs = reset_after.as_secs(),
            "quota exhausted"
        );
        Ok(QuotaCheck::Denied { reset_after })
    }

    /// Consumes one request and reports what is left.
    ///
    /// Decrements atomically, then reads the TTL and the count. The TTL is never
    /// reset or extended. If the window lapsed between check and commit, the
    /// decrement re-created the key without an expiry; the record is then
    /// replaced by a fresh window with this request already counted.
    ///
    /// # Errors
    ///
    /// Propagates store failures unchanged.
    pub async fn commit(&self, client_id: &str) -> StoreResult<QuotaStatus> {
        let after_decr = self.store.decr(client_id).await?;

        let reset_after = match self.store.ttl(client_id).await? {
            KeyTtl::Expires(remaining) => remaining,
            KeyTtl::Missing => Duration::ZERO,
            KeyTtl::Persistent => return self.reopen_window(client_id).await,
        };

        let remaining = self
            .store
            .get(client_id)
            .await?
            .unwrap_or_else(|| after_decr.to_string());

        Ok(QuotaStatus {
            remaining,
            reset_after,
        })
    }

    async fn reopen_window(&self, client_id: &str) -> StoreResult<QuotaStatus> {
        let remaining = self.policy.initial_quota.saturating_sub(1).to_string();
        self.store
            .set_ex(client_id, &remaining, self.policy.window)
            .await?;
        debug!(client = client_id, "quota window lapsed before commit; reopened");

        Ok(QuotaStatus {
            remaining,
            reset_after: self.policy.window,
        })
    }

    async fn window_remaining(&self, client_id: &str) -> StoreResult<Duration> {
        match self.store.ttl(client_id).await? {
            KeyTtl::Expires(remaining) => Ok(remaining),
            KeyTtl::Missing => Ok(Duration::ZERO),
            KeyTtl::Persistent => {
                warn!(client = client_id, "quota record had no expiry; re-arming window");
                self.store.expire(client_id, self.policy.window).await?;
                Ok(self.policy.window)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockKeyValueStore, StoreError};
    use crate::infrastructure::store::MemoryStore;

    const CLIENT: &str = "203.0.113.7";

    fn policy(quota: u32) -> QuotaPolicy {
        QuotaPolicy {
            initial_quota: quota,
            window: Duration::from_secs(1800),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_request_opens_window() {
        let store = Arc::new(MemoryStore::new());
        let limiter = RateLimiter::new(store.clone(), policy(10));

        let check = limiter.check_and_reserve(CLIENT).await.unwrap();

        assert_eq!(check, QuotaCheck::Allowed);
        assert_eq!(store.get(CLIENT).await.unwrap(), Some("10".to_string()));
        assert_eq!(
            store.ttl(CLIENT).await.unwrap(),
            KeyTtl::Expires(Duration::from_secs(1800))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_does_not_consume() {
        let store = Arc::new(MemoryStore::new());
        let limiter = RateLimiter::new(store.clone(), policy(3));

        for _ in 0..5 {
            limiter.check_and_reserve(CLIENT).await.unwrap();
        }

        assert_eq!(store.get(CLIENT).await.unwrap(), Some("3".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_commits_reduce_quota_by_exactly_n() {
        let store = Arc::new(MemoryStore::new());
        let limiter = RateLimiter::new(store.clone(), policy(5));

        for expected in (2..5).rev() {
            assert_eq!(
                limiter.check_and_reserve(CLIENT).await.unwrap(),
                QuotaCheck::Allowed
            );
            let status = limiter.commit(CLIENT).await.unwrap();
            assert_eq!(status.remaining, expected.to_string());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_quota_denied_with_reset_window() {
        let store = Arc::new(MemoryStore::new());
        let limiter = RateLimiter::new(store.clone(), policy(1));

        limiter.check_and_reserve(CLIENT).await.unwrap();
        let status = limiter.commit(CLIENT).await.unwrap();
        assert_eq!(status.remaining, "0");

        tokio::time::advance(Duration::from_secs(600)).await;

        let check = limiter.check_and_reserve(CLIENT).await.unwrap();
        assert_eq!(
            check,
            QuotaCheck::Denied {
                reset_after: Duration::from_secs(1200)
            }
        );
        assert_eq!(store.get(CLIENT).await.unwrap(), Some("0".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quota_replenished_after_window() {
        let store = Arc::new(MemoryStore::new());
        let limiter = RateLimiter::new(store.clone(), policy(1));

        limiter.check_and_reserve(CLIENT).await.unwrap();
        limiter.commit(CLIENT).await.unwrap();

        tokio::time::advance(Duration::from_secs(1800)).await;

        assert_eq!(
            limiter.check_and_reserve(CLIENT).await.unwrap(),
            QuotaCheck::Allowed
        );
        assert_eq!(store.get(CLIENT).await.unwrap(), Some("1".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_preserves_ttl() {
        let store = Arc::new(MemoryStore::new());
        let limiter = RateLimiter::new(store.clone(), policy(10));

        limiter.check_and_reserve(CLIENT).await.unwrap();
        tokio::time::advance(Duration::from_secs(300)).await;

        let status = limiter.commit(CLIENT).await.unwrap();
        assert_eq!(status.reset_after, Duration::from_secs(1500));
        assert_eq!(status.reset_minutes(), 25);
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_after_window_lapse_opens_fresh_window() {
        let store = Arc::new(MemoryStore::new());
        let limiter = RateLimiter::new(store.clone(), policy(10));

        limiter.check_and_reserve(CLIENT).await.unwrap();
        tokio::time::advance(Duration::from_secs(1800)).await;

        let status = limiter.commit(CLIENT).await.unwrap();
        assert_eq!(status.remaining, "9");
        assert_eq!(status.reset_after, Duration::from_secs(1800));
        assert_eq!(store.get(CLIENT).await.unwrap(), Some("9".to_string()));
        assert_eq!(
            store.ttl(CLIENT).await.unwrap(),
            KeyTtl::Expires(Duration::from_secs(1800))
        );

        assert_eq!(
            limiter.check_and_reserve(CLIENT).await.unwrap(),
            QuotaCheck::Allowed
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_persistent_exhausted_record_rearmed_on_check() {
        let store = Arc::new(MemoryStore::new());
        store.decr(CLIENT).await.unwrap();
        let limiter = RateLimiter::new(store.clone(), policy(10));

        assert_eq!(
            limiter.check_and_reserve(CLIENT).await.unwrap(),
            QuotaCheck::Denied {
                reset_after: Duration::from_secs(1800)
            }
        );
        assert_eq!(
            store.ttl(CLIENT).await.unwrap(),
            KeyTtl::Expires(Duration::from_secs(1800))
        );
    }

    #[tokio::test]
    async fn test_clients_tracked_independently() {
        let store = Arc::new(MemoryStore::new());
        let limiter = RateLimiter::new(store.clone(), policy(1));

        limiter.check_and_reserve("a").await.unwrap();
        limiter.commit("a").await.unwrap();

        assert!(matches!(
            limiter.check_and_reserve("a").await.unwrap(),
            QuotaCheck::Denied { .. }
        ));
        assert_eq!(
            limiter.check_and_reserve("b").await.unwrap(),
            QuotaCheck::Allowed
        );
    }

    #[tokio::test]
    async fn test_check_propagates_store_error() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .times(1)
            .returning(|_| Err(StoreError::Connection("refused".into())));
        store.expect_set_ex().times(0);

        let limiter = RateLimiter::new(Arc::new(store), policy(10));

        assert!(matches!(
            limiter.check_and_reserve(CLIENT).await,
            Err(StoreError::Connection(_))
        ));
    }
}
