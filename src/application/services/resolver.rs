//! Alias resolution.

use std::sync::Arc;

use tracing::debug;

use crate::domain::repositories::KeyValueStore;
use crate::error::AppError;

/// Looks aliases up in the alias namespace with a single store read.
pub struct Resolver {
    store: Arc<dyn KeyValueStore>,
}

impl Resolver {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns the original URL stored for `alias`.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the alias never existed or has expired
    /// - [`AppError::LookupFailed`] if the store could not be reached
    pub async fn resolve(&self, alias: &str) -> Result<String, AppError> {
        match self.store.get(alias).await {
            Ok(Some(url)) => {
                debug!("resolved {} -> {}", alias, url);
                Ok(url)
            }
            Ok(None) => Err(AppError::NotFound),
            Err(e) => Err(AppError::LookupFailed(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockKeyValueStore, StoreError};
    use crate::infrastructure::store::MemoryStore;
    use std::time::Duration;

    #[tokio::test]
    async fn test_resolve_existing_alias_twice() {
        let store = Arc::new(MemoryStore::new());
        store
            .set_ex("abc123", "http://example.com/page", Duration::from_secs(3600))
            .await
            .unwrap();

        let resolver = Resolver::new(store);

        assert_eq!(
            resolver.resolve("abc123").await.unwrap(),
            "http://example.com/page"
        );
        assert_eq!(
            resolver.resolve("abc123").await.unwrap(),
            "http://example.com/page"
        );
    }

    #[tokio::test]
    async fn test_resolve_unknown_alias() {
        let resolver = Resolver::new(Arc::new(MemoryStore::new()));
        assert!(matches!(
            resolver.resolve("nope").await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_expired_alias() {
        let store = Arc::new(MemoryStore::new());
        store
            .set_ex("brief", "http://example.com", Duration::from_secs(3600))
            .await
            .unwrap();
        let resolver = Resolver::new(store);

        tokio::time::advance(Duration::from_secs(3600)).await;

        assert!(matches!(
            resolver.resolve("brief").await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_resolve_store_failure() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .times(1)
            .returning(|_| Err(StoreError::Connection("refused".into())));

        let resolver = Resolver::new(Arc::new(store));
        assert!(matches!(
            resolver.resolve("abc").await,
            Err(AppError::LookupFailed(_))
        ));
    }
}
