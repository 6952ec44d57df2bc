//! HTTP server initialization and runtime setup.
//!
//! Handles store connections, service wiring, and Axum server lifecycle.

use crate::application::services::{RateLimiter, Resolver, ShortenService, UrlNormalizer};
use crate::config::{Config, StoreBackend};
use crate::domain::repositories::KeyValueStore;
use crate::infrastructure::store::{MemoryStore, RedisStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the shared handler state from configuration and two store namespaces.
pub fn build_state(
    config: &Config,
    alias_store: Arc<dyn KeyValueStore>,
    quota_store: Arc<dyn KeyValueStore>,
) -> AppState {
    let limiter = RateLimiter::new(quota_store.clone(), config.quota_policy());
    let normalizer = UrlNormalizer::new(config.domain.clone());

    let shortener = Arc::new(ShortenService::new(
        limiter,
        normalizer,
        alias_store.clone(),
        config.default_expiry_hours,
    ));
    let resolver = Arc::new(Resolver::new(alias_store.clone()));

    AppState {
        shortener,
        resolver,
        alias_store,
        quota_store,
        behind_proxy: config.behind_proxy,
    }
}

/// Opens the alias and quota namespaces for the configured backend.
///
/// # Errors
///
/// Returns an error if a Redis connection cannot be established.
async fn connect_stores(
    config: &Config,
) -> Result<(Arc<dyn KeyValueStore>, Arc<dyn KeyValueStore>)> {
    match config.store_backend {
        StoreBackend::Redis => {
            let aliases =
                RedisStore::connect(&config.redis_url_for(config.redis_alias_db)?, "alias")
                    .await?;
            let quotas =
                RedisStore::connect(&config.redis_url_for(config.redis_quota_db)?, "quota")
                    .await?;
            Ok((Arc::new(aliases), Arc::new(quotas)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok((Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new())))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Alias and quota stores
/// - Shorten and resolve services
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Store connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (alias_store, quota_store) = connect_stores(&config).await?;

    let state = build_state(&config, alias_store, quota_store);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
