#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use redis_url_shortener::config::{Config, StoreBackend};
use redis_url_shortener::domain::repositories::{KeyTtl, KeyValueStore, StoreError, StoreResult};
use redis_url_shortener::infrastructure::store::MemoryStore;
use redis_url_shortener::routes::{app_router, router};
use redis_url_shortener::server::build_state;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;

pub const DOMAIN: &str = "sho.rt";
pub const CLIENT_ADDR: &str = "127.0.0.1:12345";

#[derive(Clone)]
pub struct MockConnectInfoLayer {
    addr: SocketAddr,
}

impl MockConnectInfoLayer {
    pub fn new(addr: &str) -> Self {
        Self {
            addr: addr.parse().unwrap(),
        }
    }
}

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService {
            inner,
            addr: self.addr,
        }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
    addr: SocketAddr,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(ConnectInfo(self.addr));
        self.inner.call(req)
    }
}

/// A store whose backend is always down.
pub struct UnreachableStore;

#[async_trait]
impl KeyValueStore for UnreachableStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn set_ex(&self, _key: &str, _value: &str, _ttl: Duration) -> StoreResult<()> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn decr(&self, _key: &str) -> StoreResult<i64> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn ttl(&self, _key: &str) -> StoreResult<KeyTtl> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn expire(&self, _key: &str, _ttl: Duration) -> StoreResult<bool> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn ping(&self) -> bool {
        false
    }
}

pub fn test_config(api_quota: u32) -> Config {
    Config {
        domain: DOMAIN.to_string(),
        api_quota,
        quota_window_seconds: 30 * 60,
        default_expiry_hours: 24,
        listen_addr: "127.0.0.1:0".to_string(),
        store_backend: StoreBackend::Memory,
        redis_url: "redis://127.0.0.1:6379".to_string(),
        redis_alias_db: 0,
        redis_quota_db: 1,
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        behind_proxy: false,
    }
}

/// Test server over the full router with explicit stores.
pub fn server_with_stores(
    config: &Config,
    aliases: Arc<dyn KeyValueStore>,
    quotas: Arc<dyn KeyValueStore>,
    client_addr: &str,
) -> TestServer {
    let state = build_state(config, aliases, quotas);
    let app: Router = router(state).layer(MockConnectInfoLayer::new(client_addr));
    TestServer::new(app).unwrap()
}

/// Test server over the served application, trailing-slash normalization included.
pub fn normalized_server(config: &Config, aliases: Arc<dyn KeyValueStore>) -> TestServer {
    let state = build_state(config, aliases, Arc::new(MemoryStore::new()));
    let app = Router::new()
        .fallback_service(app_router(state))
        .layer(MockConnectInfoLayer::new(CLIENT_ADDR));
    TestServer::new(app).unwrap()
}

pub struct TestApp {
    pub server: TestServer,
    pub aliases: Arc<MemoryStore>,
    pub quotas: Arc<MemoryStore>,
}

/// Test server backed by fresh in-memory stores.
pub fn create_test_app(api_quota: u32) -> TestApp {
    let aliases = Arc::new(MemoryStore::new());
    let quotas = Arc::new(MemoryStore::new());
    let server = server_with_stores(
        &test_config(api_quota),
        aliases.clone(),
        quotas.clone(),
        CLIENT_ADDR,
    );

    TestApp {
        server,
        aliases,
        quotas,
    }
}
