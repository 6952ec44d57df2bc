use std::sync::Arc;

use crate::application::services::{Resolver, ShortenService};
use crate::domain::repositories::KeyValueStore;

/// Shared handler state. Every field is cheap to clone; all mutable state
/// lives in the stores.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenService>,
    pub resolver: Arc<Resolver>,
    pub alias_store: Arc<dyn KeyValueStore>,
    pub quota_store: Arc<dyn KeyValueStore>,
    pub behind_proxy: bool,
}
