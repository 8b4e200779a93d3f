// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the `TaskTrack` API server.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use crate::auth::{AuthService, DefaultAuth, Tokens};
use crate::config::Settings;
use crate::storage::Storage;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState<S> {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Token issuer/verifier
    pub tokens: Arc<Tokens>,
    /// Settings, loaded once at startup and never mutated
    pub settings: Arc<Settings>,
    /// Storage backend
    pub storage: S,
}

impl<S: Storage + Clone + Send + Sync + 'static> AppState<S> {
    /// Create a new application state
    pub fn new(storage: S, config: Settings) -> Self {
        let tokens = Arc::new(Tokens::new(config.jwt_secret.as_bytes(), config.token_ttl()));
        let auth = Arc::new(DefaultAuth::new(storage.clone(), Arc::clone(&tokens)));

        Self {
            auth,
            tokens,
            settings: Arc::new(config),
            storage,
        }
    }
}
