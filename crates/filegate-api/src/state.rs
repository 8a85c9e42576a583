//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use filegate_auth::{TokenIssuer, TokenValidator};
use filegate_core::config::AppConfig;
use filegate_core::AppResult;
use filegate_storage::StorageEngine;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Path-safe file storage
    pub engine: Arc<StorageEngine>,
    /// Credential exchange
    pub issuer: Arc<TokenIssuer>,
    /// Bearer token validation
    pub validator: Arc<TokenValidator>,
}

impl AppState {
    /// Build every component from a validated configuration.
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let engine = StorageEngine::new(&config.storage).await?;
        let issuer = TokenIssuer::new(&config.auth);
        let validator = TokenValidator::new(&config.auth);

        Ok(Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
            issuer: Arc::new(issuer),
            validator: Arc::new(validator),
        })
    }
}
