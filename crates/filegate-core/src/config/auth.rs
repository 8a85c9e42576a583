//! Authentication configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Credential exchange and token signing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default)]
    pub jwt_secret: String,
    /// Token TTL in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// The single client identifier allowed to exchange credentials.
    #[serde(default)]
    pub client_id: String,
    /// Shared secret expected alongside `client_id`.
    #[serde(default)]
    pub client_secret: String,
}

impl AuthConfig {
    /// Token lifetime as a [`Duration`].
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_minutes.saturating_mul(60))
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_minutes: default_token_ttl(),
            client_id: String::new(),
            client_secret: String::new(),
        }
    }
}

fn default_token_ttl() -> u64 {
    5
}
