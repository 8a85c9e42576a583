//! Client credentials and their verification.

use serde::Deserialize;
use subtle::ConstantTimeEq;

use filegate_core::config::AuthConfig;

use crate::error::AuthError;

/// Credentials presented by a client in exchange for a token.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    /// Client identifier.
    pub client_id: String,
    /// Shared secret.
    #[serde(alias = "client_secret")]
    pub secret: String,
}

impl Credentials {
    /// Build credentials from their parts.
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Checks presented credentials against the configured pair.
#[derive(Clone)]
pub struct CredentialVerifier {
    client_id: String,
    client_secret: String,
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

impl CredentialVerifier {
    /// Creates a verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }

    /// Accept only when both fields match exactly.
    ///
    /// Both comparisons always run, and the rejection is the same whichever
    /// field was wrong.
    pub fn verify(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let id_ok = credentials
            .client_id
            .as_bytes()
            .ct_eq(self.client_id.as_bytes());
        let secret_ok = credentials
            .secret
            .as_bytes()
            .ct_eq(self.client_secret.as_bytes());

        if bool::from(id_ok & secret_ok) {
            Ok(())
        } else {
            tracing::warn!(client_id = %credentials.client_id, "Rejected credentials");
            Err(AuthError::InvalidCredentials)
        }
    }
}
