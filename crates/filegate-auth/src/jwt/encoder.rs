//! Token issuance.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;

use filegate_core::config::AuthConfig;

use super::claims::Claims;
use crate::credentials::{CredentialVerifier, Credentials};
use crate::error::AuthError;

/// A freshly issued bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    /// Signed token string.
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: &'static str,
    /// Lifetime in seconds.
    pub expires_in: u64,
    /// Absolute expiry instant.
    #[serde(skip)]
    pub expires_at: DateTime<Utc>,
}

/// Exchanges valid credentials for signed HS256 tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    verifier: CredentialVerifier,
    encoding_key: EncodingKey,
    ttl_seconds: u64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("verifier", &self.verifier)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            verifier: CredentialVerifier::new(config),
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_seconds: config.token_ttl().as_secs(),
        }
    }

    /// Issue a token valid from now.
    pub fn issue(&self, credentials: &Credentials) -> Result<IssuedToken, AuthError> {
        self.issue_at(credentials, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        credentials: &Credentials,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        self.verifier.verify(credentials)?;

        let ttl = i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX);
        let claims = Claims::for_service(now, ttl);
        let expires_at = claims.expires_at();

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AuthError::Signing)?;

        tracing::info!(jti = %claims.jti, expires_at = %expires_at, "Issued access token");

        Ok(IssuedToken {
            access_token,
            token_type: "Bearer",
            expires_in: self.ttl_seconds,
            expires_at,
        })
    }
}
