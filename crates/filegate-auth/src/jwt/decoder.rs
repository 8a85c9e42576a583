//! Token validation.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use filegate_core::config::AuthConfig;

use super::claims::{Claims, Principal};
use crate::error::AuthError;

/// Verifies bearer tokens. Stateless: validity depends only on the
/// signature and the expiry claim.
#[derive(Clone)]
pub struct TokenValidator {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Signature and claim-presence checks.
    validation: Validation,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an explicit clock in `validate_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::from(["exp".to_string(), "sub".to_string()]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Validate a token against the current time.
    pub fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::InvalidToken
            })?
            .claims;

        if !claims.is_valid_at(now) {
            tracing::debug!(jti = %claims.jti, exp = claims.exp, "Token expired");
            return Err(AuthError::InvalidToken);
        }

        Ok(claims.into())
    }
}
