//! JWT claims carried by every bearer token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subject embedded in every token. All clients share one identity.
pub const SERVICE_SUBJECT: &str = "filegate-client";

/// Role embedded in every token.
pub const SERVICE_ROLE: &str = "admin";

/// JWT claims payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, always [`SERVICE_SUBJECT`].
    pub sub: String,
    /// Role, always [`SERVICE_ROLE`].
    pub role: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token id.
    pub jti: Uuid,
}

impl Claims {
    /// Claims for a token issued at `now` that lives for `ttl_seconds`.
    pub fn for_service(now: DateTime<Utc>, ttl_seconds: i64) -> Self {
        let iat = now.timestamp();
        Self {
            sub: SERVICE_SUBJECT.to_string(),
            role: SERVICE_ROLE.to_string(),
            iat,
            exp: iat.saturating_add(ttl_seconds),
            jti: Uuid::new_v4(),
        }
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Whether the token is still valid at `now`. The expiry instant itself
    /// is still valid.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() <= self.exp
    }
}

/// The authenticated caller, as established by a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Subject claim.
    pub subject: String,
    /// Role claim.
    pub role: String,
    /// Token id.
    pub token_id: Uuid,
    /// When the presented token expires.
    pub expires_at: DateTime<Utc>,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        let expires_at = claims.expires_at();
        Self {
            subject: claims.sub,
            role: claims.role,
            token_id: claims.jti,
            expires_at,
        }
    }
}
