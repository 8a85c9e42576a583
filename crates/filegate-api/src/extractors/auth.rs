//! `AuthPrincipal` extractor: pulls the bearer token from the Authorization
//! header and validates it.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use filegate_auth::{AuthError, Principal};

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller. Adding this to a handler's arguments makes the
/// route require a valid token.
#[derive(Debug, Clone)]
pub struct AuthPrincipal(pub Principal);

impl std::ops::Deref for AuthPrincipal {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            tracing::debug!(path = %parts.uri.path(), "Missing bearer token");
            AuthError::MissingToken
        })?;

        let principal = state.validator.validate(token).inspect_err(|_| {
            tracing::warn!(path = %parts.uri.path(), "Rejected bearer token");
        })?;

        Ok(AuthPrincipal(principal))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
