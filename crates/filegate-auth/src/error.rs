//! Authentication errors.

use filegate_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Errors raised while exchanging credentials or checking a token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Client id or secret did not match. Never says which.
    #[error("The credentials provided are not valid.")]
    InvalidCredentials,

    /// No bearer token accompanied the request.
    #[error("A bearer token is required.")]
    MissingToken,

    /// The token is malformed, carries a bad signature, or has expired.
    #[error("The token provided is not valid or has expired.")]
    InvalidToken,

    /// The token could not be signed.
    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Signing(source) => AppError::with_source(
                ErrorKind::Internal,
                format!("Failed to sign token: {source}"),
                source,
            ),
            other => AppError::unauthorized(other.to_string()),
        }
    }
}
