//! # filegate-auth
//!
//! Shared-secret credential exchange and stateless bearer tokens for
//! FileGate.
//!
//! ## Modules
//!
//! - `credentials`: client credentials and their constant-time verification
//! - `jwt`: HS256 token issuance and validation
//! - `error`: authentication error taxonomy
//!
//! Tokens are never stored or revoked; a token stays valid until its
//! expiry instant.

pub mod credentials;
pub mod error;
pub mod jwt;

pub use credentials::{CredentialVerifier, Credentials};
pub use error::AuthError;
pub use jwt::{Claims, IssuedToken, Principal, TokenIssuer, TokenValidator};
