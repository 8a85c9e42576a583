//! JWT token encoding, decoding, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{Claims, Principal};
pub use decoder::TokenValidator;
pub use encoder::{IssuedToken, TokenIssuer};
