//! # filegate-core
//!
//! Core crate for FileGate. Contains configuration schemas, the shared
//! byte-stream type, and the unified error system.
//!
//! This crate has **no** internal dependencies on other FileGate crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
pub use result::AppResult;
