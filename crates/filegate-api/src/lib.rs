//! # filegate-api
//!
//! HTTP API layer for FileGate built on Axum.
//!
//! Provides the credential exchange, upload, listing, download, and health
//! endpoints, the bearer-token extractor, request logging, and the mapping
//! from [`filegate_core::AppError`] to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
