//! # filegate-storage
//!
//! Local filesystem storage for FileGate. Every client-supplied folder path
//! and file name is confined to a single storage root by [`PathResolver`];
//! [`StorageEngine`] layers the upload, listing, and download rules on top.

pub mod engine;
pub mod error;
pub mod listing;
pub mod resolver;
pub mod transfer;

pub use engine::{Download, StorageEngine, UploadContent, UploadRequest};
pub use error::StorageError;
pub use listing::FolderNode;
pub use resolver::PathResolver;
