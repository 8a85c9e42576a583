//! Storage error taxonomy.
//!
//! The `Display` text of each variant is the exact message returned to
//! clients, so handlers can forward it unchanged.

use filegate_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Errors produced by [`crate::PathResolver`] and [`crate::StorageEngine`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// No file content was supplied, or it was empty.
    #[error("Please provide a file to upload.")]
    EmptyFile,

    /// The upload exceeded the configured size limit.
    #[error("File size exceeded. Maximum allowed size is {max_mb} megabytes.")]
    TooLarge {
        /// Configured limit in megabytes.
        max_mb: u64,
    },

    /// The file name was empty.
    #[error("Please provide a file name.")]
    MissingFileName,

    /// The folder path was empty.
    #[error("Please provide a folder path.")]
    MissingFolderPath,

    /// A download was requested without both a folder path and a file name.
    #[error("Please provide a valid file path and file name.")]
    InvalidRequest,

    /// The folder path or file name would escape the storage root.
    #[error("The provided path is not valid.")]
    InvalidPath {
        /// Why the path was rejected. Logged, never returned to the client.
        reason: &'static str,
    },

    /// The target file exists and overwrite was not requested.
    #[error("File '{file_name}' already exists in '{folder_path}'.")]
    Conflict {
        /// File name as supplied.
        file_name: String,
        /// Folder path as supplied.
        folder_path: String,
    },

    /// The listed folder does not exist.
    #[error("The provided folder path does not exist.")]
    FolderNotFound,

    /// The requested file does not exist.
    #[error("File '{file_name}' not found in '{folder_path}'.")]
    FileNotFound {
        /// File name as supplied.
        file_name: String,
        /// Folder path as supplied.
        folder_path: String,
    },

    /// An I/O error occurred while reading or writing.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Shorthand for an [`StorageError::InvalidPath`] rejection.
    pub(crate) fn invalid_path(reason: &'static str) -> Self {
        Self::InvalidPath { reason }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        let kind = match &err {
            StorageError::EmptyFile
            | StorageError::TooLarge { .. }
            | StorageError::MissingFileName
            | StorageError::MissingFolderPath
            | StorageError::InvalidRequest
            | StorageError::InvalidPath { .. } => ErrorKind::Validation,
            StorageError::Conflict { .. } => ErrorKind::Conflict,
            StorageError::FolderNotFound | StorageError::FileNotFound { .. } => {
                ErrorKind::NotFound
            }
            StorageError::Io(_) => ErrorKind::Storage,
        };

        match err {
            StorageError::Io(io) => AppError::with_source(kind, io.to_string(), io),
            other => AppError::new(kind, other.to_string()),
        }
    }
}
