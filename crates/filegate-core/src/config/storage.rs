//! File storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Number of bytes in one megabyte, as used for the upload limit.
pub const BYTES_PER_MEGABYTE: u64 = 1_048_576;

/// Storage root and upload policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory every client path is confined to.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
    /// Create intermediate folders that do not exist yet on upload.
    #[serde(default = "default_true")]
    pub create_missing_folders: bool,
}

impl StorageConfig {
    /// Storage root as a `PathBuf`.
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.root_path)
    }

    /// Maximum upload size in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(BYTES_PER_MEGABYTE)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            max_file_size_mb: default_max_file_size_mb(),
            create_missing_folders: true,
        }
    }
}

fn default_root_path() -> String {
    "./data/files".to_string()
}

fn default_max_file_size_mb() -> u64 {
    100
}

fn default_true() -> bool {
    true
}
