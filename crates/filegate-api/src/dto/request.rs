//! Query-string DTOs.
//!
//! Every field also accepts its historical camelCase spelling.

use serde::Deserialize;

/// `POST /api/files/upload` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadQuery {
    /// Replace an existing file.
    #[serde(default)]
    pub overwrite: bool,
}

/// `GET /api/files/list` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFilesQuery {
    /// Folder to list.
    #[serde(default, alias = "folderPath")]
    pub folder_path: String,
    /// Descend into subfolders.
    #[serde(default, alias = "includeSubfolders")]
    pub include_subfolders: bool,
}

/// `GET /api/files/download` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DownloadQuery {
    /// Folder containing the file.
    #[serde(default, alias = "folderPath")]
    pub folder_path: String,
    /// File to download.
    #[serde(default, alias = "fileName")]
    pub file_name: String,
}
