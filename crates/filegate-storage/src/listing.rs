//! Folder tree listing.

use std::path::PathBuf;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::StorageError;

/// One folder in a listing: its own name, the files directly inside it, and
/// (for recursive listings) its subfolders.
///
/// Names are sorted so the same tree always renders the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder name (last segment of its path).
    pub name: String,
    /// Names of regular files directly inside this folder.
    pub files: Vec<String>,
    /// Child folders. Empty unless subfolders were requested.
    pub folders: Vec<FolderNode>,
}

impl FolderNode {
    /// Create an empty node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            folders: Vec::new(),
        }
    }
}

/// Read `dir` into a [`FolderNode`] named `name`.
///
/// Symbolic links are skipped rather than followed, so a link cycle inside
/// the root cannot make traversal unbounded.
pub fn read_tree(
    dir: PathBuf,
    name: String,
    include_subfolders: bool,
) -> BoxFuture<'static, Result<FolderNode, StorageError>> {
    Box::pin(async move {
        let mut node = FolderNode::new(name);
        let mut subfolders: Vec<(String, PathBuf)> = Vec::new();

        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            let entry_name = entry.file_name().to_string_lossy().into_owned();

            if file_type.is_symlink() {
                tracing::debug!(path = %entry.path().display(), "Skipping symbolic link");
            } else if file_type.is_file() {
                node.files.push(entry_name);
            } else if file_type.is_dir() && include_subfolders {
                subfolders.push((entry_name, entry.path()));
            }
        }

        node.files.sort();
        subfolders.sort_by(|a, b| a.0.cmp(&b.0));

        for (child_name, child_path) in subfolders {
            let child = read_tree(child_path, child_name, true).await?;
            node.folders.push(child);
        }

        Ok(node)
    })
}

/// Display name of a listed folder: the last segment of the folder path as
/// the client supplied it.
pub fn node_name(folder_path: &str) -> String {
    folder_path
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(folder_path)
        .to_string()
}
