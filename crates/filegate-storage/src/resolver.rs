//! Confinement of client-supplied paths to the storage root.

use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;

/// Maps client-supplied folder paths and file names onto absolute paths
/// under a fixed storage root.
///
/// Resolution is purely lexical and performs no I/O:
/// - `\` is treated as a separator, so Windows-style paths resolve the same way
/// - `.` segments are dropped
/// - `..` segments, absolute paths, drive prefixes, and NUL bytes are rejected
/// - a file name must be exactly one normal segment
///
/// The joined result is then checked to have the root as a component-wise
/// prefix.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Create a resolver rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The storage root all paths are confined to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a folder path, and optionally a file name inside it.
    pub fn resolve(
        &self,
        folder_path: &str,
        file_name: Option<&str>,
    ) -> Result<PathBuf, StorageError> {
        let mut resolved = self.root.clone();
        push_relative(&mut resolved, folder_path)?;

        if let Some(name) = file_name {
            resolved.push(single_segment(name)?);
        }

        if !resolved.starts_with(&self.root) {
            tracing::warn!(folder = folder_path, "Resolved path escapes storage root");
            return Err(StorageError::invalid_path("outside root"));
        }

        Ok(resolved)
    }

    /// Resolve a folder path alone.
    pub fn resolve_folder(&self, folder_path: &str) -> Result<PathBuf, StorageError> {
        self.resolve(folder_path, None)
    }
}

fn normalize_separators(raw: &str) -> Result<String, StorageError> {
    if raw.contains('\0') {
        return Err(StorageError::invalid_path("null byte"));
    }
    Ok(raw.replace('\\', "/"))
}

fn push_relative(target: &mut PathBuf, folder_path: &str) -> Result<(), StorageError> {
    let normalized = normalize_separators(folder_path)?;

    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => target.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                tracing::warn!(folder = folder_path, "Rejected '..' segment in folder path");
                return Err(StorageError::invalid_path("parent segment"));
            }
            Component::RootDir | Component::Prefix(_) => {
                tracing::warn!(folder = folder_path, "Rejected absolute folder path");
                return Err(StorageError::invalid_path("absolute path"));
            }
        }
    }

    Ok(())
}

fn single_segment(file_name: &str) -> Result<PathBuf, StorageError> {
    let normalized = normalize_separators(file_name)?;
    let mut components = Path::new(&normalized).components();

    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) => Ok(PathBuf::from(part)),
        _ => {
            tracing::warn!(file = file_name, "Rejected file name that is not a single segment");
            Err(StorageError::invalid_path("file name"))
        }
    }
}
