//! Upload, listing, and download over a single storage root.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};

use filegate_core::config::StorageConfig;
use filegate_core::types::ByteStream;

use crate::error::StorageError;
use crate::listing::{self, FolderNode};
use crate::resolver::PathResolver;
use crate::transfer::{self, PruneOnDrop, Publish};

/// Where an upload goes and whether it may replace an existing file.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// Target file name, a single path segment.
    pub file_name: String,
    /// Target folder, relative to the storage root.
    pub folder_path: String,
    /// Replace an existing file instead of failing with a conflict.
    pub overwrite: bool,
}

/// The bytes of an upload together with the length the client declared.
pub struct UploadContent {
    /// File contents.
    pub stream: ByteStream,
    /// Length declared by the client, checked before any byte is read.
    pub declared_length: u64,
}

impl fmt::Debug for UploadContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadContent")
            .field("declared_length", &self.declared_length)
            .finish_non_exhaustive()
    }
}

/// An opened file ready to be streamed to a client.
///
/// The stream owns the file handle; dropping it closes the file.
pub struct Download {
    /// File name as requested.
    pub file_name: String,
    /// File size in bytes.
    pub length: u64,
    /// File contents.
    pub stream: ByteStream,
}

impl fmt::Debug for Download {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Download")
            .field("file_name", &self.file_name)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

/// File operations confined to one storage root.
#[derive(Debug, Clone)]
pub struct StorageEngine {
    resolver: PathResolver,
    max_file_size_mb: u64,
    max_file_size_bytes: u64,
    create_missing_folders: bool,
}

impl StorageEngine {
    /// Open the storage root described by `config`, creating it if needed.
    ///
    /// The root is canonicalized once here; every later containment check is
    /// made against the canonical form.
    pub async fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let root = config.root_path();
        fs::create_dir_all(&root).await?;
        let root = fs::canonicalize(&root).await?;

        info!(
            root = %root.display(),
            max_file_size_mb = config.max_file_size_mb,
            "Storage root ready"
        );

        Ok(Self {
            resolver: PathResolver::new(root),
            max_file_size_mb: config.max_file_size_mb,
            max_file_size_bytes: config.max_file_size_bytes(),
            create_missing_folders: config.create_missing_folders,
        })
    }

    /// Path resolver bound to this engine's root.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Upload size limit in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    /// Store an uploaded file.
    ///
    /// Checks run in a fixed order and the first failure wins: missing or
    /// empty content, declared size over the limit, empty file name, empty
    /// folder path, unsafe path, existing file without overwrite.
    pub async fn upload(
        &self,
        request: UploadRequest,
        content: Option<UploadContent>,
    ) -> Result<String, StorageError> {
        let Some(content) = content.filter(|c| c.declared_length > 0) else {
            return Err(StorageError::EmptyFile);
        };
        if content.declared_length > self.max_file_size_bytes {
            return Err(self.too_large());
        }
        if request.file_name.is_empty() {
            return Err(StorageError::MissingFileName);
        }
        if request.folder_path.is_empty() {
            return Err(StorageError::MissingFolderPath);
        }

        let UploadRequest {
            file_name,
            folder_path,
            overwrite,
        } = request;

        let destination = self.resolver.resolve(&folder_path, Some(&file_name))?;
        self.confine(&destination).await?;

        let conflict = |file_name: String, folder_path: String| {
            info!(folder = %folder_path, file = %file_name, "Upload rejected, file exists");
            StorageError::Conflict {
                file_name,
                folder_path,
            }
        };

        if !overwrite && fs::try_exists(&destination).await? {
            return Err(conflict(file_name, folder_path));
        }

        let parent = destination
            .parent()
            .ok_or(StorageError::invalid_path("no parent"))?;
        let created = if self.create_missing_folders {
            missing_folders(parent).await?
        } else {
            Vec::new()
        };
        let create_parent = !created.is_empty();
        let folders = PruneOnDrop::new(created);
        if create_parent {
            debug!(folder = %folder_path, "Creating missing folders");
            fs::create_dir_all(parent).await?;
            self.confine(parent).await?;
        }

        // Without overwrite the existing-file check above is only a fast
        // path; publishing decides the conflict.
        let publish = if overwrite {
            Publish::Replace
        } else {
            Publish::CreateNew
        };
        let written = transfer::write_atomic(
            &destination,
            content.stream,
            self.max_file_size_bytes,
            publish,
        )
        .await;
        let bytes = match written {
            Ok(bytes) => bytes,
            Err(StorageError::Io(e)) if !overwrite && e.kind() == ErrorKind::AlreadyExists => {
                return Err(conflict(file_name, folder_path));
            }
            Err(e) => return Err(e),
        };
        folders.disarm();

        info!(folder = %folder_path, file = %file_name, bytes, overwrite, "File uploaded");
        Ok(format!(
            "File '{file_name}' uploaded successfully to '{folder_path}'."
        ))
    }

    /// List a folder, optionally with its whole subtree.
    pub async fn list_files(
        &self,
        folder_path: &str,
        include_subfolders: bool,
    ) -> Result<FolderNode, StorageError> {
        if folder_path.is_empty() {
            return Err(StorageError::MissingFolderPath);
        }

        let dir = self.resolver.resolve_folder(folder_path)?;
        self.confine(&dir).await?;
        if !is_dir(&dir).await? {
            return Err(StorageError::FolderNotFound);
        }

        let node =
            listing::read_tree(dir, listing::node_name(folder_path), include_subfolders).await?;

        debug!(
            folder = folder_path,
            files = node.files.len(),
            folders = node.folders.len(),
            include_subfolders,
            "Listed folder"
        );
        Ok(node)
    }

    /// Open a stored file for streaming.
    pub async fn download(
        &self,
        folder_path: &str,
        file_name: &str,
    ) -> Result<Download, StorageError> {
        if folder_path.is_empty() || file_name.is_empty() {
            return Err(StorageError::InvalidRequest);
        }

        let not_found = || StorageError::FileNotFound {
            file_name: file_name.to_string(),
            folder_path: folder_path.to_string(),
        };

        let path = self.resolver.resolve(folder_path, Some(file_name))?;
        self.confine(&path).await?;

        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if is_missing(&e) => return Err(not_found()),
            Err(e) => return Err(e.into()),
        };
        let meta = file.metadata().await?;
        if !meta.is_file() {
            return Err(not_found());
        }

        debug!(
            folder = folder_path,
            file = file_name,
            bytes = meta.len(),
            "Opened file for download"
        );
        Ok(Download {
            file_name: file_name.to_string(),
            length: meta.len(),
            stream: Box::pin(ReaderStream::new(file)),
        })
    }

    /// The error for content over the size limit.
    pub fn too_large(&self) -> StorageError {
        StorageError::TooLarge {
            max_mb: self.max_file_size_mb,
        }
    }

    /// Reject `path` if its deepest existing ancestor resolves, through
    /// symbolic links, to somewhere outside the root.
    async fn confine(&self, path: &Path) -> Result<(), StorageError> {
        let root = self.resolver.root();
        let mut candidate: Option<&Path> = Some(path);

        while let Some(current) = candidate {
            match fs::canonicalize(current).await {
                Ok(real) if real.starts_with(root) => return Ok(()),
                Ok(real) => {
                    warn!(
                        path = %path.display(),
                        target = %real.display(),
                        "Symbolic link escapes storage root"
                    );
                    return Err(StorageError::invalid_path("symlink escape"));
                }
                Err(e) if is_missing(&e) => candidate = current.parent(),
                Err(e) => return Err(e.into()),
            }
        }

        Err(StorageError::invalid_path("outside root"))
    }
}

async fn is_dir(path: &Path) -> Result<bool, StorageError> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if is_missing(&e) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Folders between `dir` and its deepest existing ancestor, deepest first.
async fn missing_folders(dir: &Path) -> Result<Vec<PathBuf>, StorageError> {
    let mut missing = Vec::new();
    let mut current = Some(dir);
    while let Some(path) = current {
        match fs::metadata(path).await {
            Ok(_) => break,
            Err(e) if is_missing(&e) => {
                missing.push(path.to_path_buf());
                current = path.parent();
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(missing)
}

fn is_missing(err: &std::io::Error) -> bool {
    matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}
