//! Streamed, atomic file writes.
//!
//! Uploads never write to their destination directly. Bytes go to a hidden
//! temporary file next to the destination, which is published only once the
//! whole stream has been written and flushed. A [`RemoveOnDrop`] guard
//! deletes the temporary file on every other exit path, including a dropped
//! (cancelled) upload future. Nothing but the temporary file is ever removed
//! on failure.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use filegate_core::config::storage::BYTES_PER_MEGABYTE;
use filegate_core::types::ByteStream;

use crate::error::StorageError;

/// How a finished temporary file takes the destination's place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Publish {
    /// Rename over the destination, replacing any existing file.
    Replace,
    /// Hard-link to the destination; fails with `AlreadyExists` if it is
    /// taken.
    CreateNew,
}

/// Deletes a file when dropped unless [`RemoveOnDrop::disarm`] was called.
#[derive(Debug)]
pub struct RemoveOnDrop {
    path: PathBuf,
    armed: bool,
}

impl RemoveOnDrop {
    /// Guard `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            armed: true,
        }
    }

    /// Keep the file.
    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for RemoveOnDrop {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove leftover upload file"
            ),
        }
    }
}

/// Removes folders created for an upload that did not complete.
///
/// `dirs` are listed deepest first. Removal stops at the first folder that
/// is no longer empty, so a folder another upload has started using stays.
#[derive(Debug)]
pub struct PruneOnDrop {
    dirs: Vec<PathBuf>,
    armed: bool,
}

impl PruneOnDrop {
    /// Guard `dirs`, deepest first.
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs, armed: true }
    }

    /// Keep the folders.
    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PruneOnDrop {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        for dir in &self.dirs {
            if std::fs::remove_dir(dir).is_err() {
                break;
            }
        }
    }
}

/// Hidden temporary sibling of `destination`.
pub fn temp_path_for(destination: &Path) -> PathBuf {
    let name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    destination.with_file_name(format!(".{name}.{}.upload", Uuid::new_v4().simple()))
}

/// Stream `stream` into `destination`.
///
/// Fails with [`StorageError::TooLarge`] as soon as more than `max_bytes`
/// arrive and with [`StorageError::EmptyFile`] if the stream carried no
/// bytes at all. In both cases, and on any I/O error, the destination is
/// left untouched. With [`Publish::CreateNew`] an existing destination
/// surfaces as an `AlreadyExists` I/O error. Returns the number of bytes
/// written.
pub async fn write_atomic(
    destination: &Path,
    mut stream: ByteStream,
    max_bytes: u64,
    publish: Publish,
) -> Result<u64, StorageError> {
    let temp_path = temp_path_for(destination);
    let guard = RemoveOnDrop::new(&temp_path);

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .await?;

    let mut total_bytes = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        total_bytes += chunk.len() as u64;
        if total_bytes > max_bytes {
            tracing::warn!(
                path = %destination.display(),
                bytes = total_bytes,
                max_bytes,
                "Upload stream exceeded size limit"
            );
            return Err(StorageError::TooLarge {
                max_mb: max_bytes / BYTES_PER_MEGABYTE,
            });
        }
        file.write_all(&chunk).await?;
    }

    if total_bytes == 0 {
        return Err(StorageError::EmptyFile);
    }

    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    match publish {
        Publish::Replace => {
            fs::rename(&temp_path, destination).await?;
            guard.disarm();
        }
        Publish::CreateNew => {
            fs::hard_link(&temp_path, destination).await?;
            if fs::remove_file(&temp_path).await.is_ok() {
                guard.disarm();
            }
        }
    }

    tracing::debug!(
        path = %destination.display(),
        bytes = total_bytes,
        "Wrote file from stream"
    );
    Ok(total_bytes)
}
