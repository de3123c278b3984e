//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading assets from a local directory that
//! mirrors the layout of the deployed bucket.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::storage::{RawAsset, Storage, StorageError, StorageErrorKind, join, normalize};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage rooted at a directory.
///
/// Logical paths are resolved relative to the root. Paths that would escape
/// the root are rejected with [`StorageErrorKind::InvalidPath`].
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use folio_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("bucket"));
/// let template = storage.read("markdown-template.html").await?;
/// ```
#[derive(Clone, Debug)]
pub struct FsStorage {
    /// Root directory of the content store.
    root: PathBuf,
}

impl FsStorage {
    /// Create a filesystem storage rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve a logical path to a file path under the root.
    ///
    /// Rejects empty paths, NUL bytes and parent directory components (`..`)
    /// to prevent traversal (e.g., `../../../etc/passwd`).
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(normalize(path));

        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if path.is_empty() || path.contains('\0') || escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl Storage for FsStorage {
    async fn read(&self, path: &str) -> Result<RawAsset, StorageError> {
        let full_path = self.resolve(path)?;
        tracing::debug!(path, file = %full_path.display(), "Reading asset");

        match tokio::fs::read(&full_path).await {
            Ok(bytes) => Ok(RawAsset::new(path, bytes)),
            Err(err) => Err(StorageError::io(err, Some(full_path)).with_backend(BACKEND)),
        }
    }

    async fn list(&self, dir: &str) -> Result<Vec<String>, StorageError> {
        let full_path = if normalize(dir).is_empty() {
            self.root.clone()
        } else {
            self.resolve(dir)?
        };

        let io_err = |err| StorageError::io(err, Some(full_path.clone())).with_backend(BACKEND);

        let mut entries = tokio::fs::read_dir(&full_path).await.map_err(io_err)?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            let is_file = entry
                .file_type()
                .await
                .is_ok_and(|file_type| file_type.is_file());
            if !is_file {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            paths.push(join(dir, &name));
        }

        paths.sort();
        Ok(paths)
    }
}
