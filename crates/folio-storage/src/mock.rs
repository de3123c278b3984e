//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::storage::{RawAsset, Storage, StorageError, StorageErrorKind, normalize};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores assets in memory. Use the builder methods to configure the mock
/// with test data and injected failures. Every call to [`Storage::read`] is
/// counted, which lets tests assert that a code path never touched the store.
///
/// # Example
///
/// ```ignore
/// use folio_storage::{MockStorage, Storage, StorageErrorKind};
///
/// let storage = MockStorage::new()
///     .with_text("articles/intro.md", "# Intro")
///     .with_failure("broken.css", StorageErrorKind::Other);
///
/// let asset = storage.read("articles/intro.md").await.unwrap();
/// assert_eq!(storage.read_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    assets: HashMap<String, Vec<u8>>,
    failures: HashMap<String, StorageErrorKind>,
    reads: AtomicUsize,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset with binary contents.
    #[must_use]
    pub fn with_asset(mut self, path: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.assets.insert(normalize(path).to_owned(), bytes.into());
        self
    }

    /// Add an asset with text contents.
    #[must_use]
    pub fn with_text(self, path: &str, text: &str) -> Self {
        self.with_asset(path, text.as_bytes())
    }

    /// Make reads of `path` fail with the given error kind.
    #[must_use]
    pub fn with_failure(mut self, path: &str, kind: StorageErrorKind) -> Self {
        self.failures.insert(normalize(path).to_owned(), kind);
        self
    }

    /// Number of `read` calls made so far.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn read(&self, path: &str) -> Result<RawAsset, StorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let key = normalize(path);

        if let Some(kind) = self.failures.get(key) {
            return Err(StorageError::new(*kind)
                .with_path(path)
                .with_backend(BACKEND));
        }

        self.assets
            .get(key)
            .map(|bytes| RawAsset::new(path, bytes.clone()))
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    async fn list(&self, dir: &str) -> Result<Vec<String>, StorageError> {
        let prefix = normalize(dir).trim_end_matches('/');
        let mut paths: Vec<String> = self
            .assets
            .keys()
            .filter(|key| match key.rsplit_once('/') {
                Some((parent, _)) => parent == prefix,
                None => prefix.is_empty(),
            })
            .cloned()
            .collect();

        if paths.is_empty() && !prefix.is_empty() {
            return Err(StorageError::not_found(dir).with_backend(BACKEND));
        }

        paths.sort();
        Ok(paths)
    }
}
