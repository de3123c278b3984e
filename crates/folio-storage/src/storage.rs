//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for resolving logical paths to bytes,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # Logical Path Convention
//!
//! All path parameters are **logical paths**, not file paths:
//! - `"markdown-template.html"` - top-level object
//! - `"articles/intro.md"` - nested object
//! - `"/games/elden-ring.md"` - a leading slash is tolerated and ignored
//!
//! Logical paths never carry a protocol or host. Storage implementations
//! handle the mapping to their internal layout.

use std::borrow::Cow;
use std::path::PathBuf;

use async_trait::async_trait;

/// Raw bytes fetched from a content store.
///
/// Immutable once fetched and owned by a single request/render cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawAsset {
    path: String,
    bytes: Vec<u8>,
}

impl RawAsset {
    /// Create an asset from its logical path and contents.
    #[must_use]
    pub fn new(path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            bytes: bytes.into(),
        }
    }

    /// Logical path the asset was fetched from.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Contents decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Consume the asset and return its contents.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Semantic error categories.
///
/// `NotFound` is the only kind callers are expected to recover from; every
/// other kind is an opaque backend failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Object does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid logical path (empty, or escaping the store root).
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Whether the object simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }

    /// Whether the path names no object, either because nothing is stored
    /// there or because it is not a valid key at all.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(
            self.kind,
            StorageErrorKind::NotFound | StorageErrorKind::InvalidPath
        )
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    ///
    /// Reading a directory is reported as `NotFound`: a directory is never an
    /// object in a content store.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::IsADirectory => {
                StorageErrorKind::NotFound
            }
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read-only content store.
///
/// Resolves logical paths to raw bytes. Reads have no side effects, so a
/// caller may abandon a pending read at any point.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fetch the object at a logical path.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with kind [`StorageErrorKind::NotFound`] if
    /// no object exists at `path` and [`StorageErrorKind::InvalidPath`] if
    /// `path` can never name an object. Any other kind is an opaque failure.
    async fn read(&self, path: &str) -> Result<RawAsset, StorageError>;

    /// List logical paths of the objects directly inside `dir`, sorted.
    ///
    /// Nested directories are not descended into.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory can't be listed.
    async fn list(&self, dir: &str) -> Result<Vec<String>, StorageError>;
}

/// Normalize a logical path: strip leading slashes.
pub(crate) fn normalize(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Join a directory and a name into a logical path.
pub(crate) fn join(dir: &str, name: &str) -> String {
    let dir = normalize(dir).trim_end_matches('/');
    if dir.is_empty() {
        name.to_owned()
    } else {
        format!("{dir}/{name}")
    }
}
