//! Content store abstraction for the Folio site server.
//!
//! This crate provides a [`Storage`] trait that resolves logical paths
//! (`"articles/intro.md"`, `"bundles/splash.css"`) to raw bytes. The store is
//! populated ahead of time by the build tooling; the server only ever reads.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with async `read()` and `list()` methods
//! - [`RawAsset`] holding fetched bytes together with their logical path
//! - [`StorageError`] tagged with a [`StorageErrorKind`] so callers can tell
//!   a missing object apart from a failing backend
//! - [`FsStorage`] implementation rooted at a local directory
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use folio_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("bucket"));
//! let asset = storage.read("articles/intro.md").await?;
//! println!("{} bytes", asset.bytes().len());
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{RawAsset, Storage, StorageError, StorageErrorKind};
