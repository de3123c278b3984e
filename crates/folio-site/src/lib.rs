//! Asset resolution and markdown pages for the Folio site server.
//!
//! - [`classify`]: path suffix to MIME type and [`FileCategory`]
//! - [`PageRenderer`]: markdown (inline or fetched from the store) wrapped
//!   in the shared page template
//! - [`AssetService`]: per-request asset delivery returning an explicit
//!   [`Outcome`]
//! - [`rewrite_uri`]: the edge `.html` rewrite

mod classify;
mod page;
mod rewrite;
mod service;

pub use classify::{
    CONTENT_TYPES, Classification, ContentTypeEntry, DEFAULT_MIME_TYPE, FileCategory, classify,
};
pub use page::{DEFAULT_TEMPLATE, PageRenderer};
pub use rewrite::rewrite_uri;
pub use service::{AssetRequest, AssetResponse, AssetService, HTML_CONTENT_TYPE, Outcome};
