//! Asset delivery.
//!
//! [`AssetService`] decides what a request path produces: raw bytes with
//! their classified content type, a rendered markdown page, or nothing at
//! all so the caller can fall back to other routes.

use std::borrow::Cow;

use folio_renderer::derive_title;
use folio_storage::StorageError;
use percent_encoding::percent_decode_str;
use serde::Deserialize;

use crate::classify::classify;
use crate::page::PageRenderer;

/// Content type of rendered markdown pages.
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// Query string fields understood by the asset layer.
#[derive(Debug, Default, Deserialize)]
struct AssetQuery {
    raw: Option<String>,
}

/// An inbound asset request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetRequest {
    /// Decoded logical path, as requested (leading `/` included).
    pub path: String,
    /// Serve markdown as-is instead of rendering it.
    pub raw: bool,
}

impl AssetRequest {
    /// Create a request for `path`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            raw: false,
        }
    }

    /// Set the raw override.
    #[must_use]
    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Build a request from a URI path and optional query string.
    ///
    /// The path is percent-decoded. The raw override is set only by
    /// `raw=true`; any other value, or a query that fails to parse, leaves
    /// rendering on.
    #[must_use]
    pub fn from_uri_parts(path: &str, query: Option<&str>) -> Self {
        let path = match percent_decode_str(path).decode_utf8() {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => percent_decode_str(path).decode_utf8_lossy().into_owned(),
        };

        let raw = query
            .and_then(|query| serde_urlencoded::from_str::<AssetQuery>(query).ok())
            .and_then(|query| query.raw)
            .is_some_and(|raw| raw == "true");

        Self { path, raw }
    }
}

/// A successfully served asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl AssetResponse {
    fn ok(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type,
            body,
        }
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Result of serving an asset request.
#[derive(Debug)]
pub enum Outcome {
    /// The asset layer produced a response.
    Handled(AssetResponse),
    /// Not an asset request, or no such asset; try other routes.
    NotApplicable,
    /// The content store failed; respond with a generic error.
    Fatal(StorageError),
}

impl Outcome {
    /// Map a storage error: a missing object or a path that can never name
    /// one is not an error here.
    fn from_error(err: StorageError) -> Self {
        if err.is_absent() {
            tracing::debug!(error = %err, "Asset not found");
            Self::NotApplicable
        } else {
            Self::Fatal(err)
        }
    }
}

/// Serves assets from the content store, rendering markdown on the way.
#[derive(Clone)]
pub struct AssetService {
    pages: PageRenderer,
}

impl AssetService {
    /// Create a service that renders markdown with `pages`.
    #[must_use]
    pub fn new(pages: PageRenderer) -> Self {
        Self { pages }
    }

    /// Serve one request.
    ///
    /// Paths ending in `/` are never asset requests and do not touch the
    /// store. Markdown is rendered into the page template unless the raw
    /// override is set; everything else is passed through byte-for-byte.
    pub async fn serve(&self, request: &AssetRequest) -> Outcome {
        if request.path.ends_with('/') {
            return Outcome::NotApplicable;
        }

        let class = classify(&request.path);
        let asset = match self.pages.storage().read(&request.path).await {
            Ok(asset) => asset,
            Err(err) => return Outcome::from_error(err),
        };

        if class.is_markdown() && !request.raw {
            let title = derive_title(&request.path);
            return match self.pages.render_markdown(&title, &asset.text()).await {
                Ok(page) => {
                    Outcome::Handled(AssetResponse::ok(HTML_CONTENT_TYPE, page.into_bytes()))
                }
                Err(err) => Outcome::from_error(err),
            };
        }

        Outcome::Handled(AssetResponse::ok(class.mime_type, asset.into_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use folio_renderer::RenderConfig;
    use folio_storage::{MockStorage, Storage, StorageErrorKind};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::page::DEFAULT_TEMPLATE;

    const ARTICLE: &str = "# Elden Ring\n\nIt's \"hard\".\n";

    fn service(storage: MockStorage) -> (Arc<MockStorage>, AssetService) {
        let storage = Arc::new(storage);
        let pages = PageRenderer::new(
            Arc::clone(&storage) as Arc<dyn Storage>,
            Arc::new(RenderConfig::new()),
        );
        (storage, AssetService::new(pages))
    }

    fn populated() -> MockStorage {
        MockStorage::new()
            .with_text(DEFAULT_TEMPLATE, "<title>{{title}}</title>{{body}}")
            .with_text("games/elden-ring.md", ARTICLE)
            .with_text("bundles/splash.css", "body { margin: 0 }")
            .with_asset("favicon.ico", vec![0u8, 159, 146, 150])
    }

    fn handled(outcome: Outcome) -> AssetResponse {
        match outcome {
            Outcome::Handled(response) => response,
            other => panic!("expected Handled, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_trailing_slash_never_queries_store() {
        let (storage, service) = service(populated().with_text("articles/", "oops"));

        for path in ["/", "/articles/", "/games/elden-ring.md/"] {
            let outcome = service.serve(&AssetRequest::new(path)).await;
            assert!(matches!(outcome, Outcome::NotApplicable), "{path}");
        }

        assert_eq!(storage.read_count(), 0);
    }

    #[tokio::test]
    async fn test_markdown_rendered_with_derived_title() {
        let (_, service) = service(populated());

        let response = handled(service.serve(&AssetRequest::new("/games/elden-ring.md")).await);

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, "text/html");
        let html = response.text();
        assert!(html.starts_with("<title>Games - Elden Ring</title>"));
        assert!(html.contains(r#"<h1 id="elden-ring">Elden Ring</h1>"#));
    }

    #[tokio::test]
    async fn test_raw_override_returns_source() {
        let (_, service) = service(populated());

        let request = AssetRequest::new("/games/elden-ring.md").with_raw(true);
        let response = handled(service.serve(&request).await);

        assert_eq!(response.content_type, "text/markdown");
        assert_eq!(response.body, ARTICLE.as_bytes());
    }

    #[tokio::test]
    async fn test_binary_passthrough() {
        let (_, service) = service(populated());

        let response = handled(service.serve(&AssetRequest::new("/favicon.ico")).await);

        assert_eq!(response.content_type, "image/x-icon");
        assert_eq!(response.body, vec![0u8, 159, 146, 150]);
    }

    #[tokio::test]
    async fn test_css_passthrough() {
        let (_, service) = service(populated());

        let response = handled(service.serve(&AssetRequest::new("/bundles/splash.css")).await);

        assert_eq!(response.content_type, "text/css");
        assert_eq!(response.text(), "body { margin: 0 }");
    }

    #[tokio::test]
    async fn test_not_found_is_not_applicable() {
        let (_, service) = service(MockStorage::new());

        for path in ["/missing.md", "/missing.css", "/no-extension"] {
            let outcome = service.serve(&AssetRequest::new(path)).await;
            assert!(matches!(outcome, Outcome::NotApplicable), "{path}");
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_fatal() {
        let (_, service) = service(
            populated().with_failure("bundles/splash.css", StorageErrorKind::PermissionDenied),
        );

        let outcome = service.serve(&AssetRequest::new("/bundles/splash.css")).await;

        assert!(
            matches!(outcome, Outcome::Fatal(ref err) if err.kind == StorageErrorKind::PermissionDenied)
        );
    }

    #[tokio::test]
    async fn test_invalid_path_is_not_applicable() {
        let (_, service) = service(
            populated().with_failure("../secret.css", StorageErrorKind::InvalidPath),
        );

        let outcome = service.serve(&AssetRequest::new("/../secret.css")).await;

        assert!(matches!(outcome, Outcome::NotApplicable));
    }

    #[tokio::test]
    async fn test_missing_template_is_not_applicable() {
        let (_, service) = service(MockStorage::new().with_text("a.md", "# A"));

        let outcome = service.serve(&AssetRequest::new("/a.md")).await;

        assert!(matches!(outcome, Outcome::NotApplicable));
    }

    #[test]
    fn test_from_uri_parts_raw() {
        assert!(AssetRequest::from_uri_parts("/a.md", Some("raw=true")).raw);
        assert!(AssetRequest::from_uri_parts("/a.md", Some("x=1&raw=true")).raw);
        assert!(!AssetRequest::from_uri_parts("/a.md", Some("raw=1")).raw);
        assert!(!AssetRequest::from_uri_parts("/a.md", Some("raw=TRUE")).raw);
        assert!(!AssetRequest::from_uri_parts("/a.md", Some("raw")).raw);
        assert!(!AssetRequest::from_uri_parts("/a.md", None).raw);
    }

    #[test]
    fn test_from_uri_parts_decodes_path() {
        let request = AssetRequest::from_uri_parts("/articles/my%20post.md", None);

        assert_eq!(request.path, "/articles/my post.md");
    }
}
