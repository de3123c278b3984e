//! Markdown pages wrapped in the shared template.
//!
//! [`PageRenderer`] combines a content store, the shared [`RenderConfig`]
//! and a template resource name. Every render fetches the template from the
//! store, so template edits take effect without a restart.

use std::sync::Arc;

use folio_renderer::{MarkdownRenderer, RenderConfig, TemplateTokens, render_template};
use folio_storage::{Storage, StorageError};

/// Template resource used for markdown pages.
pub const DEFAULT_TEMPLATE: &str = "markdown-template.html";

/// Renders markdown into complete HTML pages.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use std::sync::Arc;
/// use folio_renderer::RenderConfig;
/// use folio_site::PageRenderer;
/// use folio_storage::FsStorage;
///
/// let storage = Arc::new(FsStorage::new(PathBuf::from("bucket")));
/// let pages = PageRenderer::new(storage, Arc::new(RenderConfig::new()));
/// let html = pages
///     .render_markdown_from_asset("Games - Elden Ring", "games/elden-ring.md")
///     .await?;
/// ```
#[derive(Clone)]
pub struct PageRenderer {
    storage: Arc<dyn Storage>,
    config: Arc<RenderConfig>,
    template: String,
}

impl PageRenderer {
    /// Create a page renderer using [`DEFAULT_TEMPLATE`].
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, config: Arc<RenderConfig>) -> Self {
        Self {
            storage,
            config,
            template: DEFAULT_TEMPLATE.to_owned(),
        }
    }

    /// Use a different template resource.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Shared content store.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Render markdown text into a page with empty styles.
    pub async fn render_markdown(&self, title: &str, markdown: &str) -> Result<String, StorageError> {
        self.render_markdown_styled(title, markdown, "").await
    }

    /// Render markdown text into a page with a caller-supplied styles token.
    pub async fn render_markdown_styled(
        &self,
        title: &str,
        markdown: &str,
        styles: &str,
    ) -> Result<String, StorageError> {
        let template = self.storage.read(&self.template).await?;
        Ok(self.assemble(&template.text(), title, markdown, styles))
    }

    /// Fetch a markdown asset and render it into a page.
    ///
    /// The asset and the template are fetched concurrently and both fetches
    /// run to completion before either result is inspected. The asset error
    /// wins when both fail.
    pub async fn render_markdown_from_asset(
        &self,
        title: &str,
        path: &str,
    ) -> Result<String, StorageError> {
        let (asset, template) = tokio::join!(
            self.storage.read(path),
            self.storage.read(&self.template)
        );
        let asset = asset?;
        let template = template?;

        tracing::debug!(path, title, "Rendering markdown asset");
        Ok(self.assemble(&template.text(), title, &asset.text(), ""))
    }

    /// Render markdown and substitute it into `template`.
    fn assemble(&self, template: &str, title: &str, markdown: &str, styles: &str) -> String {
        let body = MarkdownRenderer::new(&self.config).render(markdown).html;
        render_template(
            template,
            TemplateTokens::new()
                .with_title(title)
                .with_body(&body)
                .with_styles(styles),
        )
    }
}

#[cfg(test)]
mod tests {
    use folio_storage::{MockStorage, StorageErrorKind};
    use pretty_assertions::assert_eq;

    use super::*;

    const TEMPLATE: &str = "<title>{{title}}</title>{{styles}}<main>{{body}}</main>";

    fn pages(storage: MockStorage) -> (Arc<MockStorage>, PageRenderer) {
        let storage = Arc::new(storage);
        let pages = PageRenderer::new(
            Arc::clone(&storage) as Arc<dyn Storage>,
            Arc::new(RenderConfig::new()),
        );
        (storage, pages)
    }

    #[tokio::test]
    async fn test_render_markdown() {
        let (_, pages) = pages(MockStorage::new().with_text(DEFAULT_TEMPLATE, TEMPLATE));

        let html = pages.render_markdown("Hello", "*hi*").await.unwrap();

        assert_eq!(html, "<title>Hello</title><main><p><em>hi</em></p></main>");
    }

    #[tokio::test]
    async fn test_render_markdown_styled() {
        let (_, pages) = pages(MockStorage::new().with_text(DEFAULT_TEMPLATE, TEMPLATE));

        let html = pages
            .render_markdown_styled("T", "x", "<link />")
            .await
            .unwrap();

        assert_eq!(html, "<title>T</title><link /><main><p>x</p></main>");
    }

    #[tokio::test]
    async fn test_render_markdown_missing_template() {
        let (_, pages) = pages(MockStorage::new());

        let err = pages.render_markdown("T", "x").await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_render_from_asset_heading_code_and_title() {
        let (_, pages) = pages(
            MockStorage::new()
                .with_text(DEFAULT_TEMPLATE, TEMPLATE)
                .with_text(
                    "games/elden-ring.md",
                    "# Elden Ring\n\n```\nconst boss = \"Malenia\";\n```\n",
                ),
        );

        let html = pages
            .render_markdown_from_asset("Games - Elden Ring", "/games/elden-ring.md")
            .await
            .unwrap();

        assert!(html.contains("<title>Games - Elden Ring</title>"));
        assert!(html.contains(r#"<h1 id="elden-ring">Elden Ring</h1>"#));
        assert!(html.contains("<pre"));
    }

    #[tokio::test]
    async fn test_render_from_asset_fetches_both_when_asset_missing() {
        let (storage, pages) = pages(MockStorage::new().with_text(DEFAULT_TEMPLATE, TEMPLATE));

        let err = pages
            .render_markdown_from_asset("T", "missing.md")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(storage.read_count(), 2);
    }

    #[tokio::test]
    async fn test_render_from_asset_template_failure_propagates() {
        let (storage, pages) = pages(
            MockStorage::new()
                .with_text("a.md", "# A")
                .with_failure(DEFAULT_TEMPLATE, StorageErrorKind::PermissionDenied),
        );

        let err = pages.render_markdown_from_asset("A", "a.md").await.unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
        assert_eq!(storage.read_count(), 2);
    }

    #[tokio::test]
    async fn test_custom_template() {
        let (_, pages) = pages(
            MockStorage::new().with_text("articles/article-template.html", "[{{body}}]"),
        );
        let pages = pages.with_template("articles/article-template.html");

        let html = pages.render_markdown("T", "x").await.unwrap();

        assert_eq!(html, "[<p>x</p>]");
    }
}
