//! Application state.
//!
//! Shared state for all request handlers.

use folio_renderer::{TemplateTokens, render_template};
use folio_site::{AssetService, PageRenderer};

/// Shell for pages the server builds itself (splash and 404).
const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");

/// Site identity for the built-in pages.
#[derive(Clone, Debug)]
pub struct SiteSettings {
    /// Document title of the splash pages.
    pub title: String,
    /// Main heading text.
    pub heading: String,
    /// Stylesheet href.
    pub styles: String,
}

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Markdown article rendering.
    pub(crate) pages: PageRenderer,
    /// Asset fallback.
    pub(crate) assets: AssetService,
    /// Pre-rendered home and article index page.
    pub(crate) splash_page: String,
    /// Pre-rendered not found page.
    pub(crate) not_found_page: String,
    /// Whether the edge `.html` rewrite is applied.
    pub(crate) html_rewrite: bool,
}

impl AppState {
    pub(crate) fn new(pages: PageRenderer, site: &SiteSettings, html_rewrite: bool) -> Self {
        Self {
            assets: AssetService::new(pages.clone()),
            pages,
            splash_page: splash_page(site),
            not_found_page: not_found_page(site),
            html_rewrite,
        }
    }
}

/// Home page: the site heading on the splash stylesheet.
fn splash_page(site: &SiteSettings) -> String {
    let body = format!(r#"<h1 class="main-title">{}</h1>"#, site.heading);
    let styles = format!(r#"<link href="{}" rel="stylesheet" />"#, site.styles);
    render_template(
        PAGE_TEMPLATE,
        TemplateTokens::new()
            .with_title(&site.title)
            .with_body(&body)
            .with_styles(&styles),
    )
}

fn not_found_page(site: &SiteSettings) -> String {
    let styles = format!(r#"<link rel="stylesheet" href="{}" />"#, site.styles);
    render_template(
        PAGE_TEMPLATE,
        TemplateTokens::new()
            .with_title("404")
            .with_body(r#"<h1 class="main-title">404</h1>"#)
            .with_styles(&styles),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteSettings {
        SiteSettings {
            title: "jackbliss.co.uk".to_owned(),
            heading: "Jack Bliss".to_owned(),
            styles: "/bundles/splash.css".to_owned(),
        }
    }

    #[test]
    fn test_splash_page() {
        let html = splash_page(&site());

        assert!(html.contains("<title>jackbliss.co.uk</title>"));
        assert!(html.contains(r#"<h1 class="main-title">Jack Bliss</h1>"#));
        assert!(html.contains(r#"<link href="/bundles/splash.css" rel="stylesheet" />"#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_not_found_page() {
        let html = not_found_page(&site());

        assert!(html.contains("<title>404</title>"));
        assert!(html.contains(r#"<h1 class="main-title">404</h1>"#));
    }
}
