//! Markdown rendering for the Folio site server.
//!
//! This crate turns markdown articles into HTML fragments and wraps them in
//! the shared page shell:
//!
//! - [`MarkdownRenderer`]: pulldown-cmark event renderer with smart
//!   punctuation, heading anchors, an optional `[[toc]]` table of contents
//!   and syntax-highlighted code blocks
//! - [`RenderConfig`]: the immutable, process-wide markdown configuration
//!   (highlighter registrations, anchor and TOC levels)
//! - [`render_template`]: `{{title}}` / `{{body}}` / `{{styles}}` substitution
//! - [`derive_title`]: page title from a logical path
//!
//! # Example
//!
//! ```
//! use folio_renderer::{MarkdownRenderer, RenderConfig};
//!
//! let config = RenderConfig::new();
//! let result = MarkdownRenderer::new(&config).render("# Hello\n\n**Bold** text");
//! assert!(result.html.contains(r#"<h1 id="hello">Hello</h1>"#));
//! ```

mod config;
mod highlight;
mod renderer;
mod state;
mod template;
mod title;
mod toc;
mod util;

pub use config::RenderConfig;
pub use highlight::{DEFAULT_LANGUAGE, HighlightError, HighlightedBlock, LanguageRegistry};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{TocEntry, escape_html, slugify};
pub use template::{TemplateToken, TemplateTokens, render_template};
pub use title::derive_title;
