//! Immutable markdown configuration.

use std::ops::RangeInclusive;

use pulldown_cmark::Options;

use crate::highlight::LanguageRegistry;

/// Heading levels that receive anchors and TOC entries by default.
const DEFAULT_LEVELS: RangeInclusive<u8> = 1..=4;

/// Process-wide markdown configuration.
///
/// Built once at startup and shared (typically through `Arc`) by every
/// render. Rendering never mutates it.
///
/// # Example
///
/// ```
/// use folio_renderer::RenderConfig;
///
/// let config = RenderConfig::new().with_anchor_levels(1..=3);
/// assert!(config.anchors_heading(3));
/// assert!(!config.anchors_heading(4));
/// ```
pub struct RenderConfig {
    registry: LanguageRegistry,
    anchor_levels: RangeInclusive<u8>,
    toc_levels: RangeInclusive<u8>,
    allow_raw_html: bool,
}

impl RenderConfig {
    /// Configuration with the JavaScript highlighter, anchors and TOC for
    /// levels 1 to 4, raw HTML escaped.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: LanguageRegistry::with_defaults(),
            anchor_levels: DEFAULT_LEVELS,
            toc_levels: DEFAULT_LEVELS,
            allow_raw_html: false,
        }
    }

    /// Replace the highlighter registry.
    #[must_use]
    pub fn with_registry(mut self, registry: LanguageRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Heading levels that receive `id` anchors.
    #[must_use]
    pub fn with_anchor_levels(mut self, levels: RangeInclusive<u8>) -> Self {
        self.anchor_levels = levels;
        self
    }

    /// Heading levels listed in the `[[toc]]` table of contents.
    #[must_use]
    pub fn with_toc_levels(mut self, levels: RangeInclusive<u8>) -> Self {
        self.toc_levels = levels;
        self
    }

    /// Pass raw HTML in markdown through instead of escaping it.
    #[must_use]
    pub fn with_raw_html(mut self, allow: bool) -> Self {
        self.allow_raw_html = allow;
        self
    }

    /// Highlighter registry.
    #[must_use]
    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Whether headings of `level` get an anchor.
    #[must_use]
    pub fn anchors_heading(&self, level: u8) -> bool {
        self.anchor_levels.contains(&level)
    }

    /// Whether headings of `level` appear in the table of contents.
    #[must_use]
    pub fn lists_in_toc(&self, level: u8) -> bool {
        self.toc_levels.contains(&level)
    }

    /// Whether raw HTML passes through unescaped.
    #[must_use]
    pub fn allows_raw_html(&self) -> bool {
        self.allow_raw_html
    }

    /// pulldown-cmark options: smart punctuation plus GFM tables,
    /// strikethrough and task lists.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}
