//! Tree-sitter syntax highlighting for fenced code blocks.
//!
//! Languages are registered once into a [`LanguageRegistry`] that lives inside
//! the immutable [`RenderConfig`](crate::RenderConfig). Each code block is
//! highlighted independently: a failure produces a
//! [`HighlightedBlock::Plain`] for that block only.

use std::collections::HashMap;
use std::fmt::Write;

use tree_sitter_highlight::{Highlight, HighlightConfiguration, HighlightEvent, Highlighter};

use crate::state::escape_html;

/// Language assumed for code blocks without a (registered) language hint.
pub const DEFAULT_LANGUAGE: &str = "javascript";

/// Names accepted for the JavaScript grammar.
const JAVASCRIPT_ALIASES: &[&str] = &["javascript", "js", "jsx", "mjs", "cjs"];

/// Capture names we assign CSS classes to.
/// The index into this array becomes the `Highlight` id.
const HIGHLIGHT_NAMES: &[&str] = &[
    "attribute",
    "comment",
    "constant",
    "constant.builtin",
    "constructor",
    "embedded",
    "function",
    "function.builtin",
    "function.method",
    "keyword",
    "number",
    "operator",
    "property",
    "punctuation.bracket",
    "punctuation.delimiter",
    "punctuation.special",
    "string",
    "string.special",
    "tag",
    "type",
    "type.builtin",
    "variable",
    "variable.builtin",
    "variable.parameter",
];

/// Error highlighting a single code block.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// Neither the hint nor the default language is registered.
    #[error("no highlighter registered for `{0}`")]
    UnknownLanguage(String),
    /// Tree-sitter failed while producing highlight events.
    #[error("highlighting failed: {0}")]
    Highlight(#[from] tree_sitter_highlight::Error),
}

/// Highlighting outcome for one code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HighlightedBlock {
    /// Highlighted inner HTML (`<span class="hljs-*">` spans).
    Highlighted(String),
    /// Unhighlighted source text.
    Plain(String),
}

impl HighlightedBlock {
    /// Highlight `source`, folding a failure into [`HighlightedBlock::Plain`].
    pub fn new(registry: &LanguageRegistry, language: Option<&str>, source: &str) -> Self {
        match registry.highlight(language, source) {
            Ok(html) => Self::Highlighted(html),
            Err(err) => {
                tracing::warn!(
                    language = language.unwrap_or(DEFAULT_LANGUAGE),
                    error = %err,
                    "Code block rendered without highlighting"
                );
                Self::Plain(source.to_owned())
            }
        }
    }

    /// Write the block as a `<pre>` element.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Self::Highlighted(html) => {
                write!(out, r#"<pre class="hljs"><code>{html}</code></pre>"#).unwrap();
            }
            Self::Plain(source) => {
                write!(out, "<pre>{}</pre>", escape_html(source)).unwrap();
            }
        }
    }
}

/// Registered tree-sitter grammars keyed by language name.
pub struct LanguageRegistry {
    configs: Vec<HighlightConfiguration>,
    names: HashMap<String, usize>,
    /// Precomputed `hljs-*` class per entry of `HIGHLIGHT_NAMES`.
    classes: Vec<String>,
}

impl LanguageRegistry {
    /// Create a registry with no languages.
    ///
    /// Every block highlighted with an empty registry falls back to plain text.
    #[must_use]
    pub fn empty() -> Self {
        let classes = HIGHLIGHT_NAMES
            .iter()
            .map(|name| format!("hljs-{}", name.replace('.', "-")))
            .collect();

        Self {
            configs: Vec::new(),
            names: HashMap::new(),
            classes,
        }
    }

    /// Create a registry with the built-in JavaScript grammar.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();

        match HighlightConfiguration::new(
            tree_sitter_javascript::LANGUAGE.into(),
            DEFAULT_LANGUAGE,
            tree_sitter_javascript::HIGHLIGHT_QUERY,
            tree_sitter_javascript::INJECTIONS_QUERY,
            tree_sitter_javascript::LOCALS_QUERY,
        ) {
            Ok(config) => registry.register(config, JAVASCRIPT_ALIASES),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load JavaScript highlight queries");
            }
        }

        registry
    }

    /// Register a grammar under one or more names.
    pub fn register(&mut self, mut config: HighlightConfiguration, names: &[&str]) {
        config.configure(HIGHLIGHT_NAMES);
        let index = self.configs.len();
        self.configs.push(config);
        for name in names {
            self.names.insert(name.to_ascii_lowercase(), index);
        }
    }

    /// Whether a language name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(&name.to_ascii_lowercase())
    }

    /// Resolve a language hint, falling back to [`DEFAULT_LANGUAGE`].
    fn resolve(&self, hint: Option<&str>) -> Option<&HighlightConfiguration> {
        hint.and_then(|name| self.names.get(&name.to_ascii_lowercase()))
            .or_else(|| self.names.get(DEFAULT_LANGUAGE))
            .map(|&index| &self.configs[index])
    }

    /// Highlight `source`, returning inner HTML with `<span class="hljs-*">` spans.
    pub fn highlight(&self, hint: Option<&str>, source: &str) -> Result<String, HighlightError> {
        let config = self.resolve(hint).ok_or_else(|| {
            HighlightError::UnknownLanguage(hint.unwrap_or(DEFAULT_LANGUAGE).to_owned())
        })?;

        let bytes = source.as_bytes();
        let mut highlighter = Highlighter::new();
        let events = highlighter.highlight(config, bytes, None, |_| None)?;

        let mut html = String::with_capacity(source.len() * 2);
        for event in events {
            match event? {
                HighlightEvent::Source { start, end } => {
                    html.push_str(&escape_html(&String::from_utf8_lossy(&bytes[start..end])));
                }
                HighlightEvent::HighlightStart(Highlight(index)) => {
                    write!(html, r#"<span class="{}">"#, self.classes[index]).unwrap();
                }
                HighlightEvent::HighlightEnd => html.push_str("</span>"),
            }
        }

        Ok(html)
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
