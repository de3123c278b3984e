//! State structs tracked while walking pulldown-cmark events.

use std::collections::HashMap;

use pulldown_cmark::Alignment;

/// Slug used when a heading has no alphanumeric text.
const EMPTY_SLUG: &str = "section";

/// State for tracking code block rendering.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    /// Whether we're inside a code block.
    active: bool,
    /// Whether the current block is fenced (indented blocks are never highlighted).
    fenced: bool,
    /// Language hint of the current block.
    language: Option<String>,
    /// Buffer for code block content.
    buffer: String,
}

impl CodeBlockState {
    /// Start a new code block.
    pub fn start(&mut self, fenced: bool, language: Option<String>) {
        self.active = true;
        self.fenced = fenced;
        self.language = language;
        self.buffer.clear();
    }

    /// End the current code block and return (fenced, language, content).
    pub fn end(&mut self) -> (bool, Option<String>, String) {
        self.active = false;
        (
            self.fenced,
            self.language.take(),
            std::mem::take(&mut self.buffer),
        )
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Append text to the code block buffer.
    pub fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// State for tracking table rendering.
#[derive(Default)]
pub(crate) struct TableState {
    in_head: bool,
    /// Column alignments for current table.
    alignments: Vec<Alignment>,
    cell_index: usize,
}

impl TableState {
    /// Start a new table with column alignments.
    pub fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub fn end_head(&mut self) {
        self.in_head = false;
    }

    pub fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Alignment attribute for the current cell.
    pub fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align:left""#,
            Some(Alignment::Center) => r#" style="text-align:center""#,
            Some(Alignment::Right) => r#" style="text-align:right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// State for capturing image alt text.
#[derive(Default)]
pub(crate) struct ImageState {
    active: bool,
    alt_text: String,
}

impl ImageState {
    pub fn start(&mut self) {
        self.active = true;
        self.alt_text.clear();
    }

    /// End image capture and return the alt text.
    pub fn end(&mut self) -> String {
        self.active = false;
        std::mem::take(&mut self.alt_text)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn push_str(&mut self, text: &str) {
        self.alt_text.push_str(text);
    }
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// A heading whose closing tag has been reached.
pub(crate) struct CompletedHeading {
    pub level: u8,
    /// Anchor, when the level is anchored.
    pub id: Option<String>,
    /// Inner HTML with inline formatting.
    pub html: String,
}

/// State for tracking headings and collecting TOC entries.
#[derive(Default)]
pub(crate) struct HeadingState {
    /// Current heading level being processed (None if not in a heading).
    current_level: Option<u8>,
    anchored: bool,
    listed: bool,
    /// Buffer for heading plain text (for slug and TOC title).
    text: String,
    /// Buffer for heading HTML (with inline formatting).
    html: String,
    toc: Vec<TocEntry>,
    /// Counter for generating unique heading IDs.
    id_counts: HashMap<String, usize>,
}

impl HeadingState {
    /// Check if we're currently inside a heading.
    pub fn is_active(&self) -> bool {
        self.current_level.is_some()
    }

    /// Start tracking a heading.
    ///
    /// `listed` only takes effect for anchored headings: a TOC entry needs a
    /// target.
    pub fn start_heading(&mut self, level: u8, anchored: bool, listed: bool) {
        self.current_level = Some(level);
        self.anchored = anchored;
        self.listed = anchored && listed;
        self.text.clear();
        self.html.clear();
    }

    /// Complete the current heading, recording a TOC entry when listed.
    pub fn complete_heading(&mut self) -> Option<CompletedHeading> {
        let level = self.current_level.take()?;
        let text = std::mem::take(&mut self.text);
        let html = std::mem::take(&mut self.html);

        let id = self.anchored.then(|| self.generate_id(&text));
        if let (true, Some(id)) = (self.listed, &id) {
            self.toc.push(TocEntry {
                level,
                title: text.trim().to_owned(),
                id: id.clone(),
            });
        }

        Some(CompletedHeading { level, id, html })
    }

    /// Generate a unique ID: `slug`, then `slug-1`, `slug-2`, ...
    fn generate_id(&mut self, text: &str) -> String {
        let mut base_id = slugify(text);
        if base_id.is_empty() {
            EMPTY_SLUG.clone_into(&mut base_id);
        }
        let count = self.id_counts.entry(base_id.clone()).or_default();
        let id = match *count {
            0 => base_id,
            n => format!("{base_id}-{n}"),
        };
        *count += 1;
        id
    }

    /// Append plain text (used for the slug and TOC title).
    pub fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Append HTML to the heading html buffer.
    pub fn push_html(&mut self, html: &str) {
        self.html.push_str(html);
    }

    pub fn take_toc(&mut self) -> Vec<TocEntry> {
        std::mem::take(&mut self.toc)
    }
}

/// Convert text to URL-safe slug.
///
/// Converts to lowercase, replaces whitespace/dashes/underscores with single dashes,
/// and removes other non-alphanumeric characters.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true; // Prevents leading dash

    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            result.extend(c.to_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("  Spaces  "), "spaces");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("kebab-case"), "kebab-case");
        assert_eq!(slugify("snake_case"), "snake-case");
        assert_eq!(slugify("Café Über"), "café-über");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_code_block_state() {
        let mut state = CodeBlockState::default();
        assert!(!state.is_active());

        state.start(true, Some("js".to_owned()));
        assert!(state.is_active());

        state.push_str("let x = 1;");
        let (fenced, lang, content) = state.end();
        assert!(fenced);
        assert_eq!(lang, Some("js".to_owned()));
        assert_eq!(content, "let x = 1;");
        assert!(!state.is_active());
    }

    #[test]
    fn test_table_state() {
        let mut state = TableState::default();
        state.start(vec![Alignment::Left, Alignment::None, Alignment::Right]);

        state.start_head();
        assert!(state.is_in_head());
        assert_eq!(
            state.current_alignment_style(),
            r#" style="text-align:left""#
        );

        state.next_cell();
        assert_eq!(state.current_alignment_style(), "");

        state.next_cell();
        assert_eq!(
            state.current_alignment_style(),
            r#" style="text-align:right""#
        );

        state.end_head();
        assert!(!state.is_in_head());
    }

    #[test]
    fn test_image_state() {
        let mut state = ImageState::default();

        state.start();
        assert!(state.is_active());
        state.push_str("alt text");

        assert_eq!(state.end(), "alt text");
        assert!(!state.is_active());
    }

    #[test]
    fn test_heading_state_unique_ids() {
        let mut state = HeadingState::default();

        let mut ids = Vec::new();
        for _ in 0..3 {
            state.start_heading(2, true, true);
            state.push_text("Setup");
            ids.push(state.complete_heading().unwrap().id.unwrap());
        }

        assert_eq!(ids, vec!["setup", "setup-1", "setup-2"]);
        assert_eq!(state.take_toc().len(), 3);
    }

    #[test]
    fn test_heading_state_unanchored() {
        let mut state = HeadingState::default();

        state.start_heading(5, false, true);
        state.push_text("Deep");
        let heading = state.complete_heading().unwrap();

        assert_eq!(heading.level, 5);
        assert_eq!(heading.id, None);
        assert!(state.take_toc().is_empty());
    }

    #[test]
    fn test_heading_state_empty_slug() {
        let mut state = HeadingState::default();

        state.start_heading(1, true, false);
        state.push_text("???");
        let heading = state.complete_heading().unwrap();

        assert_eq!(heading.id.as_deref(), Some("section"));
    }
}
