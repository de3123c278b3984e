//! `[[toc]]` table of contents.
//!
//! A paragraph consisting solely of the marker is swapped for a placeholder
//! during the event pass. Once every heading is known the placeholder is
//! replaced with a nested list of links.

use std::fmt::Write;

use crate::state::{TocEntry, escape_html};

/// Marker text an author writes on its own line.
const MARKER: &str = "[[toc]]";

/// In-output placeholder. Parsed markdown text never contains NUL
/// (pulldown-cmark substitutes U+FFFD), so this cannot collide with content.
pub(crate) const PLACEHOLDER: &str = "\u{0}TOC\u{0}";

/// Whether rendered paragraph content is the TOC marker.
pub(crate) fn is_marker(paragraph_content: &str) -> bool {
    paragraph_content.trim().eq_ignore_ascii_case(MARKER)
}

/// Replace every placeholder in `html` with the rendered table of contents.
pub(crate) fn substitute(html: &mut String, entries: &[TocEntry]) {
    if html.contains(PLACEHOLDER) {
        *html = html.replace(PLACEHOLDER, &render_toc(entries));
    }
}

/// Render entries as `<div class="table-of-contents">` with nested `<ul>`s.
///
/// A deeper heading opens a list inside the previous item. A shallower one
/// closes lists until its parent level is shallower than itself.
pub(crate) fn render_toc(entries: &[TocEntry]) -> String {
    let mut out = String::from(r#"<div class="table-of-contents">"#);
    // Levels of the currently open <ul> elements.
    let mut stack: Vec<u8> = Vec::new();

    for entry in entries {
        match stack.last() {
            None => {
                out.push_str("<ul>");
                stack.push(entry.level);
            }
            Some(&open) if entry.level > open => {
                out.push_str("<ul>");
                stack.push(entry.level);
            }
            Some(_) => {
                out.push_str("</li>");
                while stack.len() > 1 && stack[stack.len() - 2] >= entry.level {
                    stack.pop();
                    out.push_str("</ul></li>");
                }
            }
        }
        write!(
            out,
            r##"<li><a href="#{}">{}</a>"##,
            escape_html(&entry.id),
            escape_html(&entry.title)
        )
        .unwrap();
    }

    if !stack.is_empty() {
        out.push_str("</li>");
    }
    while stack.pop().is_some() {
        out.push_str("</ul>");
        if !stack.is_empty() {
            out.push_str("</li>");
        }
    }

    out.push_str("</div>");
    out
}
