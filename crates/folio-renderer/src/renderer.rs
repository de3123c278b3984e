//! Event-driven markdown to HTML renderer.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, LinkType, Parser, Tag, TagEnd};

use crate::config::RenderConfig;
use crate::highlight::HighlightedBlock;
use crate::state::{CodeBlockState, HeadingState, ImageState, TableState, TocEntry, escape_html};
use crate::toc;
use crate::util::{heading_level_to_num, is_safe_url};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Anchored headings within the configured TOC levels, in document order.
    pub toc: Vec<TocEntry>,
}

/// Image waiting for its alt text.
struct PendingImage {
    src: String,
    title: String,
    safe: bool,
}

/// Markdown renderer producing an HTML fragment.
///
/// A renderer is single-use: [`render`](Self::render) consumes it. All
/// configuration is borrowed from a shared [`RenderConfig`].
pub struct MarkdownRenderer<'c> {
    config: &'c RenderConfig,
    output: String,
    /// Code block rendering state.
    code: CodeBlockState,
    /// Table rendering state.
    table: TableState,
    /// Image alt text capture state.
    image: ImageState,
    /// Heading anchors and TOC entries.
    heading: HeadingState,
    pending_image: Option<PendingImage>,
    /// Open links; `false` for links dropped as unsafe.
    link_stack: Vec<bool>,
    /// Output offset of the open paragraph's `<p>`.
    paragraph_start: Option<usize>,
}

impl<'c> MarkdownRenderer<'c> {
    /// Create a renderer bound to `config`.
    #[must_use]
    pub fn new(config: &'c RenderConfig) -> Self {
        Self {
            config,
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::default(),
            pending_image: None,
            link_stack: Vec::new(),
            paragraph_start: None,
        }
    }

    /// Render markdown to an HTML fragment.
    ///
    /// Never fails: code blocks that cannot be highlighted degrade to plain
    /// `<pre>` blocks.
    pub fn render(mut self, markdown: &str) -> RenderResult {
        let parser = Parser::new_ext(markdown, self.config.parser_options());
        for event in parser {
            self.process_event(event);
        }

        let toc = self.heading.take_toc();
        let mut html = std::mem::take(&mut self.output);
        toc::substitute(&mut html, &toc);

        RenderResult { html, toc }
    }

    /// Push content to output or heading buffer based on context.
    ///
    /// Markup inside image alt text is dropped; only its text is kept.
    fn push_inline(&mut self, content: &str) {
        if self.image.is_active() {
            return;
        }
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.push_inline("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => self.task_list_marker(checked),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not enabled in parser options
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.paragraph_start = Some(self.output.len());
                self.output.push_str("<p>");
            }
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag once the ID is known.
                let level = heading_level_to_num(level);
                self.heading.start_heading(
                    level,
                    self.config.anchors_heading(level),
                    self.config.lists_in_toc(level),
                );
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => match kind {
                CodeBlockKind::Fenced(info) => {
                    let language = info
                        .split_whitespace()
                        .next()
                        .map(str::to_owned);
                    self.code.start(true, language);
                }
                CodeBlockKind::Indented => self.code.start(false, None),
            },
            Tag::HtmlBlock => {
                if !self.config.allows_raw_html() {
                    self.output.push_str("<p>");
                }
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => {
                let href = if link_type == LinkType::Email {
                    format!("mailto:{dest_url}")
                } else {
                    dest_url.into_string()
                };

                let safe = is_safe_url(&href);
                if safe {
                    let mut link_tag = format!(r#"<a href="{}""#, escape_html(&href));
                    if !title.is_empty() {
                        write!(link_tag, r#" title="{}""#, escape_html(&title)).unwrap();
                    }
                    link_tag.push('>');
                    self.push_inline(&link_tag);
                } else {
                    tracing::debug!(href = %href, "Dropped unsafe link target");
                }
                self.link_stack.push(safe);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text is collected until the end tag.
                self.image.start();
                self.pending_image = Some(PendingImage {
                    safe: is_safe_url(&dest_url),
                    src: dest_url.into_string(),
                    title: title.into_string(),
                });
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.end_paragraph(),
            TagEnd::Heading(_) => {
                if let Some(heading) = self.heading.complete_heading() {
                    let level = heading.level;
                    let html = heading.html.trim();
                    match heading.id {
                        Some(id) => {
                            write!(self.output, r#"<h{level} id="{id}">{html}</h{level}>"#)
                                .unwrap();
                        }
                        None => write!(self.output, "<h{level}>{html}</h{level}>").unwrap(),
                    }
                }
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                let (fenced, language, content) = self.code.end();
                if fenced {
                    HighlightedBlock::new(self.config.registry(), language.as_deref(), &content)
                        .write_html(&mut self.output);
                } else {
                    write!(self.output, "<pre><code>{}</code></pre>", escape_html(&content))
                        .unwrap();
                }
            }
            TagEnd::HtmlBlock => {
                if !self.config.allows_raw_html() {
                    self.output.push_str("</p>");
                }
            }
            TagEnd::List(ordered) => {
                self.output.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition | TagEnd::MetadataBlock(_) => {}
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => {
                if self.link_stack.pop().unwrap_or(false) {
                    self.push_inline("</a>");
                }
            }
            TagEnd::Image => self.end_image(),
        }
    }

    /// Close a paragraph, swapping a lone `[[toc]]` for the TOC placeholder.
    fn end_paragraph(&mut self) {
        let Some(start) = self.paragraph_start.take() else {
            self.output.push_str("</p>");
            return;
        };

        if toc::is_marker(&self.output[start + "<p>".len()..]) {
            self.output.truncate(start);
            self.output.push_str(toc::PLACEHOLDER);
        } else {
            self.output.push_str("</p>");
        }
    }

    fn end_image(&mut self) {
        let alt = self.image.end();
        let Some(image) = self.pending_image.take() else {
            return;
        };

        if !image.safe {
            self.push_inline(&escape_html(&alt));
            return;
        }

        let mut tag = format!(
            r#"<img src="{}" alt="{}""#,
            escape_html(&image.src),
            escape_html(&alt)
        );
        if !image.title.is_empty() {
            write!(tag, r#" title="{}""#, escape_html(&image.title)).unwrap();
        }
        tag.push('>');
        self.push_inline(&tag);
    }

    fn text(&mut self, text: &str) {
        // Priority: code > image > heading > normal text
        if self.code.is_active() {
            self.code.push_str(text);
            return;
        }

        if self.image.is_active() {
            self.image.push_str(text);
            return;
        }

        if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&escape_html(text));
            return;
        }

        self.output.push_str(&escape_html(text));
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
            return;
        }

        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        self.push_inline(&format!("<code>{}</code>", escape_html(code)));
    }

    fn raw_html(&mut self, html: &str) {
        if self.config.allows_raw_html() {
            self.push_inline(html);
        } else {
            self.push_inline(&escape_html(html));
        }
    }

    fn soft_break(&mut self) {
        if self.image.is_active() {
            self.image.push_str(" ");
        } else {
            self.push_inline("\n");
        }
    }

    fn task_list_marker(&mut self, checked: bool) {
        if checked {
            self.output
                .push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            self.output.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::highlight::LanguageRegistry;

    fn render(markdown: &str) -> RenderResult {
        let config = RenderConfig::new();
        MarkdownRenderer::new(&config).render(markdown)
    }

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(render("Hello, world!").html, "<p>Hello, world!</p>");
    }

    #[test]
    fn test_heading_with_id() {
        let result = render("## Section Title");

        assert_eq!(result.html, r#"<h2 id="section-title">Section Title</h2>"#);
        assert_eq!(
            result.toc,
            vec![TocEntry {
                level: 2,
                title: "Section Title".to_owned(),
                id: "section-title".to_owned(),
            }]
        );
    }

    #[test]
    fn test_deep_headings_have_no_anchor() {
        let result = render("##### Five\n\n###### Six");

        assert_eq!(result.html, "<h5>Five</h5><h6>Six</h6>");
        assert!(result.toc.is_empty());
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let result = render("# Notes\n\n## Notes\n\n### Notes");

        assert_eq!(
            result.html,
            r#"<h1 id="notes">Notes</h1><h2 id="notes-1">Notes</h2><h3 id="notes-2">Notes</h3>"#
        );
    }

    #[test]
    fn test_heading_with_inline_code() {
        let result = render("## The `render` function");

        assert_eq!(
            result.html,
            r#"<h2 id="the-render-function">The <code>render</code> function</h2>"#
        );
    }

    #[test]
    fn test_smart_punctuation() {
        let result = render(r#""Hello" -- it's done..."#);

        assert!(result.html.contains('\u{201c}'), "{}", result.html);
        assert!(result.html.contains('\u{2013}'), "{}", result.html);
        assert!(result.html.contains('\u{2019}'), "{}", result.html);
        assert!(result.html.contains('\u{2026}'), "{}", result.html);
    }

    #[test]
    fn test_fenced_block_without_language_is_highlighted() {
        let result = render("```\nconst x = 1;\n```");

        assert!(result.html.starts_with(r#"<pre class="hljs"><code>"#));
        assert!(result.html.contains("hljs-keyword"));
    }

    #[test]
    fn test_fenced_block_with_language() {
        let result = render("```js title=app.js\nlet s = \"a\";\n```");

        assert!(result.html.contains("hljs-string"), "{}", result.html);
    }

    #[test]
    fn test_indented_block_is_plain() {
        let result = render("    a < b\n");

        assert_eq!(result.html, "<pre><code>a &lt; b\n</code></pre>");
    }

    #[test]
    fn test_unhighlightable_block_falls_back_to_pre() {
        let config = RenderConfig::new().with_registry(LanguageRegistry::empty());
        let result = MarkdownRenderer::new(&config).render("```js\nx < 1\n```\n\nafter");

        assert_eq!(result.html, "<pre>x &lt; 1\n</pre><p>after</p>");
    }

    #[test]
    fn test_toc_marker_replaced() {
        let result = render("[[toc]]\n\n# Intro\n\n## Setup\n\n# Usage");

        assert_eq!(
            result.html,
            concat!(
                r#"<div class="table-of-contents"><ul>"#,
                r##"<li><a href="#intro">Intro</a><ul><li><a href="#setup">Setup</a></li></ul></li>"##,
                r##"<li><a href="#usage">Usage</a></li>"##,
                "</ul></div>",
                r#"<h1 id="intro">Intro</h1><h2 id="setup">Setup</h2><h1 id="usage">Usage</h1>"#,
            )
        );
    }

    #[test]
    fn test_no_marker_no_toc() {
        let result = render("# Intro\n\ntext");

        assert!(!result.html.contains("table-of-contents"));
        assert_eq!(result.toc.len(), 1);
    }

    #[test]
    fn test_toc_marker_in_sentence_is_text() {
        let result = render("see [[toc]] here");

        assert_eq!(result.html, "<p>see [[toc]] here</p>");
    }

    #[test]
    fn test_raw_html_escaped_by_default() {
        let result = render("hi <b>there</b>");

        assert_eq!(result.html, "<p>hi &lt;b&gt;there&lt;/b&gt;</p>");
    }

    #[test]
    fn test_raw_html_allowed() {
        let config = RenderConfig::new().with_raw_html(true);
        let result = MarkdownRenderer::new(&config).render("hi <b>there</b>");

        assert_eq!(result.html, "<p>hi <b>there</b></p>");
    }

    #[test]
    fn test_link() {
        let result = render(r#"[site](https://example.com "Example")"#);

        assert_eq!(
            result.html,
            r#"<p><a href="https://example.com" title="Example">site</a></p>"#
        );
    }

    #[test]
    fn test_unsafe_link_renders_text_only() {
        let result = render("[click](javascript:alert(1))");

        assert_eq!(result.html, "<p>click</p>");
    }

    #[test]
    fn test_email_autolink() {
        let result = render("<me@example.com>");

        assert_eq!(
            result.html,
            r#"<p><a href="mailto:me@example.com">me@example.com</a></p>"#
        );
    }

    #[test]
    fn test_image() {
        let result = render("![A `cat`](/img/cat.png)");

        assert_eq!(result.html, r#"<p><img src="/img/cat.png" alt="A cat"></p>"#);
    }

    #[test]
    fn test_image_alt_drops_inline_markup() {
        let result = render("![*big* **cat** [here](/x)](/img/cat.png)");

        assert_eq!(
            result.html,
            r#"<p><img src="/img/cat.png" alt="big cat here"></p>"#
        );
    }

    #[test]
    fn test_table() {
        let result = render("| A | B |\n|:--|--:|\n| 1 | 2 |");

        assert_eq!(
            result.html,
            concat!(
                r#"<table><thead><tr><th style="text-align:left">A</th><th style="text-align:right">B</th></tr></thead>"#,
                r#"<tbody><tr><td style="text-align:left">1</td><td style="text-align:right">2</td></tr></tbody></table>"#,
            )
        );
    }

    #[test]
    fn test_lists_and_tasks() {
        let result = render("3. three\n4. four\n\n- [x] done\n- [ ] todo");

        assert_eq!(
            result.html,
            concat!(
                r#"<ol start="3"><li>three</li><li>four</li></ol>"#,
                r#"<ul><li><input type="checkbox" checked disabled> done</li>"#,
                r#"<li><input type="checkbox" disabled> todo</li></ul>"#,
            )
        );
    }

    #[test]
    fn test_strikethrough_and_emphasis() {
        let result = render("~~old~~ *new* **bold**");

        assert_eq!(
            result.html,
            "<p><s>old</s> <em>new</em> <strong>bold</strong></p>"
        );
    }
}
