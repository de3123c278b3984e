//! Content-type classification by path suffix.

/// Coarse file category of a classified path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileCategory {
    Css,
    Js,
    Json,
    Yaml,
    Html,
    Markdown,
    Png,
    Jpg,
    Jpeg,
    Gif,
    Svg,
    Ico,
    Pdf,
    Unknown,
}

/// A registered suffix and its MIME type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentTypeEntry {
    /// Suffix without the leading dot.
    pub suffix: &'static str,
    pub mime_type: &'static str,
    pub category: FileCategory,
}

/// MIME type for paths matching no entry.
pub const DEFAULT_MIME_TYPE: &str = "text/plain";

/// Closed suffix table, scanned in order.
pub const CONTENT_TYPES: &[ContentTypeEntry] = &[
    entry("css", "text/css", FileCategory::Css),
    entry("js", "text/javascript", FileCategory::Js),
    entry("json", "application/json", FileCategory::Json),
    entry("yaml", "text/yaml", FileCategory::Yaml),
    entry("html", "text/html", FileCategory::Html),
    entry("md", "text/markdown", FileCategory::Markdown),
    entry("png", "image/png", FileCategory::Png),
    entry("jpg", "image/jpeg", FileCategory::Jpg),
    entry("jpeg", "image/jpeg", FileCategory::Jpeg),
    entry("gif", "image/gif", FileCategory::Gif),
    entry("svg", "image/svg+xml", FileCategory::Svg),
    entry("ico", "image/x-icon", FileCategory::Ico),
    entry("pdf", "application/pdf", FileCategory::Pdf),
];

const fn entry(
    suffix: &'static str,
    mime_type: &'static str,
    category: FileCategory,
) -> ContentTypeEntry {
    ContentTypeEntry {
        suffix,
        mime_type,
        category,
    }
}

/// Result of classifying a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    pub mime_type: &'static str,
    pub category: FileCategory,
}

impl Classification {
    /// Whether the path is a markdown source.
    #[must_use]
    pub fn is_markdown(&self) -> bool {
        self.category == FileCategory::Markdown
    }
}

/// Classify a path by its suffix.
///
/// Matching is case-sensitive: `notes.MD` is `text/plain`. Never fails.
///
/// ```
/// use folio_site::{FileCategory, classify};
///
/// let class = classify("bundles/splash.css");
/// assert_eq!(class.mime_type, "text/css");
/// assert_eq!(class.category, FileCategory::Css);
/// ```
#[must_use]
pub fn classify(path: &str) -> Classification {
    CONTENT_TYPES
        .iter()
        .find(|entry| {
            path.strip_suffix(entry.suffix)
                .is_some_and(|rest| rest.ends_with('.'))
        })
        .map_or(
            Classification {
                mime_type: DEFAULT_MIME_TYPE,
                category: FileCategory::Unknown,
            },
            |entry| Classification {
                mime_type: entry.mime_type,
                category: entry.category,
            },
        )
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_every_entry_classifies() {
        for entry in CONTENT_TYPES {
            let class = classify(&format!("x.{}", entry.suffix));

            assert_eq!(class.mime_type, entry.mime_type, "suffix {}", entry.suffix);
            assert_eq!(class.category, entry.category);
        }
    }

    #[test]
    fn test_suffixes_unique() {
        let suffixes: HashSet<_> = CONTENT_TYPES.iter().map(|e| e.suffix).collect();

        assert_eq!(suffixes.len(), CONTENT_TYPES.len());
    }

    #[test]
    fn test_unknown_suffix() {
        let class = classify("archive.zip");

        assert_eq!(class.mime_type, "text/plain");
        assert_eq!(class.category, FileCategory::Unknown);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(classify("NOTES.MD").category, FileCategory::Unknown);
    }

    #[test]
    fn test_requires_dot_before_suffix() {
        assert_eq!(classify("cmd").category, FileCategory::Unknown);
        assert_eq!(classify("articles/notjs").category, FileCategory::Unknown);
    }

    #[test]
    fn test_nested_markdown() {
        let class = classify("/articles/ec2-fleet-with-cdk.md");

        assert!(class.is_markdown());
        assert_eq!(class.mime_type, "text/markdown");
    }

    #[test]
    fn test_json_not_js() {
        assert_eq!(classify("data.json").mime_type, "application/json");
        assert_eq!(classify("app.js").mime_type, "text/javascript");
    }
}
