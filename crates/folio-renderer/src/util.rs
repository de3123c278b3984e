//! Shared utility functions for markdown rendering.

use pulldown_cmark::HeadingLevel;

/// URL schemes never emitted as link targets.
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "vbscript:", "file:", "data:"];

/// `data:` image types still allowed.
const ALLOWED_DATA_IMAGES: &[&str] = &[
    "data:image/gif;",
    "data:image/png;",
    "data:image/jpeg;",
    "data:image/webp;",
];

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Whether a link destination is safe to emit.
///
/// Script-bearing schemes are rejected; `data:` URLs are only accepted for
/// common raster image types. Matching ignores case and surrounding whitespace.
#[must_use]
pub(crate) fn is_safe_url(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();

    if ALLOWED_DATA_IMAGES.iter().any(|prefix| url.starts_with(prefix)) {
        return true;
    }

    !BLOCKED_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}
