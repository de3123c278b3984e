//! Edge request rewriting.

use std::borrow::Cow;

/// Append `.html` to a request URI that has no `.` anywhere in it.
///
/// Mirrors the CDN edge function that sits in front of the bucket, so
/// `/about` is served from `about.html`. URIs that already contain a dot,
/// in any segment, pass through unchanged.
///
/// ```
/// use folio_site::rewrite_uri;
///
/// assert_eq!(rewrite_uri("/about"), "/about.html");
/// assert_eq!(rewrite_uri("/style.css"), "/style.css");
/// ```
#[must_use]
pub fn rewrite_uri(uri: &str) -> Cow<'_, str> {
    if uri.contains('.') {
        Cow::Borrowed(uri)
    } else {
        Cow::Owned(format!("{uri}.html"))
    }
}
