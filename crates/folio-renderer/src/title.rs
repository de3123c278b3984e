//! Page titles from logical paths.

/// Derive a human-readable title from a logical path.
///
/// The extension is dropped, the file name's dash-separated words are
/// capitalized, and each parent directory is prepended (capitalized as-is)
/// with `" - "` separators. A path with no usable segments yields itself, so
/// the result is never empty for a non-empty input.
///
/// ```
/// use folio_renderer::derive_title;
///
/// assert_eq!(derive_title("/games/elden-ring.md"), "Games - Elden Ring");
/// assert_eq!(
///     derive_title("articles/ec2-fleet-with-cdk.md"),
///     "Articles - Ec2 Fleet With Cdk"
/// );
/// ```
#[must_use]
pub fn derive_title(path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    let stem = match (trimmed.rfind('.'), trimmed.rfind('/')) {
        (Some(dot), Some(slash)) if dot > slash => &trimmed[..dot],
        (Some(dot), None) => &trimmed[..dot],
        _ => trimmed,
    };

    let mut segments: Vec<&str> = stem.split('/').filter(|s| !s.is_empty()).collect();
    let Some(name) = segments.pop() else {
        return path.to_owned();
    };

    let name = name
        .split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    let title = segments
        .into_iter()
        .map(capitalize)
        .chain((!name.is_empty()).then_some(name))
        .collect::<Vec<_>>()
        .join(" - ");

    if title.is_empty() {
        path.to_owned()
    } else {
        title
    }
}

/// Uppercase the first character, leaving the rest unchanged.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
