//! ID normalization utilities.
//!
//! Document identifiers (slugs) end up in URLs, so they are held to a strict
//! shape: lowercase ASCII letters and digits separated by single hyphens.

/// Normalize an identifier to lowercase kebab-case.
///
/// Used to suggest a valid slug when an author's slug is rejected.
///
/// Performs the following transformations:
/// 1. Trims leading/trailing whitespace
/// 2. Converts to lowercase
/// 3. Replaces underscores with hyphens
/// 4. Collapses multiple whitespace into single hyphens
///
/// # Examples
///
/// ```
/// use vitrine_core::util::ids::normalize_id;
///
/// assert_eq!(normalize_id("Deep Ubuntu AI"), "deep-ubuntu-ai");
/// assert_eq!(normalize_id("cowcow_cli"), "cowcow-cli");
/// assert_eq!(normalize_id("  Mixed   Case  "), "mixed-case");
/// ```
pub fn normalize_id(id: &str) -> String {
    id.trim()
        .to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("-")
}

/// Check whether a slug is safe to use as a URL path segment.
///
/// Accepts non-empty strings of `[a-z0-9]` groups joined by single hyphens.
///
/// ```
/// use vitrine_core::util::ids::is_url_safe_slug;
///
/// assert!(is_url_safe_slug("deep-ubuntu-ai"));
/// assert!(!is_url_safe_slug("Deep Ubuntu"));
/// assert!(!is_url_safe_slug("-leading"));
/// ```
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.split('-').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}
