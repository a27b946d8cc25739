//! Meta-description preparation for crawler snapshots.
//!
//! Product and category descriptions arrive as pre-sanitized HTML. A meta
//! description needs the plain text of that: tags stripped, entities
//! decoded, whitespace collapsed, capped at 160 characters, then re-escaped
//! for embedding in a `<meta>` attribute.

use crate::html::esc_html;
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum meta-description length in characters, post-stripping.
pub const META_DESCRIPTION_LIMIT: usize = 160;

#[allow(clippy::unwrap_used)] // patterns are literals, checked by tests
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
#[allow(clippy::unwrap_used)]
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\u{a0}]+").unwrap());

/// Reduce raw description HTML to a crawler-friendly meta description.
///
/// An empty input yields the literal `"empty"` so the host template never
/// emits a blank `<meta name="description">` tag. The cap is applied to
/// characters, not bytes, before the final escape (escaping may legitimately
/// push the byte length past the cap).
#[must_use]
pub fn prepare_meta_description(raw: &str) -> String {
    if raw.is_empty() {
        return "empty".to_string();
    }

    let stripped = TAG_RE.replace_all(raw, "");
    let decoded = html_escape::decode_html_entities(stripped.as_ref());
    let collapsed = WHITESPACE_RE.replace_all(decoded.as_ref(), " ");
    let trimmed = collapsed.trim_matches(|c: char| {
        c == ' ' || c == '\t' || c == '\u{a0}' || c == '\n' || c == '\r'
    });
    let capped: String = trimmed.chars().take(META_DESCRIPTION_LIMIT).collect();

    esc_html(&capped)
}
