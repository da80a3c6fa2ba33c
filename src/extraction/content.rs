//! Markup sanitization and size bounding
//!
//! Embedded `data:` URI payloads are stripped from captured markup before it
//! is cut down to the response body bound. Sanitization always runs on the
//! raw markup first so the bound applies to what is actually emitted.

use regex::Regex;
use std::sync::OnceLock;

/// `data:` + media type + `;` + encoding + `,` + payload.
///
/// Every segment stops at whitespace, quotes and angle brackets; the payload
/// additionally stops at `)` so CSS `url(data:...)` keeps its closing paren.
const DATA_URI_PATTERN: &str = r#"data:[^;\s"'<>]+;[^,\s"'<>]+,[^\s"'<>)]*"#;

fn data_uri_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DATA_URI_PATTERN).expect("data URI pattern is valid"))
}

/// Remove every embedded `data:` URI from `markup`
pub fn remove_data_uris(markup: &str) -> String {
    data_uri_regex().replace_all(markup, "").into_owned()
}

/// Cut `body` to at most `max_bytes` bytes
///
/// The tail is discarded without a marker. A cut that would land inside a
/// multi-byte character moves back to the previous character boundary.
pub fn truncate_body(mut body: String, max_bytes: usize) -> String {
    if body.len() > max_bytes {
        let mut end = max_bytes;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }
    body
}

/// Sanitize then bound captured markup
pub fn sanitize_markup(raw: &str, max_bytes: usize) -> String {
    truncate_body(remove_data_uris(raw), max_bytes)
}
