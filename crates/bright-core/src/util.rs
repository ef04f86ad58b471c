//! Text helpers for user input and server responses.

/// Longest server text carried into an error message.
pub const MAX_ERROR_TEXT_CHARS: usize = 180;

/// Trimmed `value`, or `None` when nothing but whitespace is left.
pub fn non_blank(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Owned counterpart of [`non_blank`] for optional flags and config fields.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    value.as_deref().and_then(non_blank).map(str::to_string)
}

/// `http://` or `https://` (any case) followed by a host.
pub fn is_http_url(value: &str) -> bool {
    let Some((scheme, rest)) = value.split_once("://") else {
        return false;
    };
    let has_host = rest.split('/').next().is_some_and(|host| !host.is_empty());
    has_host && (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"))
}

/// Collapse whitespace and cap a response body for use in an error message.
pub fn compact_text(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_ERROR_TEXT_CHARS)
        .collect()
}
