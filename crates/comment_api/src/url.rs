/// Default base URL when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Path of the streaming comment endpoint.
pub const ADD_COMMENTS_PATH: &str = "/add-comments";

/// Normalize a base URL to the comment endpoint.
///
/// Normalization rules:
/// 1) blank input falls back to [`DEFAULT_BASE_URL`]
/// 2) keep a URL already ending in `/add-comments` unchanged
/// 3) append `/add-comments` otherwise
pub fn normalize_endpoint(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with(ADD_COMMENTS_PATH) {
        return trimmed.to_string();
    }
    format!("{trimmed}{ADD_COMMENTS_PATH}")
}
