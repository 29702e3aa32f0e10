/// Default base URL for the agent service API.
pub const DEFAULT_AGENT_BASE_URL: &str = "http://localhost:8000/api";

/// Normalize a configured base URL.
///
/// Normalization rules:
/// 1) empty/whitespace input falls back to [`DEFAULT_AGENT_BASE_URL`]
/// 2) surrounding whitespace is trimmed
/// 3) trailing slashes are stripped
#[must_use]
pub fn normalize_base_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_AGENT_BASE_URL
    } else {
        input.trim()
    };

    base.trim_end_matches('/').to_string()
}

/// Join a normalized base URL with an endpoint path using exactly one slash.
#[must_use]
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    let base = normalize_base_url(base_url);
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}
