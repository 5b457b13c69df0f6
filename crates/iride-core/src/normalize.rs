//! Target URL normalization.

use crate::error::ValidationError;

/// Normalizes user input into an absolute target URL.
///
/// Surrounding whitespace is trimmed and `https://` is prefixed when the
/// input carries no `http://` or `https://` scheme. The original text is
/// otherwise preserved (no trailing slash is added), so `example.it`
/// becomes `https://example.it`.
///
/// # Errors
///
/// - [`ValidationError::EmptyUrl`] for blank input.
/// - [`ValidationError::InvalidUrl`] if the result is not an absolute URL
///   with a host.
pub fn normalize_url(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let candidate = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = url::Url::parse(&candidate).map_err(|e| ValidationError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::InvalidUrl {
            url: trimmed.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(candidate)
}

fn has_http_scheme(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
