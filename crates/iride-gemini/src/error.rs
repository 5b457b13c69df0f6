use thiserror::Error;

/// Errors returned by the Gemini API client.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Gemini API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl GeminiError {
    /// `true` for 429 responses (quota or rate limit exhausted).
    #[must_use]
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, GeminiError::Api { status: 429, .. })
    }

    /// `true` for 401/403 responses (missing or rejected API key).
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, GeminiError::Api { status: 401 | 403, .. })
    }
}
