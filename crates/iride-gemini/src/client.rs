//! HTTP client for the Gemini `generateContent` REST API.
//!
//! Wraps `reqwest` with API key handling, Google error-envelope parsing and
//! typed response deserialization. The client is constructed explicitly and
//! passed by reference to whoever needs it; there is no global instance.

use std::time::{Duration, Instant};

use reqwest::{Client, Url};

use crate::error::GeminiError;
use crate::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini REST API.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a new client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeminiError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends below the base path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeminiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Calls `models/{model}:generateContent` with `request`.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::Http`] on network failure or timeout.
    /// - [`GeminiError::Api`] on a non-2xx status, carrying the message from
    ///   the Google error envelope when one is present.
    /// - [`GeminiError::Deserialize`] if the body does not match the
    ///   expected response shape.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = self.endpoint(model)?;
        let started = Instant::now();

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(
            model,
            status = status.as_u16(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            bytes = body.len(),
            "gemini generateContent returned"
        );

        if !status.is_success() {
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: Self::error_message(&body, status),
            });
        }

        serde_json::from_str(&body).map_err(|e| GeminiError::Deserialize {
            context: format!("generateContent(model={model})"),
            source: e,
        })
    }

    /// Builds `{base}/v1beta/models/{model}:generateContent`.
    fn endpoint(&self, model: &str) -> Result<Url, GeminiError> {
        self.base_url
            .join(&format!("v1beta/models/{model}:generateContent"))
            .map_err(|e| GeminiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Extracts a human-readable message from an error body.
    ///
    /// Falls back to the raw body, then to the status reason phrase.
    fn error_message(body: &str, status: reqwest::StatusCode) -> String {
        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
            if !envelope.error.message.is_empty() {
                return match envelope.error.status {
                    Some(code) => format!("{} ({code})", envelope.error.message),
                    None => envelope.error.message,
                };
            }
        }
        let trimmed = body.trim();
        if trimmed.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            trimmed.to_string()
        }
    }
}
