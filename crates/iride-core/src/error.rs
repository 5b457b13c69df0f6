use thiserror::Error;

/// Errors raised while loading [`crate::AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Rejected user input. Raised before any network call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("URL is empty")]
    EmptyUrl,

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// The structured analysis response does not satisfy the report contract.
#[derive(Debug, Error)]
pub enum ReportFormatError {
    #[error("analysis response is empty")]
    Empty,

    #[error("analysis response is not valid JSON: {0}")]
    NotJson(#[source] serde_json::Error),

    #[error("analysis response does not match the report shape: {0}")]
    Shape(#[source] serde_json::Error),
}
