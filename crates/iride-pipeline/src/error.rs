use iride_core::{ReportFormatError, ValidationError};
use iride_gemini::GeminiError;
use thiserror::Error;

/// Message shown when an error carries nothing more useful.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Si è verificato un errore imprevisto durante l'analisi.";

/// Message shown when the structured report cannot be decoded.
pub const REPORT_FORMAT_MESSAGE: &str = "Errore nell'analisi strutturale dei dati.";

/// The two model calls of an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Research,
    Analysis,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Research => write!(f, "research"),
            Phase::Analysis => write!(f, "analysis"),
        }
    }
}

/// Errors that abort an analysis run. A failed run never yields a report.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// The model service call failed (network, auth, quota, bad envelope).
    #[error("upstream service error during {phase}: {source}")]
    UpstreamService {
        phase: Phase,
        #[source]
        source: GeminiError,
    },

    /// The service refused the prompt outright.
    #[error("upstream service blocked the {phase} prompt: {reason}")]
    Blocked { phase: Phase, reason: String },

    /// The structured response does not satisfy the report contract.
    #[error(transparent)]
    ReportFormat(#[from] ReportFormatError),
}

impl PipelineError {
    pub(crate) fn upstream(phase: Phase) -> impl FnOnce(GeminiError) -> Self {
        move |source| PipelineError::UpstreamService { phase, source }
    }

    /// User-facing Italian message for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Validation(ValidationError::EmptyUrl) => {
                "Inserisci un URL da analizzare.".to_string()
            }
            PipelineError::Validation(ValidationError::InvalidUrl { url, .. }) => {
                format!("L'indirizzo \"{url}\" non è un URL valido.")
            }
            PipelineError::ReportFormat(_) => REPORT_FORMAT_MESSAGE.to_string(),
            PipelineError::UpstreamService { source, .. } => match source {
                GeminiError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
                _ => GENERIC_FAILURE_MESSAGE.to_string(),
            },
            PipelineError::Blocked { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Stable machine-readable code, used by the HTTP API.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::Validation(_) => "validation_error",
            PipelineError::UpstreamService { .. } | PipelineError::Blocked { .. } => {
                "upstream_error"
            }
            PipelineError::ReportFormat(_) => "report_format_error",
        }
    }
}
