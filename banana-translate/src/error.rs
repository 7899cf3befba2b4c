//! Error types for the translation pipeline

use thiserror::Error;

/// Why a request was rejected before any translation happened
///
/// The `Display` output is the message returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Text too long. Maximum {max} characters.")]
    TextTooLong { max: usize },
    #[error("Source and target languages cannot be the same")]
    SameLanguage,
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("Target language cannot be auto-detect")]
    AutoTarget,
}

/// Errors produced by the request orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// Client input problem, never retried
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Injected transient outage
    #[error("Translation service temporarily unavailable")]
    ServiceUnavailable,

    /// Unexpected failure; the cause is kept for logs and never displayed
    #[error("Internal server error")]
    Internal(String),
}

impl TranslateError {
    /// HTTP status code this error maps to
    pub fn status_code(&self) -> u16 {
        match self {
            TranslateError::Validation(_) => 400,
            TranslateError::ServiceUnavailable => 503,
            TranslateError::Internal(_) => 500,
        }
    }

    /// Underlying cause of an internal error, for logging only
    pub fn cause(&self) -> Option<&str> {
        match self {
            TranslateError::Internal(cause) => Some(cause),
            _ => None,
        }
    }
}

/// Result type for pipeline operations
pub type TranslateResult<T> = Result<T, TranslateError>;

/// Invalid simulation parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("failure rate must be within [0, 1], got {0}")]
    FailureRate(f64),
    #[error("confidence range [{min}, {max}) is empty or outside [0, 1]")]
    ConfidenceRange { min: f64, max: f64 },
}
