use banana_translate::TranslateError;
use std::time::Duration;
use thiserror::Error;

/// Errors from sending a request to the translation service
///
/// `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// 400: the service rejected the input
    #[error("{0}")]
    Validation(String),
    /// 503: transient outage, resubmit manually
    #[error("{0}")]
    ServiceUnavailable(String),
    /// Any other non-2xx status
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Invalid transport configuration: {0}")]
    Config(String),
}

impl TransportError {
    /// HTTP status carried by the error, if the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Validation(_) => Some(400),
            TransportError::ServiceUnavailable(_) => Some(503),
            TransportError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TranslateError> for TransportError {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::Validation(reason) => TransportError::Validation(reason.to_string()),
            TranslateError::ServiceUnavailable => {
                TransportError::ServiceUnavailable(err.to_string())
            }
            TranslateError::Internal(_) => TransportError::Server {
                status: err.status_code(),
                message: err.to_string(),
            },
        }
    }
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

/// Clipboard write failure reported by a [`crate::Clipboard`] port
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ClipboardError(pub String);

/// Errors raised by the workflow controller
///
/// Guard failures leave the workflow state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Please enter some text to translate")]
    EmptyText,
    #[error("Text too long. Maximum {max} characters.")]
    TextTooLong { max: usize },
    #[error("Source and target languages cannot be the same")]
    SameLanguage,
    #[error("A translation is already in progress")]
    Busy,
    #[error("No translation is in progress")]
    NotTranslating,
    #[error("Cannot swap when auto-detect is selected")]
    SwapWithAutoDetect,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Could not copy to clipboard")]
    Clipboard(#[source] ClipboardError),
}
