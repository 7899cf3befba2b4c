//! HTTP transport for the banana-translate web service
//!
//! Sends `{ text, sourceLang, targetLang }` as JSON to `POST /api/translate`
//! and reads back `{ translatedText, detectedSourceLang?, confidence,
//! charactersTranslated }`. Error bodies have the shape `{ error }`.
//!
//! # Configuration
//!
//! The base URL comes from the `BANANA_TRANSLATE_URL` environment variable
//! (see [`HttpTransport::from_env`]) or is passed explicitly.
//!
//! # Example
//!
//! ```ignore
//! use banana_translate::TranslateRequestBody;
//! use banana_translate_client::{HttpTransport, TranslationTransport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::new("http://127.0.0.1:3000")?;
//!     let result = transport
//!         .translate(&TranslateRequestBody::new("Hello", "auto", "vi"))
//!         .await?;
//!     println!("{}", result.translated_text);
//!     Ok(())
//! }
//! ```

use crate::error::{TransportError, TransportResult};
use crate::transport::TranslationTransport;
use async_trait::async_trait;
use banana_translate::{ErrorBody, TranslateRequestBody, TranslationResult};
use std::time::Duration;
use tracing::debug;

/// Environment variable holding the service base URL
pub const URL_ENV_VAR: &str = "BANANA_TRANSLATE_URL";

/// Path of the translate endpoint, relative to the base URL
pub const TRANSLATE_PATH: &str = "/api/translate";

/// Message used when an error response carries no `{ error }` body
const FALLBACK_ERROR: &str = "Translation failed";

/// JSON-over-HTTP transport
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Request timeout used by [`HttpTransport::new`]
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a transport for the service at `base_url`
    ///
    /// # Arguments
    ///
    /// * `base_url` - e.g. `http://127.0.0.1:3000`; a trailing slash is ignored
    pub fn new(base_url: impl Into<String>) -> TransportResult<Self> {
        Self::with_timeout(base_url, Self::DEFAULT_TIMEOUT)
    }

    /// Create a transport with an explicit request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> TransportResult<Self> {
        let base_url = base_url.into();
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(TransportError::Config("base URL cannot be empty".to_string()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(TransportError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }
        if timeout.is_zero() {
            return Err(TransportError::Config("timeout must be positive".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url, TRANSLATE_PATH),
            timeout,
        })
    }

    /// Create a transport from the [`URL_ENV_VAR`] environment variable
    pub fn from_env() -> TransportResult<Self> {
        let base_url = std::env::var(URL_ENV_VAR).map_err(|_| {
            TransportError::Config(format!("{} environment variable not set", URL_ENV_VAR))
        })?;
        Self::new(base_url)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_request_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// Map a non-2xx status and its raw body to a [`TransportError`]
fn error_from_response(status: u16, body: &str) -> TransportError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|body| body.error)
        .unwrap_or_else(|_| FALLBACK_ERROR.to_string());

    match status {
        400 => TransportError::Validation(message),
        503 => TransportError::ServiceUnavailable(message),
        status => TransportError::Server { status, message },
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl TranslationTransport for HttpTransport {
    async fn translate(&self, request: &TranslateRequestBody) -> TransportResult<TranslationResult> {
        debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_request_error(e))?;

        debug!("Response status {} ({} bytes)", status, body.len());

        if !status.is_success() {
            return Err(error_from_response(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }

    fn transport_name(&self) -> &str {
        "HTTP"
    }
}
