//! Mock transport for testing
//!
//! Deterministic, server-free answers for exercising the workflow controller.
//!
//! # Example
//!
//! ```ignore
//! use banana_translate::TranslateRequestBody;
//! use banana_translate_client::{MockMode, MockTransport, TranslationTransport};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTransport::new(MockMode::Echo);
//!     let result = mock
//!         .translate(&TranslateRequestBody::new("hello", "en", "fr"))
//!         .await
//!         .unwrap();
//!     assert_eq!(result.translated_text, "hello_fr");
//! }
//! ```

use crate::error::{TransportError, TransportResult};
use crate::transport::TranslationTransport;
use async_trait::async_trait;
use banana_translate::{TextField, TranslateRequestBody, TranslationResult, char_count};
use std::sync::Mutex;
use std::time::Duration;

/// What the mock answers with
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Always return this result
    Succeed(TranslationResult),

    /// Always fail with this error
    Fail(TransportError),

    /// Append the target code: "hello" → "hello_fr", confidence 1.0
    Echo,
}

/// Mock transport that records every request it receives
#[derive(Debug)]
pub struct MockTransport {
    mode: MockMode,
    delay: Duration,
    requests: Mutex<Vec<TranslateRequestBody>>,
}

impl MockTransport {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that sleeps `delay` before answering
    pub fn with_delay(mode: MockMode, delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new(mode)
        }
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.recorded().len()
    }

    /// Copies of every request received so far, oldest first
    pub fn requests(&self) -> Vec<TranslateRequestBody> {
        self.recorded().clone()
    }

    fn recorded(&self) -> std::sync::MutexGuard<'_, Vec<TranslateRequestBody>> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn answer(&self, request: &TranslateRequestBody) -> TransportResult<TranslationResult> {
        match &self.mode {
            MockMode::Succeed(result) => Ok(result.clone()),
            MockMode::Fail(err) => Err(err.clone()),
            MockMode::Echo => {
                let text = request
                    .text
                    .clone()
                    .map(TextField::into_text)
                    .unwrap_or_default();
                let target = request.target_lang.as_deref().unwrap_or_default();
                Ok(TranslationResult {
                    translated_text: format!("{}_{}", text, target),
                    detected_source_lang: None,
                    confidence: 1.0,
                    characters_translated: char_count(&text),
                })
            }
        }
    }
}

#[async_trait]
impl TranslationTransport for MockTransport {
    async fn translate(&self, request: &TranslateRequestBody) -> TransportResult<TranslationResult> {
        self.recorded().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.answer(request)
    }

    fn transport_name(&self) -> &str {
        "Mock"
    }
}
