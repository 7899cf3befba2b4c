//! Transport trait between the workflow controller and the service
//!
//! The controller never talks HTTP directly: it hands a
//! [`TranslateRequestBody`] to a [`TranslationTransport`] and gets back either
//! a [`TranslationResult`] or a [`TransportError`]. Implementations:
//!
//! - [`crate::HttpTransport`] - JSON over HTTP to `banana-translate-web`
//! - [`crate::LocalTransport`] - calls an in-process orchestrator
//! - [`crate::MockTransport`] - canned answers for tests

use crate::error::TransportResult;
use async_trait::async_trait;
use banana_translate::{TranslateRequestBody, TranslationResult};

/// Sends one translation request and awaits exactly one answer
#[async_trait]
pub trait TranslationTransport: Send + Sync {
    /// Translate a single request
    ///
    /// # Returns
    ///
    /// * `Ok(TranslationResult)` - The service translated the text
    /// * `Err(TransportError)` - Rejected input, service failure or network problem
    async fn translate(&self, request: &TranslateRequestBody) -> TransportResult<TranslationResult>;

    /// Name used in logs
    fn transport_name(&self) -> &str;
}
