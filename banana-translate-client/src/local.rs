//! In-process transport
//!
//! Runs requests through an [`Orchestrator`] in the same process, without a
//! server. Errors come back exactly as the web service would report them.

use crate::error::TransportResult;
use crate::transport::TranslationTransport;
use async_trait::async_trait;
use banana_translate::{Orchestrator, TranslateRequestBody, TranslationResult};
use std::sync::Arc;
use std::time::Duration;

/// Transport backed by a local [`Orchestrator`]
#[derive(Debug, Clone)]
pub struct LocalTransport {
    orchestrator: Arc<Orchestrator>,
    /// Optional simulated latency
    delay: Duration,
}

impl LocalTransport {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            orchestrator,
            delay: Duration::ZERO,
        }
    }

    /// Sleep for `delay` before every request, to mimic a network round trip
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }
}

#[async_trait]
impl TranslationTransport for LocalTransport {
    async fn translate(&self, request: &TranslateRequestBody) -> TransportResult<TranslationResult> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.orchestrator
            .handle(request.clone())
            .map_err(Into::into)
    }

    fn transport_name(&self) -> &str {
        "Local"
    }
}
