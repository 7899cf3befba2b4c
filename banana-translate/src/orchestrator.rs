//! Request orchestrator
//!
//! Validates a request, resolves `auto` through the engine, synthesizes the
//! translation and decorates it with the simulated confidence score. It also
//! injects occasional service-unavailable failures. Calls share nothing mutable;
//! one `Orchestrator` can serve any number of concurrent requests.
//!
//! # Example
//!
//! ```
//! use banana_translate::{Orchestrator, SimulationConfig, TranslateRequestBody, LanguageCode};
//!
//! let orchestrator = Orchestrator::builder()
//!     .simulation(SimulationConfig::reliable())
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! let result = orchestrator
//!     .handle(TranslateRequestBody::new("Привет", "auto", "en"))
//!     .unwrap();
//! assert_eq!(result.detected_source_lang, Some(LanguageCode::Ru));
//! assert_eq!(result.translated_text, "English translation: Привет");
//! ```

use crate::data::{TranslateRequestBody, TranslationRequest, TranslationResult, char_count};
use crate::engine::TranslationEngine;
use crate::error::{ConfigError, TranslateError, TranslateResult};
use crate::random::{RandomSource, SeededRandom, ThreadRandom};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Probabilities and ranges driving the simulated behaviour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Chance in `[0, 1]` that a call fails with
    /// [`TranslateError::ServiceUnavailable`]
    pub failure_rate: f64,
    pub confidence_min: f64,
    /// Exclusive upper bound
    pub confidence_max: f64,
}

impl SimulationConfig {
    pub const DEFAULT_FAILURE_RATE: f64 = 0.05;
    pub const DEFAULT_CONFIDENCE_MIN: f64 = 0.95;
    pub const DEFAULT_CONFIDENCE_MAX: f64 = 1.0;

    /// Default confidence range, never failing
    pub fn reliable() -> Self {
        Self {
            failure_rate: 0.0,
            ..Self::default()
        }
    }

    /// Default confidence range, always failing
    pub fn always_failing() -> Self {
        Self {
            failure_rate: 1.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(ConfigError::FailureRate(self.failure_rate));
        }
        let (min, max) = (self.confidence_min, self.confidence_max);
        if !(min < max && min >= 0.0 && max <= 1.0) {
            return Err(ConfigError::ConfidenceRange { min, max });
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            failure_rate: Self::DEFAULT_FAILURE_RATE,
            confidence_min: Self::DEFAULT_CONFIDENCE_MIN,
            confidence_max: Self::DEFAULT_CONFIDENCE_MAX,
        }
    }
}

/// Stateless translation request handler
pub struct Orchestrator {
    engine: TranslationEngine,
    simulation: SimulationConfig,
    random: Arc<dyn RandomSource>,
}

impl Orchestrator {
    /// Build an orchestrator from validated parts
    pub fn new(
        engine: TranslationEngine,
        simulation: SimulationConfig,
        random: Arc<dyn RandomSource>,
    ) -> Result<Self, ConfigError> {
        simulation.validate()?;
        Ok(Self {
            engine,
            simulation,
            random,
        })
    }

    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::default()
    }

    pub fn engine(&self) -> &TranslationEngine {
        &self.engine
    }

    pub fn simulation(&self) -> &SimulationConfig {
        &self.simulation
    }

    /// Validate and translate a wire request
    pub fn handle(&self, body: TranslateRequestBody) -> TranslateResult<TranslationResult> {
        let request = TranslationRequest::from_body(body)?;
        self.translate(&request)
    }

    /// Translate an already validated request
    pub fn translate(&self, request: &TranslationRequest) -> TranslateResult<TranslationResult> {
        let text = request.text();
        let source = match request.source().code() {
            Some(code) => code,
            None => {
                let detected = self.engine.detect_language(text);
                debug!("Auto-detected source language: {}", detected);
                detected
            }
        };

        let translated_text = self.engine.synthesize(text, source, request.target());

        if self.random.next_unit() < self.simulation.failure_rate {
            warn!(
                "Injected failure for {} → {} ({} chars)",
                source,
                request.target(),
                char_count(text)
            );
            return Err(TranslateError::ServiceUnavailable);
        }

        let result = TranslationResult {
            translated_text,
            detected_source_lang: request.source().is_auto().then_some(source),
            confidence: self.confidence(),
            characters_translated: char_count(text),
        };

        debug!(
            "Translated {} chars {} → {} (confidence {:.3})",
            result.characters_translated,
            source,
            request.target(),
            result.confidence
        );

        Ok(result)
    }

    /// Uniform draw from `[confidence_min, confidence_max)`
    fn confidence(&self) -> f64 {
        let SimulationConfig {
            confidence_min: min,
            confidence_max: max,
            ..
        } = self.simulation;
        let value = min + self.random.next_unit() * (max - min);
        // Rounding can land exactly on the exclusive bound
        if value < max { value } else { min }
    }
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("engine", &self.engine)
            .field("simulation", &self.simulation)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Orchestrator`]
#[derive(Default)]
pub struct OrchestratorBuilder {
    engine: Option<TranslationEngine>,
    simulation: SimulationConfig,
    random: Option<Arc<dyn RandomSource>>,
}

impl OrchestratorBuilder {
    pub fn engine(mut self, engine: TranslationEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }

    pub fn failure_rate(mut self, failure_rate: f64) -> Self {
        self.simulation.failure_rate = failure_rate;
        self
    }

    pub fn random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = Some(random);
        self
    }

    /// Use a reproducible [`SeededRandom`]
    pub fn seed(self, seed: u64) -> Self {
        self.random(Arc::new(SeededRandom::new(seed)))
    }

    pub fn build(self) -> Result<Orchestrator, ConfigError> {
        Orchestrator::new(
            self.engine.unwrap_or_default(),
            self.simulation,
            self.random.unwrap_or_else(|| Arc::new(ThreadRandom)),
        )
    }
}
