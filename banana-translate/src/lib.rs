//! Synthetic translation pipeline for the banana-translate demo
//!
//! The crate is split the way a request flows through it:
//!
//! 1. **Languages** - [`LanguageCode`] and the `auto` sentinel ([`SourceLanguage`])
//! 2. **Detection** - ordered script-range rules ([`DetectionRules`])
//! 3. **Synthesis** - phrase table lookup or labelled echo ([`TranslationEngine`])
//! 4. **Orchestration** - validation, auto-detect resolution, simulated
//!    confidence and failure injection ([`Orchestrator`])
//!
//! The "translation" is deliberately fake: a canned phrase plus a preview of
//! the input, or a per-language label followed by the untouched input.
//!
//! # Example
//!
//! ```
//! use banana_translate::{Orchestrator, SimulationConfig, TranslateRequestBody};
//!
//! let orchestrator = Orchestrator::builder()
//!     .simulation(SimulationConfig::reliable())
//!     .build()
//!     .unwrap();
//!
//! let result = orchestrator
//!     .handle(TranslateRequestBody::new("Hello world", "en", "vi"))
//!     .unwrap();
//! assert_eq!(
//!     result.translated_text,
//!     "Xin chào, đây là bản dịch tiếng Việt (Hello world...)"
//! );
//! assert_eq!(result.characters_translated, 11);
//! ```

pub mod data;
pub mod detection;
pub mod engine;
pub mod error;
pub mod language;
pub mod orchestrator;
pub mod phrases;
pub mod random;

// Re-export main types for convenient access
pub use data::{
    ErrorBody, MAX_TEXT_CHARS, TextField, TranslateRequestBody, TranslationRequest,
    TranslationResult, char_count,
};
pub use detection::{DEFAULT_LANGUAGE, DetectionRule, DetectionRules, detect_language};
pub use engine::TranslationEngine;
pub use error::{ConfigError, TranslateError, TranslateResult, ValidationError};
pub use language::{AUTO, LanguageCode, SourceLanguage, UnsupportedLanguage};
pub use orchestrator::{Orchestrator, OrchestratorBuilder, SimulationConfig};
pub use phrases::{FALLBACK_LABEL, LoadError, PhraseTable, TargetLabels};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
