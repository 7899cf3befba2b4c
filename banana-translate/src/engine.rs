//! Detection & synthesis engine
//!
//! The engine owns the three read-only tables (detection rules, phrases and
//! target labels) and exposes two pure operations over them. Randomness and
//! failure simulation live in the orchestrator, never here.

use crate::detection::DetectionRules;
use crate::language::LanguageCode;
use crate::phrases::{PhraseTable, TargetLabels};

/// Number of input characters echoed after a canned phrase
pub const PREVIEW_CHARS: usize = 20;

/// Detection plus synthetic translation over immutable tables
#[derive(Debug, Clone)]
pub struct TranslationEngine {
    rules: DetectionRules,
    phrases: PhraseTable,
    labels: TargetLabels,
}

impl TranslationEngine {
    pub fn new(rules: DetectionRules, phrases: PhraseTable, labels: TargetLabels) -> Self {
        Self {
            rules,
            phrases,
            labels,
        }
    }

    /// Replace the phrase table, keeping rules and labels
    pub fn with_phrases(mut self, phrases: PhraseTable) -> Self {
        self.phrases = phrases;
        self
    }

    pub fn phrases(&self) -> &PhraseTable {
        &self.phrases
    }

    /// Best-guess language of `text`; see [`DetectionRules::detect`]
    pub fn detect_language(&self, text: &str) -> LanguageCode {
        self.rules.detect(text)
    }

    /// Produce the synthetic translation of `text`
    ///
    /// A phrase table hit yields `"<phrase> (<first 20 chars>...)"`. A miss
    /// yields `"<target label> <text>"`.
    ///
    /// # Example
    ///
    /// ```
    /// use banana_translate::{LanguageCode, TranslationEngine};
    ///
    /// let engine = TranslationEngine::default();
    /// assert_eq!(
    ///     engine.synthesize("Hello world", LanguageCode::En, LanguageCode::Fr),
    ///     "Bonjour, ceci est une traduction française (Hello world...)"
    /// );
    /// assert_eq!(
    ///     engine.synthesize("Hallo", LanguageCode::De, LanguageCode::Ko),
    ///     "한국어 번역: Hallo"
    /// );
    /// ```
    pub fn synthesize(&self, text: &str, source: LanguageCode, target: LanguageCode) -> String {
        match self.phrases.get(source, target) {
            Some(phrase) => format!("{} ({}...)", phrase, preview(text)),
            None => format!("{} {}", self.labels.label_for(target), text),
        }
    }
}

impl Default for TranslationEngine {
    fn default() -> Self {
        Self::new(
            DetectionRules::default(),
            PhraseTable::builtin(),
            TargetLabels::builtin(),
        )
    }
}

/// First [`PREVIEW_CHARS`] characters of `text`, cut on a char boundary
fn preview(text: &str) -> &str {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
