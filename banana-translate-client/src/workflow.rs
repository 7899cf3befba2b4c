//! Client workflow controller
//!
//! Owns the state behind a translation card: the two text panes, the language
//! pair, the in-flight flag and the last result. Every mutation goes through
//! `&mut self`, so at most one request is in flight per controller.
//!
//! ```text
//! Idle --submit--> Translating --ok--> Idle
//!                              \--err--> Error --submit--> Translating
//! ```
//!
//! A submission that fails a guard changes nothing and raises a destructive
//! toast. A submission made while a request is in flight is rejected with
//! [`WorkflowError::Busy`] and never reaches the transport.

use crate::error::{TransportResult, WorkflowError};
use crate::notify::{Clipboard, NoClipboard, Notifier, SilentSpeech, Speech, Toast};
use crate::transport::TranslationTransport;
use banana_translate::{
    LanguageCode, MAX_TEXT_CHARS, SourceLanguage, TranslateRequestBody, TranslationResult,
    char_count,
};
use std::sync::Arc;
use tracing::debug;

/// Everything the user sees on the translation card
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowState {
    pub source_text: String,
    pub translated_text: String,
    pub source_lang: SourceLanguage,
    pub target_lang: LanguageCode,
    pub is_translating: bool,
    pub last_result: Option<TranslationResult>,
    /// Message of the most recent failed submission, cleared by the next success
    pub last_error: Option<String>,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self {
            source_text: String::new(),
            translated_text: String::new(),
            source_lang: SourceLanguage::Auto,
            target_lang: LanguageCode::Vi,
            is_translating: false,
            last_result: None,
            last_error: None,
        }
    }
}

/// Clears `is_translating` if a submission is dropped before it settles
struct InFlight<'a> {
    flag: &'a mut bool,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            debug!("Submission abandoned before the transport answered");
            *self.flag = false;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    Idle,
    Translating,
    /// Idle, but the last submission failed
    Error,
}

/// Drives one translation card against a [`TranslationTransport`]
pub struct WorkflowController {
    state: WorkflowState,
    transport: Arc<dyn TranslationTransport>,
    notifier: Arc<dyn Notifier>,
    clipboard: Arc<dyn Clipboard>,
    speech: Arc<dyn Speech>,
}

impl WorkflowController {
    /// Create a controller with default state, no clipboard and no speech
    pub fn new(transport: Arc<dyn TranslationTransport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: WorkflowState::default(),
            transport,
            notifier,
            clipboard: Arc::new(NoClipboard),
            speech: Arc::new(SilentSpeech),
        }
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn with_speech(mut self, speech: Arc<dyn Speech>) -> Self {
        self.speech = speech;
        self
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn phase(&self) -> WorkflowPhase {
        if self.state.is_translating {
            WorkflowPhase::Translating
        } else if self.state.last_error.is_some() {
            WorkflowPhase::Error
        } else {
            WorkflowPhase::Idle
        }
    }

    pub fn set_source_text(&mut self, text: impl Into<String>) {
        self.state.source_text = text.into();
    }

    pub fn set_source_lang(&mut self, language: SourceLanguage) {
        self.state.source_lang = language;
    }

    pub fn set_target_lang(&mut self, language: LanguageCode) {
        self.state.target_lang = language;
    }

    /// Characters in the source pane, for the `n / 5000` counter
    pub fn character_count(&self) -> usize {
        char_count(&self.state.source_text)
    }

    /// Evaluate the submit guards without side effects
    pub fn check_submit(&self) -> Result<(), WorkflowError> {
        let state = &self.state;
        if state.is_translating {
            return Err(WorkflowError::Busy);
        }
        if state.source_text.trim().is_empty() {
            return Err(WorkflowError::EmptyText);
        }
        if char_count(&state.source_text) > MAX_TEXT_CHARS {
            return Err(WorkflowError::TextTooLong {
                max: MAX_TEXT_CHARS,
            });
        }
        if state.source_lang.conflicts_with(state.target_lang) {
            return Err(WorkflowError::SameLanguage);
        }
        Ok(())
    }

    /// Whether the translate action should be enabled
    pub fn can_submit(&self) -> bool {
        self.check_submit().is_ok()
    }

    /// Whether the swap action should be enabled
    pub fn can_swap(&self) -> bool {
        !self.state.is_translating && !self.state.source_lang.is_auto()
    }

    /// First half of [`WorkflowController::submit`]
    ///
    /// Runs the guards and, when they pass, marks the controller as
    /// translating and returns the request to dispatch.
    pub fn begin_submit(&mut self) -> Result<TranslateRequestBody, WorkflowError> {
        if let Err(err) = self.check_submit() {
            if err != WorkflowError::Busy {
                self.notifier.notify(Toast::error("Error", err.to_string()));
            }
            return Err(err);
        }

        self.state.is_translating = true;
        debug!(
            "Dispatching {} characters {} -> {}",
            self.character_count(),
            self.state.source_lang,
            self.state.target_lang
        );

        Ok(TranslateRequestBody::new(
            self.state.source_text.clone(),
            self.state.source_lang.as_str(),
            self.state.target_lang.as_str(),
        ))
    }

    /// Second half of [`WorkflowController::submit`]: settle the outstanding request
    ///
    /// On failure the previous `translated_text` and `last_result` stay in place.
    pub fn finish_submit(
        &mut self,
        outcome: TransportResult<TranslationResult>,
    ) -> Result<&TranslationResult, WorkflowError> {
        if !self.state.is_translating {
            return Err(WorkflowError::NotTranslating);
        }
        self.state.is_translating = false;

        match outcome {
            Ok(result) => {
                debug!("Translation settled: {} characters", result.characters_translated);
                self.state.translated_text = result.translated_text.clone();
                self.state.last_error = None;
                self.notifier.notify(Toast::info(
                    "Translation Complete",
                    format!(
                        "Successfully translated {} characters",
                        result.characters_translated
                    ),
                ));
                Ok(self.state.last_result.insert(result))
            }
            Err(err) => {
                debug!("Translation failed: {}", err);
                let message = err.to_string();
                self.notifier
                    .notify(Toast::error("Translation Failed", message.clone()));
                self.state.last_error = Some(message);
                Err(err.into())
            }
        }
    }

    /// Validate, dispatch exactly one request and settle it
    ///
    /// Dropping the returned future before it completes abandons the request
    /// and leaves the controller idle again.
    pub async fn submit(&mut self) -> Result<&TranslationResult, WorkflowError> {
        let request = self.begin_submit()?;
        let in_flight = InFlight {
            flag: &mut self.state.is_translating,
            settled: false,
        };
        let outcome = self.transport.translate(&request).await;
        in_flight.settle();
        self.finish_submit(outcome)
    }

    /// Exchange the languages and the two text panes
    ///
    /// Rejected while `auto` is the source language, since there is no
    /// concrete language to move to the target side.
    pub fn swap_languages(&mut self) -> Result<(), WorkflowError> {
        if self.state.is_translating {
            return Err(WorkflowError::Busy);
        }
        let Some(source) = self.state.source_lang.code() else {
            let err = WorkflowError::SwapWithAutoDetect;
            self.notifier.notify(Toast::error("Cannot swap", err.to_string()));
            return Err(err);
        };

        let state = &mut self.state;
        state.source_lang = SourceLanguage::Code(state.target_lang);
        state.target_lang = source;
        std::mem::swap(&mut state.source_text, &mut state.translated_text);
        state.last_result = None;
        Ok(())
    }

    /// Empty both panes and forget the last result; languages are kept
    pub fn clear(&mut self) {
        self.state.source_text.clear();
        self.state.translated_text.clear();
        self.state.last_result = None;
        self.state.last_error = None;
    }

    /// Copy the translation to the clipboard
    ///
    /// Returns `Ok(false)` without touching the clipboard when there is
    /// nothing to copy.
    pub fn copy_translation(&self) -> Result<bool, WorkflowError> {
        if self.state.translated_text.is_empty() {
            return Ok(false);
        }

        match self.clipboard.write_text(&self.state.translated_text) {
            Ok(()) => {
                self.notifier
                    .notify(Toast::info("Copied!", "Translation copied to clipboard"));
                Ok(true)
            }
            Err(err) => {
                let err = WorkflowError::Clipboard(err);
                self.notifier.notify(Toast::error("Copy Failed", err.to_string()));
                Err(err)
            }
        }
    }

    /// Read the source pane aloud; `auto` is spoken as English
    pub fn speak_source(&self) -> bool {
        let language = self.state.source_lang.code().unwrap_or(LanguageCode::En);
        self.speak(&self.state.source_text, language)
    }

    /// Read the translation pane aloud in the target language
    pub fn speak_translation(&self) -> bool {
        self.speak(&self.state.translated_text, self.state.target_lang)
    }

    fn speak(&self, text: &str, language: LanguageCode) -> bool {
        if text.is_empty() {
            return false;
        }
        self.speech.speak(text, language);
        true
    }
}

impl std::fmt::Debug for WorkflowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowController")
            .field("state", &self.state)
            .field("transport", &self.transport.transport_name())
            .finish()
    }
}
