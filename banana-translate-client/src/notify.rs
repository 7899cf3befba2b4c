//! Presentation ports used by the workflow controller
//!
//! Toasts, clipboard and speech are side effects the controller triggers on
//! state transitions. They never feed back into the workflow state, except
//! that a clipboard failure changes which toast is shown.

use crate::error::ClipboardError;
use banana_translate::LanguageCode;
use std::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// A short user-facing notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

/// Shows toasts to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Puts text on the system clipboard
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Reads text aloud
pub trait Speech: Send + Sync {
    fn speak(&self, text: &str, language: LanguageCode);
}

/// Prints toasts to the terminal, errors on stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Default => println!("✅ {}: {}", toast.title, toast.description),
            ToastVariant::Destructive => eprintln!("❌ {}: {}", toast.title, toast.description),
        }
    }
}

/// Sends toasts to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Default => info!(title = %toast.title, "{}", toast.description),
            ToastVariant::Destructive => warn!(title = %toast.title, "{}", toast.description),
        }
    }
}

/// Clipboard for environments without one; every write fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError("no clipboard available".to_string()))
    }
}

/// Speech port that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSpeech;

impl Speech for SilentSpeech {
    fn speak(&self, _text: &str, _language: LanguageCode) {}
}

/// Records every side effect, for tests and headless callers
#[derive(Debug, Default)]
pub struct Recorder {
    toasts: Mutex<Vec<Toast>>,
    clipboard: Mutex<Vec<String>>,
    spoken: Mutex<Vec<(String, LanguageCode)>>,
    clipboard_fails: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose clipboard rejects every write
    pub fn with_failing_clipboard() -> Self {
        Self {
            clipboard_fails: true,
            ..Self::default()
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        lock(&self.toasts).clone()
    }

    pub fn last_toast(&self) -> Option<Toast> {
        lock(&self.toasts).last().cloned()
    }

    pub fn clipboard(&self) -> Vec<String> {
        lock(&self.clipboard).clone()
    }

    pub fn spoken(&self) -> Vec<(String, LanguageCode)> {
        lock(&self.spoken).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Notifier for Recorder {
    fn notify(&self, toast: Toast) {
        lock(&self.toasts).push(toast);
    }
}

impl Clipboard for Recorder {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.clipboard_fails {
            return Err(ClipboardError("clipboard write denied".to_string()));
        }
        lock(&self.clipboard).push(text.to_string());
        Ok(())
    }
}

impl Speech for Recorder {
    fn speak(&self, text: &str, language: LanguageCode) {
        lock(&self.spoken).push((text.to_string(), language));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_constructors() {
        let info = Toast::info("Copied!", "Translation copied to clipboard");
        assert_eq!(info.variant, ToastVariant::Default);
        assert!(!info.is_destructive());

        let error = Toast::error("Error", "Please enter some text to translate");
        assert!(error.is_destructive());
    }

    #[test]
    fn test_recorder_collects_side_effects() {
        let recorder = Recorder::new();
        recorder.notify(Toast::info("a", "b"));
        recorder.write_text("Hola").unwrap();
        recorder.speak("Hola", LanguageCode::Es);

        assert_eq!(recorder.toasts().len(), 1);
        assert_eq!(recorder.last_toast().unwrap().title, "a");
        assert_eq!(recorder.clipboard(), vec!["Hola".to_string()]);
        assert_eq!(recorder.spoken(), vec![("Hola".to_string(), LanguageCode::Es)]);
    }

    #[test]
    fn test_failing_clipboards() {
        assert!(Recorder::with_failing_clipboard().write_text("x").is_err());
        assert!(NoClipboard.write_text("x").is_err());
    }
}
