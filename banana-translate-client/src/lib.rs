//! Client side of banana-translate
//!
//! A [`WorkflowController`] holds the state of one translation card and talks
//! to the service through a [`TranslationTransport`]:
//!
//! - [`HttpTransport`] - JSON over HTTP to `banana-translate-web`
//! - [`LocalTransport`] - an in-process [`banana_translate::Orchestrator`]
//! - [`MockTransport`] - canned answers for tests
//!
//! Toasts, clipboard and speech are injected as ports ([`Notifier`],
//! [`Clipboard`], [`Speech`]).
//!
//! # Workflow Example
//!
//! ```ignore
//! use banana_translate::LanguageCode;
//! use banana_translate_client::{HttpTransport, TerminalNotifier, WorkflowController};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = Arc::new(HttpTransport::from_env()?);
//!     let mut controller = WorkflowController::new(transport, Arc::new(TerminalNotifier));
//!
//!     controller.set_source_text("Hello world");
//!     controller.set_target_lang(LanguageCode::Fr);
//!     let result = controller.submit().await?;
//!
//!     println!("{}", result.translated_text);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;
pub mod local;
pub mod mock;
pub mod notify;
pub mod transport;
pub mod workflow;

// Re-export main types for convenient access
pub use error::{ClipboardError, TransportError, TransportResult, WorkflowError};
pub use http::{HttpTransport, TRANSLATE_PATH, URL_ENV_VAR};
pub use local::LocalTransport;
pub use mock::{MockMode, MockTransport};
pub use notify::{
    Clipboard, NoClipboard, Notifier, Recorder, SilentSpeech, Speech, TerminalNotifier, Toast,
    ToastVariant, TracingNotifier,
};
pub use transport::TranslationTransport;
pub use workflow::{WorkflowController, WorkflowPhase, WorkflowState};
