//! The live-session collaborator contract.
//!
//! Everything that drives the browser (navigation, page lifecycle,
//! authentication) lives behind this trait. The cache only needs four
//! capabilities: read the document, replace it wholesale, evaluate a script
//! in the live context, and register a script that runs before any future
//! document's own scripts execute.

#[cfg(feature = "browser")]
pub mod browser;

#[cfg(test)]
pub(crate) mod fake;

use coldstart_core::Error;
use serde_json::Value;
use thiserror::Error as ThisError;

/// Errors from live-session round-trips.
#[derive(Debug, ThisError)]
pub enum SessionError {
    /// Failed to launch or connect to a browser.
    #[error("browser launch failed: {0}")]
    Launch(String),

    /// Failed to read the current document content.
    #[error("content retrieval failed: {0}")]
    ContentRetrieval(String),

    /// Failed to replace the document content.
    #[error("content injection failed: {0}")]
    ContentInjection(String),

    /// Script evaluation in the live context failed.
    #[error("evaluation failed: {0}")]
    Evaluation(String),

    /// Evaluation did not complete within the configured timeout.
    #[error("evaluation timeout after {0}ms")]
    Timeout(u64),

    /// The session cannot run scripts before document evaluation.
    #[error("pre-load hook installation unsupported: {0}")]
    PreloadUnsupported(String),
}

impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::PreloadUnsupported(msg) => Error::CapabilityMismatch(msg),
            other => Error::Session(other.to_string()),
        }
    }
}

/// A handle onto one live browser-controlled document.
#[async_trait::async_trait]
pub trait Session: Send + Sync {
    /// Full serialized markup of the current document state.
    async fn content(&self) -> Result<String, SessionError>;

    /// Replace the current document content wholesale.
    async fn set_content(&self, markup: &str) -> Result<(), SessionError>;

    /// Execute a script in the live document context, awaiting any promise,
    /// and return its JSON result.
    async fn evaluate(&self, script: &str) -> Result<Value, SessionError>;

    /// Register a script to run in every future document context before any
    /// of that document's own scripts execute.
    ///
    /// Implementations that cannot guarantee pre-document-evaluation
    /// ordering must return [`SessionError::PreloadUnsupported`] rather
    /// than installing a best-effort hook.
    async fn install_preload_hook(&self, script: &str) -> Result<(), SessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preload_unsupported_maps_to_capability_mismatch() {
        let err: Error = SessionError::PreloadUnsupported("fake session".into()).into();
        assert!(matches!(err, Error::CapabilityMismatch(_)));
    }

    #[test]
    fn test_round_trip_errors_map_to_session() {
        let err: Error = SessionError::Evaluation("boom".into()).into();
        assert!(matches!(err, Error::Session(_)));
        assert!(err.to_string().contains("boom"));
    }
}
