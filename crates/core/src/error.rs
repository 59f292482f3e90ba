//! Unified error types for coldstart.
//!
//! A missing cache directory or snapshot is not an error: reads that can
//! miss return `Option` instead. Everything in this enum is a condition the
//! caller must handle.

/// Unified error types for the coldstart cache.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Read or write against persisted storage failed.
    #[error("IO_FAILURE: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// A stored manifest file is not valid JSON.
    #[error("CORRUPT_MANIFEST: {file}: {source}")]
    CorruptManifest {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// A live-session round trip (content, evaluate, set_content) failed.
    #[error("SESSION_ERROR: {0}")]
    Session(String),

    /// The session cannot install hooks before document evaluation.
    #[error("CAPABILITY_MISMATCH: {0}")]
    CapabilityMismatch(String),
}

impl Error {
    /// Wrap an I/O error with the operation that produced it.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io { context: context.into(), source }
    }
}
