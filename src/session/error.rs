//! Session persistence error types.

use std::path::PathBuf;

/// Errors that can occur while restoring or checkpointing session state.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to read the session file
    #[error("Failed to read session from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the session file
    #[error("Failed to write session to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize session state
    #[error("Failed to serialize session: {0}")]
    Serialization(String),

    /// Failed to deserialize session state
    #[error("Failed to deserialize session: {0}")]
    Deserialization(String),
}
