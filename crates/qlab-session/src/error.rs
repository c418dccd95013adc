//! Error types for the session crate.

use std::path::PathBuf;

use qlab_hal::HalError;
use qlab_ir::IrError;
use thiserror::Error;

/// Errors that can occur while driving a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A remote call is already outstanding.
    #[error("A request is already in progress")]
    Busy,

    /// Nothing to send: the circuit has no gates.
    #[error("Circuit has no gates")]
    EmptyCircuit,

    /// Circuit edit was refused.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Remote call failed.
    #[error(transparent)]
    Backend(#[from] HalError),

    /// Writing an artifact failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        /// File being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Result could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image payload is not valid base64.
    #[error("Image '{name}' is not valid base64: {source}")]
    Image {
        /// Artifact name.
        name: String,
        /// Decoder error.
        #[source]
        source: base64::DecodeError,
    },
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
