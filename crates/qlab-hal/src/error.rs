//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur while talking to a simulation backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Transport-level failure (connection refused, reset, TLS, ...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a failure status.
    #[error("Backend rejected request (HTTP {status}){}", format_detail(.detail))]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Human-readable message from the failure payload, if it had one.
        detail: Option<String>,
    },

    /// Payload could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend is misconfigured.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic backend error.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl HalError {
    /// The backend-supplied failure message, if the payload carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            HalError::Rejected {
                detail: Some(detail),
                ..
            } => Some(detail),
            _ => None,
        }
    }
}

#[allow(clippy::ref_option)]
fn format_detail(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(": {d}"),
        None => String::new(),
    }
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
