//! Error types for the HTTP adapter.

use thiserror::Error;

/// Result type for HTTP adapter operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors that can occur when talking to the simulation service.
#[derive(Debug, Error)]
pub enum HttpError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base URL is not an http(s) URL.
    #[error("Invalid backend URL '{0}' (expected http:// or https://)")]
    InvalidUrl(String),

    /// Missing backend URL.
    #[error("Missing backend URL (set QLAB_BACKEND_URL)")]
    MissingUrl,

    /// API error response.
    #[error("API error ({status}){}", format_detail(.detail))]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// The `detail` string of the failure payload, when present.
        detail: Option<String>,
    },
}

#[allow(clippy::ref_option)]
fn format_detail(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(": {d}"),
        None => String::new(),
    }
}

impl From<HttpError> for qlab_hal::HalError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Http(err) => qlab_hal::HalError::Network(err),
            HttpError::Json(err) => qlab_hal::HalError::Serialization(err),
            HttpError::ApiError { status, detail } => {
                qlab_hal::HalError::Rejected { status, detail }
            }
            HttpError::InvalidUrl(_) | HttpError::MissingUrl => {
                qlab_hal::HalError::Configuration(e.to_string())
            }
        }
    }
}
