//! REST client for the simulation service.
//!
//! ## Endpoints
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | `GET` | `/api/` | none | `{"message": "..."}` |
//! | `POST` | `/api/quantum/simulate` | [`SimulateRequest`] | [`SimulationResult`] |
//! | `POST` | `/api/quantum/state-vector` | [`StateVectorRequest`] | [`StateVectorResult`] |
//!
//! Failures are reported with a non-2xx status and, usually, a body of the
//! form `{"detail": "<message>"}`. Request validation errors from the
//! service framework put a list in `detail` instead; those are treated as
//! having no message.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use qlab_hal::{SimulateRequest, SimulationResult, StateVectorRequest, StateVectorResult};

use crate::error::{HttpError, HttpResult};

/// Default service URL (local development server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// API path prefix.
const API_PATH: &str = "/api";

/// User agent string for requests.
const USER_AGENT: &str = concat!("qlab-adapter-http/", env!("CARGO_PKG_VERSION"));

/// Connection settings.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// Overall time allowed per request; `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// Simulation service API client.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// HTTP client.
    client: Client,
    /// Service base URL without trailing slash.
    base_url: String,
}

impl HttpClient {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>, settings: &HttpSettings) -> HttpResult<Self> {
        let base_url = normalize_base_url(base_url.into())?;

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(HttpError::Http)?;

        Ok(Self { client, base_url })
    }

    /// The service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full API URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PATH, path)
    }

    /// Fetch the service banner.
    #[instrument(skip(self))]
    pub async fn root(&self) -> HttpResult<RootResponse> {
        let url = self.url("/");
        debug!("Fetching service banner from {}", url);

        let response = self.client.get(&url).send().await?;
        handle_response(response).await
    }

    /// Run a measurement simulation.
    #[instrument(skip(self, request), fields(num_qubits = request.num_qubits, gates = request.gates.len(), shots = request.shots))]
    pub async fn simulate(&self, request: &SimulateRequest) -> HttpResult<SimulationResult> {
        let url = self.url("/quantum/simulate");
        debug!("Posting simulation to {}", url);

        let response = self.client.post(&url).json(request).send().await?;
        handle_response(response).await
    }

    /// Compute the state vector.
    #[instrument(skip(self, request), fields(num_qubits = request.num_qubits, gates = request.gates.len()))]
    pub async fn state_vector(&self, request: &StateVectorRequest) -> HttpResult<StateVectorResult> {
        let url = self.url("/quantum/state-vector");
        debug!("Posting state-vector request to {}", url);

        let response = self.client.post(&url).json(request).send().await?;
        handle_response(response).await
    }
}

/// Strip trailing slashes and check the scheme.
fn normalize_base_url(url: String) -> HttpResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(HttpError::MissingUrl);
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(HttpError::InvalidUrl(url));
    }
    Ok(trimmed.to_string())
}

/// Decode a success body, or turn a failure into [`HttpError::ApiError`].
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> HttpResult<T> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        Ok(serde_json::from_str(&body)?)
    } else {
        debug!("Request failed with {}: {}", status, body);
        Err(HttpError::ApiError {
            status: status.as_u16(),
            detail: extract_detail(&body),
        })
    }
}

/// Pull a string `detail` out of a failure body. Any other shape yields `None`.
fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(detail) if !detail.is_empty() => Some(detail),
        _ => None,
    }
}

/// Failure payload.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: serde_json::Value,
}

/// Response of `GET /api/`.
#[derive(Debug, Clone, Deserialize)]
pub struct RootResponse {
    /// Service banner.
    pub message: String,
}
