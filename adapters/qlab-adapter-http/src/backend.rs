//! [`SimulationBackend`] implementation over HTTP.

use async_trait::async_trait;
use tracing::{info, instrument};

use qlab_hal::{
    HalResult, SimulateRequest, SimulationBackend, SimulationResult, StateVectorRequest,
    StateVectorResult,
};

use crate::api::{HttpClient, HttpSettings};
use crate::error::{HttpError, HttpResult};

/// Environment variable holding the service URL.
pub const BACKEND_URL_ENV: &str = "QLAB_BACKEND_URL";

/// The remote simulation service reached over HTTP.
///
/// # Example
///
/// ```ignore
/// use qlab_adapter_http::HttpBackend;
/// use qlab_hal::{SimulateRequest, SimulationBackend};
/// use qlab_ir::Circuit;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let backend = HttpBackend::new("http://localhost:8000")?;
///     let request = SimulateRequest::from_circuit(&Circuit::new());
///     let result = backend.simulate(&request).await?;
///     println!("{:?}", result.counts);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: HttpClient,
}

impl HttpBackend {
    /// Create a backend for the service at `base_url` with default settings.
    pub fn new(base_url: impl Into<String>) -> HttpResult<Self> {
        Self::with_settings(base_url, &HttpSettings::default())
    }

    /// Create a backend with explicit connection settings.
    pub fn with_settings(base_url: impl Into<String>, settings: &HttpSettings) -> HttpResult<Self> {
        Ok(Self {
            client: HttpClient::new(base_url, settings)?,
        })
    }

    /// Create a backend from `QLAB_BACKEND_URL`.
    pub fn from_env() -> HttpResult<Self> {
        let url = std::env::var(BACKEND_URL_ENV).map_err(|_| HttpError::MissingUrl)?;
        Self::new(url)
    }

    /// The service base URL.
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait]
impl SimulationBackend for HttpBackend {
    fn name(&self) -> &str {
        self.client.base_url()
    }

    #[instrument(skip(self, request))]
    async fn simulate(&self, request: &SimulateRequest) -> HalResult<SimulationResult> {
        let result = self.client.simulate(request).await?;
        info!(
            "Simulation returned {} outcomes over {} shots",
            result.counts.len(),
            result.total_shots
        );
        Ok(result)
    }

    #[instrument(skip(self, request))]
    async fn state_vector(&self, request: &StateVectorRequest) -> HalResult<StateVectorResult> {
        let result = self.client.state_vector(request).await?;
        info!(
            "State vector returned {} basis states, {} Bloch images",
            result.state_vector.len(),
            result.bloch_spheres().len()
        );
        Ok(result)
    }

    async fn ping(&self) -> HalResult<String> {
        Ok(self.client.root().await?.message)
    }
}
