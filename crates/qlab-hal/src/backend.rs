//! Backend trait.
//!
//! ```text
//!   simulate(SimulateRequest)       ──→ SimulationResult
//!   state_vector(StateVectorRequest) ──→ StateVectorResult
//! ```
//!
//! Both calls are a single request/response exchange. There is no job
//! handle, no polling and no cancellation: a call resolves, fails, or
//! waits for as long as the transport allows.

use async_trait::async_trait;

use crate::error::HalResult;
use crate::request::{SimulateRequest, StateVectorRequest};
use crate::result::{SimulationResult, StateVectorResult};

/// A remote service that runs circuits on the client's behalf.
///
/// Implementations must be `Send + Sync` so a session can hold them behind
/// an `Arc`.
#[async_trait]
pub trait SimulationBackend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Run a shot-based measurement simulation.
    async fn simulate(&self, request: &SimulateRequest) -> HalResult<SimulationResult>;

    /// Compute the closed-form state vector.
    async fn state_vector(&self, request: &StateVectorRequest) -> HalResult<StateVectorResult>;

    /// Lightweight liveness check returning the service banner.
    async fn ping(&self) -> HalResult<String> {
        Ok(format!("{} (no liveness endpoint)", self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HalError;
    use qlab_ir::Circuit;

    struct Offline;

    #[async_trait]
    impl SimulationBackend for Offline {
        fn name(&self) -> &str {
            "offline"
        }

        async fn simulate(&self, _request: &SimulateRequest) -> HalResult<SimulationResult> {
            Err(HalError::Backend("offline".into()))
        }

        async fn state_vector(
            &self,
            _request: &StateVectorRequest,
        ) -> HalResult<StateVectorResult> {
            Err(HalError::Backend("offline".into()))
        }
    }

    #[tokio::test]
    async fn test_default_ping_names_backend() {
        let backend: Box<dyn SimulationBackend> = Box::new(Offline);
        assert_eq!(
            backend.ping().await.unwrap(),
            "offline (no liveness endpoint)"
        );
    }

    #[tokio::test]
    async fn test_trait_object_forwards_errors() {
        let backend: std::sync::Arc<dyn SimulationBackend> = std::sync::Arc::new(Offline);
        let request = SimulateRequest::from_circuit(&Circuit::new());
        let err = backend.simulate(&request).await.unwrap_err();
        assert_eq!(err.detail(), None);
        assert_eq!(err.to_string(), "Backend error: offline");
    }
}
