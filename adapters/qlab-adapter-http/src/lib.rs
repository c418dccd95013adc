//! Qlab Adapter for the REST Simulation Service
//!
//! This crate connects the client to the simulation service over HTTP. The
//! service runs the circuit, samples measurements, computes amplitudes and
//! renders every image; this adapter only moves JSON back and forth.
//!
//! # Configuration
//!
//! ```bash
//! export QLAB_BACKEND_URL="http://localhost:8000"
//! ```
//!
//! No overall request timeout is applied unless one is set in
//! [`HttpSettings`]; a hung service keeps the call pending.

mod api;
mod backend;
mod error;

pub use api::{DEFAULT_BASE_URL, HttpClient, HttpSettings, RootResponse};
pub use backend::{BACKEND_URL_ENV, HttpBackend};
pub use error::{HttpError, HttpResult};

// Re-export common types
pub use qlab_hal::{HalError, SimulationBackend};
