//! Qlab Hardware Abstraction Layer
//!
//! This crate describes the boundary between the client and the remote
//! simulation service: the [`SimulationBackend`] trait, the request bodies
//! built from a [`qlab_ir::Circuit`], and the result artifacts that come
//! back.
//!
//! # Operations
//!
//! | Operation | Request | Response |
//! |-----------|---------|----------|
//! | Simulate | [`SimulateRequest`] `{num_qubits, gates, shots}` | [`SimulationResult`] |
//! | State vector | [`StateVectorRequest`] `{num_qubits, gates}` | [`StateVectorResult`] |
//!
//! Failures carry an optional human-readable `detail` supplied by the
//! backend; see [`HalError::detail`].

pub mod backend;
pub mod error;
pub mod request;
pub mod result;

pub use backend::SimulationBackend;
pub use error::{HalError, HalResult};
pub use request::{SimulateRequest, StateVectorRequest};
pub use result::{BasisState, ResultViolation, SimulationResult, StateVectorResult};
