//! Qlab Circuit Model
//!
//! This crate holds the client-side description of a quantum circuit as it
//! is edited: the register size, the shot count and an ordered list of
//! gates. No quantum state is computed here; the circuit is only built,
//! checked and serialized for the simulation service.
//!
//! # Example
//!
//! ```rust
//! use qlab_ir::{Circuit, GateKind, OperandField, QubitId};
//!
//! // Fresh circuits start as `H q0; CX q0 → q1`
//! let mut circuit = Circuit::new();
//! circuit.set_num_qubits(3).unwrap();
//!
//! let idx = circuit.add_gate(GateKind::X);
//! circuit.update_gate_operand(idx, OperandField::Target, "2").unwrap();
//!
//! assert_eq!(circuit.len(), 3);
//! assert_eq!(circuit.gate(idx).unwrap().target(), QubitId(2));
//! assert!(circuit.validate().is_valid());
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Wire name |
//! |------|--------|-----------|
//! | `H` | 1 | `h` |
//! | `X`, `Y`, `Z` | 1 | `x`, `y`, `z` |
//! | `CX` | 2 | `cx` |
//! | `CZ` | 2 | `cz` |
//! | `SWAP` | 2 | `swap` |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod qubit;
pub mod validation;

pub use circuit::{
    Circuit, DEFAULT_NUM_QUBITS, DEFAULT_SHOTS, SUPPORTED_QUBIT_COUNTS, SUPPORTED_SHOTS,
};
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateKind, OperandField, SingleQubitKind, TwoQubitKind};
pub use qubit::QubitId;
pub use validation::{
    ValidationIssue, ValidationReport, is_supported_qubit_count, is_supported_shots,
};
