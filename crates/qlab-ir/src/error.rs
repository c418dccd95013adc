//! Error types for the circuit model.

use thiserror::Error;

use crate::gate::OperandField;

/// Errors that can occur while editing a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit count outside the supported set.
    #[error("Unsupported qubit count {0} (supported: 2, 3, 4)")]
    UnsupportedQubitCount(u32),

    /// Shot count outside the supported set.
    #[error("Unsupported shot count {0} (supported: 512, 1024, 2048, 4096)")]
    UnsupportedShots(u32),

    /// Gate index past the end of the sequence.
    #[error("Gate index {index} out of range (circuit has {len} gates)")]
    GateIndexOutOfRange {
        /// The requested position.
        index: usize,
        /// Current length of the gate sequence.
        len: usize,
    },

    /// Operand value that is not a non-negative integer.
    #[error("Invalid value '{value}' for {field}")]
    InvalidOperand {
        /// The operand being assigned.
        field: OperandField,
        /// The raw value as supplied.
        value: String,
    },

    /// Operand or payload that does not match the gate's arity.
    #[error("Operand {field} does not match the arity of gate '{gate_name}'")]
    ArityMismatch {
        /// Wire name of the gate.
        gate_name: String,
        /// The offending operand.
        field: OperandField,
    },

    /// Gate name not in the supported set.
    #[error("Unknown gate '{0}' (expected one of h, x, y, z, cx, cz, swap)")]
    UnknownGate(String),

    /// Operand field name that is neither `target` nor `control`.
    #[error("Unknown operand field '{0}' (expected target or control)")]
    UnknownField(String),
}

/// Result type for circuit model operations.
pub type IrResult<T> = Result<T, IrError>;
