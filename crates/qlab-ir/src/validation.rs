//! Structural checks that the editor itself does not enforce.
//!
//! The circuit model is permissive: shrinking the register leaves operands
//! dangling, and control and target may be set to the same qubit. These
//! helpers report such gates without changing them.

use thiserror::Error;

use crate::circuit::{SUPPORTED_QUBIT_COUNTS, SUPPORTED_SHOTS};
use crate::gate::{Gate, OperandField};
use crate::qubit::QubitId;

/// A single problem found in a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    /// Operand addresses a qubit outside the register.
    #[error("gate {gate_index}: {field} {qubit} is outside the {num_qubits}-qubit register")]
    OperandOutOfRange {
        /// Position of the gate.
        gate_index: usize,
        /// Offending operand.
        field: OperandField,
        /// The qubit it points at.
        qubit: QubitId,
        /// Current register size.
        num_qubits: u32,
    },

    /// Two-qubit gate whose control and target coincide.
    #[error("gate {gate_index}: control and target are both {qubit}")]
    ControlEqualsTarget {
        /// Position of the gate.
        gate_index: usize,
        /// The shared qubit.
        qubit: QubitId,
    },
}

/// Issues found by [`validate_gates`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Check if no issues were found.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// The issues, ordered by gate position.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }
}

impl IntoIterator for ValidationReport {
    type Item = ValidationIssue;
    type IntoIter = std::vec::IntoIter<ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

/// Check every gate against the register size and the `control != target` rule.
pub fn validate_gates(gates: &[Gate], num_qubits: u32) -> ValidationReport {
    let mut issues = Vec::new();

    for (gate_index, gate) in gates.iter().enumerate() {
        for (field, qubit) in gate.operands() {
            if !qubit.is_within(num_qubits) {
                issues.push(ValidationIssue::OperandOutOfRange {
                    gate_index,
                    field,
                    qubit,
                    num_qubits,
                });
            }
        }
        if let Some(control) = gate.control() {
            if control == gate.target() {
                issues.push(ValidationIssue::ControlEqualsTarget {
                    gate_index,
                    qubit: control,
                });
            }
        }
    }

    ValidationReport { issues }
}

/// Check if `num_qubits` is offered by the qubit selector.
pub fn is_supported_qubit_count(num_qubits: u32) -> bool {
    SUPPORTED_QUBIT_COUNTS.contains(&num_qubits)
}

/// Check if `shots` is offered by the shot selector.
pub fn is_supported_shots(shots: u32) -> bool {
    SUPPORTED_SHOTS.contains(&shots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{SingleQubitKind, TwoQubitKind};

    #[test]
    fn test_default_gates_are_valid() {
        let report = validate_gates(&crate::Circuit::default_gates(), 2);
        assert!(report.is_valid());
    }

    #[test]
    fn test_out_of_range_operands() {
        let gates = [
            Gate::single(SingleQubitKind::Y, QubitId(3)),
            Gate::two(TwoQubitKind::CZ, QubitId(2), QubitId(0)),
        ];
        let report = validate_gates(&gates, 2);
        assert_eq!(
            report.issues(),
            &[
                ValidationIssue::OperandOutOfRange {
                    gate_index: 0,
                    field: OperandField::Target,
                    qubit: QubitId(3),
                    num_qubits: 2,
                },
                ValidationIssue::OperandOutOfRange {
                    gate_index: 1,
                    field: OperandField::Control,
                    qubit: QubitId(2),
                    num_qubits: 2,
                },
            ]
        );
    }

    #[test]
    fn test_control_equals_target() {
        let gates = [Gate::two(TwoQubitKind::Swap, QubitId(1), QubitId(1))];
        let report = validate_gates(&gates, 3);
        assert_eq!(report.issues().len(), 1);
        assert_eq!(
            report.issues()[0].to_string(),
            "gate 0: control and target are both q1"
        );
    }

    #[test]
    fn test_supported_sets() {
        assert!(is_supported_qubit_count(3));
        assert!(!is_supported_qubit_count(5));
        assert!(is_supported_shots(2048));
        assert!(!is_supported_shots(8192));
    }
}
