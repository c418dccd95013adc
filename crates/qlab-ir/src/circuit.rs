//! The editable circuit: qubit count, shot count and the ordered gate sequence.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateKind, OperandField, SingleQubitKind, TwoQubitKind};
use crate::qubit::QubitId;
use crate::validation::{self, ValidationReport};

/// Qubit counts offered by the configuration selector.
pub const SUPPORTED_QUBIT_COUNTS: [u32; 3] = [2, 3, 4];

/// Shot counts offered by the configuration selector.
pub const SUPPORTED_SHOTS: [u32; 4] = [512, 1024, 2048, 4096];

/// Qubit count of a fresh circuit.
pub const DEFAULT_NUM_QUBITS: u32 = 2;

/// Shot count of a fresh circuit.
pub const DEFAULT_SHOTS: u32 = 1024;

/// A quantum circuit under construction.
///
/// Gate order is execution order. Mutations never reorder gates, and
/// changing the qubit count does not touch existing operands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Register size.
    num_qubits: u32,
    /// Samples requested from the measurement simulation.
    shots: u32,
    /// Instructions in execution order.
    gates: Vec<Gate>,
}

impl Circuit {
    /// Create the default circuit: 2 qubits, 1024 shots, `H q0; CX q0 → q1`.
    pub fn new() -> Self {
        Self {
            num_qubits: DEFAULT_NUM_QUBITS,
            shots: DEFAULT_SHOTS,
            gates: Self::default_gates(),
        }
    }

    /// Create a default-seeded circuit with the given configuration.
    pub fn with_config(num_qubits: u32, shots: u32) -> IrResult<Self> {
        let mut circuit = Self::new();
        circuit.set_num_qubits(num_qubits)?;
        circuit.set_shots(shots)?;
        Ok(circuit)
    }

    /// Create a circuit from an explicit gate list.
    pub fn from_gates(num_qubits: u32, shots: u32, gates: Vec<Gate>) -> IrResult<Self> {
        let mut circuit = Self::with_config(num_qubits, shots)?;
        circuit.gates = gates;
        Ok(circuit)
    }

    /// The two-gate Bell preparation every circuit starts from.
    pub fn default_gates() -> Vec<Gate> {
        vec![
            Gate::single(SingleQubitKind::H, QubitId(0)),
            Gate::two(TwoQubitKind::CX, QubitId(0), QubitId(1)),
        ]
    }

    /// Number of qubits in the register.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of measurement shots.
    #[inline]
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Gates in execution order.
    #[inline]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates.
    #[inline]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Check if the circuit has no gates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Gate at a position.
    pub fn gate(&self, index: usize) -> Option<&Gate> {
        self.gates.get(index)
    }

    /// Replace the qubit count.
    ///
    /// Existing operands are left as they are, even if they now fall outside
    /// the register; [`Circuit::validate`] reports them.
    pub fn set_num_qubits(&mut self, num_qubits: u32) -> IrResult<()> {
        if !validation::is_supported_qubit_count(num_qubits) {
            return Err(IrError::UnsupportedQubitCount(num_qubits));
        }
        self.num_qubits = num_qubits;
        Ok(())
    }

    /// Replace the shot count.
    pub fn set_shots(&mut self, shots: u32) -> IrResult<()> {
        if !validation::is_supported_shots(shots) {
            return Err(IrError::UnsupportedShots(shots));
        }
        self.shots = shots;
        Ok(())
    }

    /// Append a gate of `kind` with default operands, returning its position.
    pub fn add_gate(&mut self, kind: GateKind) -> usize {
        self.gates.push(kind.with_default_operands());
        self.gates.len() - 1
    }

    /// Parse `raw` as an integer and assign it to `field` of the gate at `index`.
    ///
    /// Neither the register bound nor `control != target` is enforced here.
    pub fn update_gate_operand(
        &mut self,
        index: usize,
        field: OperandField,
        raw: &str,
    ) -> IrResult<()> {
        let value = raw
            .trim()
            .parse::<u32>()
            .map_err(|_| IrError::InvalidOperand {
                field,
                value: raw.to_string(),
            })?;
        self.set_gate_operand(index, field, QubitId(value))
    }

    /// Assign a qubit to `field` of the gate at `index`.
    pub fn set_gate_operand(
        &mut self,
        index: usize,
        field: OperandField,
        qubit: QubitId,
    ) -> IrResult<()> {
        let len = self.gates.len();
        let gate = self
            .gates
            .get_mut(index)
            .ok_or(IrError::GateIndexOutOfRange { index, len })?;
        gate.set_operand(field, qubit)
    }

    /// Remove the gate at `index`; later gates shift down by one.
    pub fn remove_gate(&mut self, index: usize) -> IrResult<Gate> {
        if index >= self.gates.len() {
            return Err(IrError::GateIndexOutOfRange {
                index,
                len: self.gates.len(),
            });
        }
        Ok(self.gates.remove(index))
    }

    /// Restore the default gate sequence. Qubit and shot counts are kept.
    pub fn reset(&mut self) {
        self.gates = Self::default_gates();
    }

    /// Indices offered by an operand selector for the current register.
    pub fn qubit_choices(&self) -> Vec<QubitId> {
        (0..self.num_qubits).map(QubitId).collect()
    }

    /// Report operands outside the register and two-qubit gates whose
    /// control equals their target.
    pub fn validate(&self) -> ValidationReport {
        validation::validate_gates(&self.gates, self.num_qubits)
    }

    /// Header text, e.g. `2 Qubits • 1024 Shots`.
    pub fn summary(&self) -> String {
        format!("{} Qubits • {} Shots", self.num_qubits, self.shots)
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}
