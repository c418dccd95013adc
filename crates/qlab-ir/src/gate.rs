//! Gate types.
//!
//! A [`Gate`] is a tagged union over the two supported arities, so a
//! single-qubit gate can never carry a control operand and a two-qubit gate
//! can never lack one. On the wire both arities share the flat shape
//! `{"type": "cx", "control": 0, "target": 1}` with `control` omitted for
//! single-qubit kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// Single-qubit gate kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SingleQubitKind {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
}

/// Two-qubit gate kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwoQubitKind {
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate. The backend reads its operands as `(control, target)`.
    Swap,
}

/// Every gate kind the editor offers, independent of arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateKind {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
}

impl GateKind {
    /// All kinds in palette order.
    pub const ALL: [GateKind; 7] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::CX,
        GateKind::CZ,
        GateKind::Swap,
    ];

    /// Wire name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::H => "h",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::CX => "cx",
            GateKind::CZ => "cz",
            GateKind::Swap => "swap",
        }
    }

    /// Upper-case label used in notifications and listings.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            GateKind::H => "H",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::CX => "CX",
            GateKind::CZ => "CZ",
            GateKind::Swap => "SWAP",
        }
    }

    /// Number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(self) -> u32 {
        if self.is_two_qubit() { 2 } else { 1 }
    }

    /// Check if this kind takes a control operand.
    #[inline]
    pub fn is_two_qubit(self) -> bool {
        matches!(self, GateKind::CX | GateKind::CZ | GateKind::Swap)
    }

    /// Build a gate of this kind with the default operands
    /// (`target = 0`, or `control = 0, target = 1` for two-qubit kinds).
    pub fn with_default_operands(self) -> Gate {
        match self {
            GateKind::H => Gate::single(SingleQubitKind::H, QubitId(0)),
            GateKind::X => Gate::single(SingleQubitKind::X, QubitId(0)),
            GateKind::Y => Gate::single(SingleQubitKind::Y, QubitId(0)),
            GateKind::Z => Gate::single(SingleQubitKind::Z, QubitId(0)),
            GateKind::CX => Gate::two(TwoQubitKind::CX, QubitId(0), QubitId(1)),
            GateKind::CZ => Gate::two(TwoQubitKind::CZ, QubitId(0), QubitId(1)),
            GateKind::Swap => Gate::two(TwoQubitKind::Swap, QubitId(0), QubitId(1)),
        }
    }
}

impl From<SingleQubitKind> for GateKind {
    fn from(kind: SingleQubitKind) -> Self {
        match kind {
            SingleQubitKind::H => GateKind::H,
            SingleQubitKind::X => GateKind::X,
            SingleQubitKind::Y => GateKind::Y,
            SingleQubitKind::Z => GateKind::Z,
        }
    }
}

impl From<TwoQubitKind> for GateKind {
    fn from(kind: TwoQubitKind) -> Self {
        match kind {
            TwoQubitKind::CX => GateKind::CX,
            TwoQubitKind::CZ => GateKind::CZ,
            TwoQubitKind::Swap => GateKind::Swap,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GateKind {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "h" => Ok(GateKind::H),
            "x" => Ok(GateKind::X),
            "y" => Ok(GateKind::Y),
            "z" => Ok(GateKind::Z),
            "cx" | "cnot" => Ok(GateKind::CX),
            "cz" => Ok(GateKind::CZ),
            "swap" => Ok(GateKind::Swap),
            other => Err(IrError::UnknownGate(other.to_string())),
        }
    }
}

/// Operand slot of a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandField {
    /// The qubit the gate acts on.
    Target,
    /// The control qubit of a two-qubit gate.
    Control,
}

impl OperandField {
    /// Wire name of the field.
    pub fn name(self) -> &'static str {
        match self {
            OperandField::Target => "target",
            OperandField::Control => "control",
        }
    }
}

impl fmt::Display for OperandField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperandField {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "target" | "t" => Ok(OperandField::Target),
            "control" | "c" => Ok(OperandField::Control),
            other => Err(IrError::UnknownField(other.to_string())),
        }
    }
}

/// One circuit instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "WireGate", try_from = "WireGate")]
pub enum Gate {
    /// Gate acting on one qubit.
    Single {
        /// Which single-qubit gate.
        kind: SingleQubitKind,
        /// Qubit acted on.
        target: QubitId,
    },
    /// Gate acting on a control and a target qubit.
    Two {
        /// Which two-qubit gate.
        kind: TwoQubitKind,
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },
}

impl Gate {
    /// Create a single-qubit gate.
    pub fn single(kind: SingleQubitKind, target: QubitId) -> Self {
        Gate::Single { kind, target }
    }

    /// Create a two-qubit gate.
    pub fn two(kind: TwoQubitKind, control: QubitId, target: QubitId) -> Self {
        Gate::Two {
            kind,
            control,
            target,
        }
    }

    /// The arity-independent kind of this gate.
    pub fn kind(&self) -> GateKind {
        match *self {
            Gate::Single { kind, .. } => kind.into(),
            Gate::Two { kind, .. } => kind.into(),
        }
    }

    /// Target qubit.
    pub fn target(&self) -> QubitId {
        match *self {
            Gate::Single { target, .. } | Gate::Two { target, .. } => target,
        }
    }

    /// Control qubit, for two-qubit gates.
    pub fn control(&self) -> Option<QubitId> {
        match *self {
            Gate::Single { .. } => None,
            Gate::Two { control, .. } => Some(control),
        }
    }

    /// Read an operand by field.
    pub fn operand(&self, field: OperandField) -> IrResult<QubitId> {
        match field {
            OperandField::Target => Ok(self.target()),
            OperandField::Control => self.control().ok_or_else(|| IrError::ArityMismatch {
                gate_name: self.kind().name().to_string(),
                field,
            }),
        }
    }

    /// Assign an operand by field.
    ///
    /// No check is made against the register size or against the other
    /// operand; see [`crate::validation`] for that.
    pub fn set_operand(&mut self, field: OperandField, qubit: QubitId) -> IrResult<()> {
        match (self, field) {
            (Gate::Single { target, .. } | Gate::Two { target, .. }, OperandField::Target) => {
                *target = qubit;
                Ok(())
            }
            (Gate::Two { control, .. }, OperandField::Control) => {
                *control = qubit;
                Ok(())
            }
            (gate @ Gate::Single { .. }, OperandField::Control) => Err(IrError::ArityMismatch {
                gate_name: gate.kind().name().to_string(),
                field,
            }),
        }
    }

    /// Operands of this gate in `(field, qubit)` form, control first.
    pub fn operands(&self) -> Vec<(OperandField, QubitId)> {
        match *self {
            Gate::Single { target, .. } => vec![(OperandField::Target, target)],
            Gate::Two {
                control, target, ..
            } => vec![
                (OperandField::Control, control),
                (OperandField::Target, target),
            ],
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Gate::Single { target, .. } => write!(f, "{} {}", self.kind(), target),
            Gate::Two {
                control, target, ..
            } => write!(f, "{} {} → {}", self.kind(), control, target),
        }
    }
}

/// Flat wire representation shared by both arities.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireGate {
    #[serde(rename = "type")]
    kind: GateKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    control: Option<u32>,
    target: u32,
}

impl From<Gate> for WireGate {
    fn from(gate: Gate) -> Self {
        WireGate {
            kind: gate.kind(),
            control: gate.control().map(|q| q.0),
            target: gate.target().0,
        }
    }
}

impl TryFrom<WireGate> for Gate {
    type Error = IrError;

    fn try_from(wire: WireGate) -> Result<Self, Self::Error> {
        let target = QubitId(wire.target);
        let single = |kind| match wire.control {
            None => Ok(Gate::single(kind, target)),
            Some(_) => Err(IrError::ArityMismatch {
                gate_name: wire.kind.name().to_string(),
                field: OperandField::Control,
            }),
        };
        let two = |kind| match wire.control {
            Some(control) => Ok(Gate::two(kind, QubitId(control), target)),
            None => Err(IrError::ArityMismatch {
                gate_name: wire.kind.name().to_string(),
                field: OperandField::Control,
            }),
        };
        match wire.kind {
            GateKind::H => single(SingleQubitKind::H),
            GateKind::X => single(SingleQubitKind::X),
            GateKind::Y => single(SingleQubitKind::Y),
            GateKind::Z => single(SingleQubitKind::Z),
            GateKind::CX => two(TwoQubitKind::CX),
            GateKind::CZ => two(TwoQubitKind::CZ),
            GateKind::Swap => two(TwoQubitKind::Swap),
        }
    }
}
