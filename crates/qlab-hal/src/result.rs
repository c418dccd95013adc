//! Result artifacts returned by the simulation service.
//!
//! Both results are treated as opaque by the client: images are base64 PNG
//! strings rendered server-side, and numeric fields are displayed as
//! received. The consistency checks here are for tests against a fake
//! backend and for diagnostics; nothing rejects a result that fails them.

use std::collections::{BTreeMap, HashSet};

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a shot-based measurement simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Circuit diagram, base64 PNG.
    pub circuit_diagram: String,
    /// Measurement histogram, base64 PNG.
    pub histogram: String,
    /// Observed count per bitstring.
    pub counts: BTreeMap<String, u64>,
    /// Shots used by the backend.
    pub total_shots: u64,
}

impl SimulationResult {
    /// Sum of all counts.
    pub fn counted_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Counts ordered by descending count, ties by bitstring.
    pub fn sorted_counts(&self) -> Vec<(&str, u64)> {
        let mut rows: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(state, count)| (state.as_str(), *count))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }

    /// Check the result against the shots that were requested.
    pub fn violations(&self, requested_shots: u32) -> Vec<ResultViolation> {
        let mut violations = Vec::new();
        if self.total_shots != u64::from(requested_shots) {
            violations.push(ResultViolation::ShotMismatch {
                requested: u64::from(requested_shots),
                reported: self.total_shots,
            });
        }
        let counted = self.counted_shots();
        if counted != self.total_shots {
            violations.push(ResultViolation::CountSumMismatch {
                counted,
                total: self.total_shots,
            });
        }
        violations
    }
}

/// Amplitude record for one computational basis state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasisState {
    /// Bitstring label, e.g. `"01"`.
    pub state: String,
    /// Real part of the amplitude.
    pub amplitude_real: f64,
    /// Imaginary part of the amplitude.
    pub amplitude_imag: f64,
    /// `|amplitude|`.
    pub magnitude: f64,
    /// `|amplitude|²`.
    pub probability: f64,
    /// Complex phase in radians, when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<f64>,
}

impl BasisState {
    /// The amplitude as a complex number.
    pub fn amplitude(&self) -> Complex64 {
        Complex64::new(self.amplitude_real, self.amplitude_imag)
    }
}

/// Outcome of a state-vector computation.
///
/// Unknown top-level fields are kept in [`StateVectorResult::extra`] so the
/// exported document matches what the backend sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVectorResult {
    /// One record per reported basis state.
    pub state_vector: Vec<BasisState>,
    /// Bloch-sphere renderings, base64 PNG.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bloch_spheres: Option<Vec<String>>,
    /// Number of reported states.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_states: Option<usize>,
    /// Fields this client does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StateVectorResult {
    /// Bloch-sphere images, empty when none were returned.
    pub fn bloch_spheres(&self) -> &[String] {
        self.bloch_spheres.as_deref().unwrap_or_default()
    }

    /// Sum of all probabilities.
    pub fn total_probability(&self) -> f64 {
        self.state_vector.iter().map(|s| s.probability).sum()
    }

    /// Check the full-state-vector invariants for an `num_qubits` register:
    /// `2^n` entries, each basis state once, `magnitude = |amplitude|`,
    /// `probability = magnitude²` and probabilities summing to one.
    pub fn violations(&self, num_qubits: u32, tolerance: f64) -> Vec<ResultViolation> {
        let mut violations = Vec::new();

        let expected = 1usize << num_qubits;
        if self.state_vector.len() != expected {
            violations.push(ResultViolation::StateCount {
                expected,
                got: self.state_vector.len(),
            });
        }

        let mut seen = HashSet::new();
        for entry in &self.state_vector {
            let well_formed = entry.state.len() == num_qubits as usize
                && entry.state.chars().all(|c| c == '0' || c == '1');
            if !well_formed {
                violations.push(ResultViolation::MalformedState(entry.state.clone()));
            }
            if !seen.insert(entry.state.as_str()) {
                violations.push(ResultViolation::DuplicateState(entry.state.clone()));
            }

            let magnitude = entry.amplitude().norm();
            if (magnitude - entry.magnitude).abs() > tolerance {
                violations.push(ResultViolation::Magnitude {
                    state: entry.state.clone(),
                    expected: magnitude,
                    got: entry.magnitude,
                });
            }
            let probability = entry.magnitude * entry.magnitude;
            if (probability - entry.probability).abs() > tolerance {
                violations.push(ResultViolation::Probability {
                    state: entry.state.clone(),
                    expected: probability,
                    got: entry.probability,
                });
            }
        }

        let total = self.total_probability();
        if (total - 1.0).abs() > tolerance {
            violations.push(ResultViolation::Normalization(total));
        }

        violations
    }
}

/// A result that does not satisfy the backend contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResultViolation {
    /// `total_shots` differs from the request.
    #[error("backend used {reported} shots, {requested} requested")]
    ShotMismatch {
        /// Shots in the request.
        requested: u64,
        /// Shots in the response.
        reported: u64,
    },

    /// Counts do not add up to `total_shots`.
    #[error("counts sum to {counted}, total_shots is {total}")]
    CountSumMismatch {
        /// Sum of counts.
        counted: u64,
        /// Reported total.
        total: u64,
    },

    /// Wrong number of basis states.
    #[error("expected {expected} basis states, got {got}")]
    StateCount {
        /// `2^num_qubits`.
        expected: usize,
        /// Entries received.
        got: usize,
    },

    /// Basis state label is not an n-bit string.
    #[error("malformed basis state '{0}'")]
    MalformedState(String),

    /// Basis state listed more than once.
    #[error("basis state '{0}' listed more than once")]
    DuplicateState(String),

    /// Magnitude disagrees with the amplitude.
    #[error("|{state}⟩: magnitude {got} but |amplitude| is {expected}")]
    Magnitude {
        /// Basis state label.
        state: String,
        /// Recomputed value.
        expected: f64,
        /// Reported value.
        got: f64,
    },

    /// Probability disagrees with the magnitude.
    #[error("|{state}⟩: probability {got} but magnitude² is {expected}")]
    Probability {
        /// Basis state label.
        state: String,
        /// Recomputed value.
        expected: f64,
        /// Reported value.
        got: f64,
    },

    /// Probabilities do not sum to one.
    #[error("probabilities sum to {0}")]
    Normalization(f64),
}
