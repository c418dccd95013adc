//! The three mutually exclusive display panes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Active display pane.
///
/// ```text
///            tab (any)              tab (any)
///   Circuit ◄──────────► Results ◄──────────► StateVector
///      ▲                    ▲                      ▲
///      │ reset()            │ simulation ok        │ state vector ok
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pane {
    /// Circuit editor.
    #[default]
    Circuit,
    /// Measurement results.
    Results,
    /// State-vector table.
    #[serde(rename = "statevector")]
    StateVector,
}

impl Pane {
    /// All panes in tab order.
    pub const ALL: [Pane; 3] = [Pane::Circuit, Pane::Results, Pane::StateVector];

    /// Tab name.
    pub fn name(self) -> &'static str {
        match self {
            Pane::Circuit => "circuit",
            Pane::Results => "results",
            Pane::StateVector => "statevector",
        }
    }

    /// Heading shown above the pane.
    pub fn title(self) -> &'static str {
        match self {
            Pane::Circuit => "Circuit",
            Pane::Results => "Results",
            Pane::StateVector => "State Vector",
        }
    }
}

impl fmt::Display for Pane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pane {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circuit" | "c" => Ok(Pane::Circuit),
            "results" | "result" | "r" => Ok(Pane::Results),
            "statevector" | "state-vector" | "sv" => Ok(Pane::StateVector),
            other => Err(format!(
                "Unknown pane '{other}'. Available: circuit, results, statevector"
            )),
        }
    }
}
