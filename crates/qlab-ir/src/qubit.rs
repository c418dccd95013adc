//! Qubit index type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based position of a qubit within the configured register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Check whether this index addresses a register of `num_qubits` qubits.
    #[inline]
    pub fn is_within(self, num_qubits: u32) -> bool {
        self.0 < num_qubits
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(QubitId(3).to_string(), "q3");
    }

    #[test]
    fn test_is_within() {
        assert!(QubitId(0).is_within(2));
        assert!(QubitId(1).is_within(2));
        assert!(!QubitId(2).is_within(2));
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        assert_eq!(serde_json::to_string(&QubitId(2)).unwrap(), "2");
        let q: QubitId = serde_json::from_str("1").unwrap();
        assert_eq!(q, QubitId(1));
    }
}
