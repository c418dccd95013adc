//! Request payloads sent to the simulation service.

use qlab_ir::{Circuit, Gate};
use serde::{Deserialize, Serialize};

/// Body of a measurement-simulation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulateRequest {
    /// Register size.
    pub num_qubits: u32,
    /// Gates in execution order.
    pub gates: Vec<Gate>,
    /// Number of measurement samples.
    pub shots: u32,
}

impl SimulateRequest {
    /// Snapshot a circuit into a request.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        Self {
            num_qubits: circuit.num_qubits(),
            gates: circuit.gates().to_vec(),
            shots: circuit.shots(),
        }
    }
}

/// Body of a state-vector request. Shots are not sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateVectorRequest {
    /// Register size.
    pub num_qubits: u32,
    /// Gates in execution order.
    pub gates: Vec<Gate>,
}

impl StateVectorRequest {
    /// Snapshot a circuit into a request.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        Self {
            num_qubits: circuit.num_qubits(),
            gates: circuit.gates().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simulate_request_shape() {
        let circuit = Circuit::new();
        let body = serde_json::to_value(SimulateRequest::from_circuit(&circuit)).unwrap();
        assert_eq!(
            body,
            json!({
                "num_qubits": 2,
                "gates": [
                    { "type": "h", "target": 0 },
                    { "type": "cx", "control": 0, "target": 1 }
                ],
                "shots": 1024
            })
        );
    }

    #[test]
    fn test_state_vector_request_omits_shots() {
        let circuit = Circuit::with_config(3, 2048).unwrap();
        let body = serde_json::to_value(StateVectorRequest::from_circuit(&circuit)).unwrap();
        assert_eq!(body["num_qubits"], 3);
        assert!(body.get("shots").is_none());
        assert_eq!(body["gates"].as_array().unwrap().len(), 2);
    }
}
