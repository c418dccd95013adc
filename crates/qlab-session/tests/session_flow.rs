//! Session behaviour against a scripted backend.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use qlab_hal::{
    HalError, HalResult, ResultViolation, SimulateRequest, SimulationBackend, SimulationResult,
    StateVectorRequest, StateVectorResult,
};
use qlab_ir::{Circuit, GateKind, OperandField};
use qlab_session::display::count_rows;
use qlab_session::{Level, Pane, Session, SessionError};

// ============================================================================
// Scripted backend
// ============================================================================

/// Replays queued outcomes and counts the calls it receives.
#[derive(Default)]
struct ScriptedBackend {
    simulations: Mutex<VecDeque<HalResult<SimulationResult>>>,
    state_vectors: Mutex<VecDeque<HalResult<StateVectorResult>>>,
    calls: AtomicUsize,
    last_shots: Mutex<Option<u32>>,
}

impl ScriptedBackend {
    fn push_simulation(&self, outcome: HalResult<SimulationResult>) {
        self.simulations.lock().unwrap().push_back(outcome);
    }

    fn push_state_vector(&self, outcome: HalResult<StateVectorResult>) {
        self.state_vectors.lock().unwrap().push_back(outcome);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SimulationBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn simulate(&self, request: &SimulateRequest) -> HalResult<SimulationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_shots.lock().unwrap() = Some(request.shots);
        self.simulations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HalError::Backend("no scripted response".into())))
    }

    async fn state_vector(&self, _request: &StateVectorRequest) -> HalResult<StateVectorResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.state_vectors
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HalError::Backend("no scripted response".into())))
    }
}

/// A service that accepts requests and never answers.
struct HungBackend;

#[async_trait]
impl SimulationBackend for HungBackend {
    fn name(&self) -> &str {
        "hung"
    }

    async fn simulate(&self, _request: &SimulateRequest) -> HalResult<SimulationResult> {
        std::future::pending().await
    }

    async fn state_vector(&self, _request: &StateVectorRequest) -> HalResult<StateVectorResult> {
        std::future::pending().await
    }
}

fn bell_counts(zeros: u64, ones: u64) -> SimulationResult {
    SimulationResult {
        circuit_diagram: "iVBORw0KGgo=".into(),
        histogram: "iVBORw0KGgo=".into(),
        counts: BTreeMap::from([("00".to_string(), zeros), ("11".to_string(), ones)]),
        total_shots: zeros + ones,
    }
}

fn bell_state_vector() -> StateVectorResult {
    let h = std::f64::consts::FRAC_1_SQRT_2;
    serde_json::from_value(json!({
        "state_vector": [
            { "state": "00", "amplitude_real": h, "amplitude_imag": 0.0,
              "magnitude": h, "phase": 0.0, "probability": 0.5 },
            { "state": "11", "amplitude_real": h, "amplitude_imag": 0.0,
              "magnitude": h, "phase": 0.0, "probability": 0.5 }
        ],
        "num_states": 2,
        "bloch_spheres": ["iVBORw0KGgo="]
    }))
    .unwrap()
}

fn session() -> (Arc<ScriptedBackend>, Session) {
    let backend = Arc::new(ScriptedBackend::default());
    let session = Session::new(backend.clone());
    (backend, session)
}

fn messages(session: &mut Session) -> Vec<(Level, String)> {
    session
        .drain_notifications()
        .into_iter()
        .map(|n| (n.level, n.message))
        .collect()
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn test_new_session_starts_on_circuit_pane() {
    let (_, session) = session();
    assert_eq!(session.pane(), Pane::Circuit);
    assert_eq!(session.circuit(), &Circuit::new());
    assert!(session.simulation().is_none());
    assert!(session.state_vector().is_none());
    assert!(!session.is_busy());
}

#[test]
fn test_add_and_remove_notify() {
    let (_, mut session) = session();
    let index = session.add_gate(GateKind::Swap);
    assert_eq!(index, 2);
    session.remove_gate(0).unwrap();

    assert_eq!(
        messages(&mut session),
        vec![
            (Level::Success, "Added SWAP gate".to_string()),
            (Level::Info, "Gate removed".to_string()),
        ]
    );
    assert_eq!(session.circuit().gate(0).unwrap().kind(), GateKind::CX);
}

#[test]
fn test_shrinking_register_warns_about_dangling_operands() {
    let (_, mut session) = session();
    session.set_num_qubits(4).unwrap();
    let index = session.add_gate(GateKind::Z);
    session
        .update_gate_operand(index, OperandField::Target, "3")
        .unwrap();
    session.drain_notifications();

    session.set_num_qubits(2).unwrap();
    let notes = messages(&mut session);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].0, Level::Warning);
    assert!(notes[0].1.contains("q3"));
    assert_eq!(session.circuit().gate(index).unwrap().target().0, 3);
}

#[test]
fn test_operand_edit_warns_when_control_equals_target() {
    let (_, mut session) = session();
    session
        .update_gate_operand(1, OperandField::Target, "0")
        .unwrap();

    let notes = messages(&mut session);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].0, Level::Warning);
    assert!(notes[0].1.contains("q0"));
}

#[test]
fn test_unsupported_configuration_is_refused() {
    let (_, mut session) = session();
    assert!(matches!(session.set_num_qubits(5), Err(SessionError::Ir(_))));
    assert!(matches!(session.set_shots(100), Err(SessionError::Ir(_))));
    assert_eq!(session.circuit().num_qubits(), 2);
    assert_eq!(session.circuit().shots(), 1024);
}

#[test]
fn test_tab_selection_is_free() {
    let (_, mut session) = session();
    for pane in [Pane::StateVector, Pane::Results, Pane::Circuit] {
        session.select_pane(pane);
        assert_eq!(session.pane(), pane);
    }
}

// ============================================================================
// Remote calls
// ============================================================================

#[tokio::test]
async fn test_successful_simulation_switches_to_results() {
    let (backend, mut session) = session();
    backend.push_simulation(Ok(bell_counts(800, 224)));

    session.run_simulation().await.unwrap();

    assert_eq!(session.pane(), Pane::Results);
    assert!(!session.is_busy());
    assert_eq!(*backend.last_shots.lock().unwrap(), Some(1024));

    let rows = count_rows(session.simulation().unwrap());
    assert_eq!(rows[0].state, "00");
    assert_eq!(rows[0].percent(), "78.1%");
    assert_eq!(rows[1].percent(), "21.9%");

    assert_eq!(
        messages(&mut session),
        vec![(Level::Success, "Simulation completed!".to_string())]
    );
}

#[tokio::test]
async fn test_failed_simulation_keeps_previous_result_and_pane() {
    let (backend, mut session) = session();
    backend.push_simulation(Ok(bell_counts(512, 512)));
    session.run_simulation().await.unwrap();
    session.select_pane(Pane::Circuit);
    session.drain_notifications();

    backend.push_simulation(Err(HalError::Rejected {
        status: 400,
        detail: Some("Qubit index out of range".into()),
    }));
    let err = session.run_simulation().await.unwrap_err();

    assert!(matches!(err, SessionError::Backend(_)));
    assert!(!session.is_busy());
    assert_eq!(session.pane(), Pane::Circuit);
    assert_eq!(session.simulation(), Some(&bell_counts(512, 512)));
    assert_eq!(
        messages(&mut session),
        vec![(Level::Error, "Qubit index out of range".to_string())]
    );
}

#[tokio::test]
async fn test_failed_state_vector_keeps_previous_result_and_pane() {
    let (backend, mut session) = session();
    backend.push_state_vector(Ok(bell_state_vector()));
    session.get_state_vector().await.unwrap();
    session.select_pane(Pane::Circuit);
    session.drain_notifications();

    backend.push_state_vector(Err(HalError::Rejected {
        status: 400,
        detail: Some("Unsupported gate".into()),
    }));
    let err = session.get_state_vector().await.unwrap_err();

    assert!(matches!(err, SessionError::Backend(_)));
    assert!(!session.is_busy());
    assert_eq!(session.pane(), Pane::Circuit);
    assert_eq!(session.state_vector(), Some(&bell_state_vector()));
    assert_eq!(
        messages(&mut session),
        vec![(Level::Error, "Unsupported gate".to_string())]
    );
}

#[tokio::test]
async fn test_failure_without_detail_uses_generic_message() {
    let (backend, mut session) = session();
    backend.push_simulation(Err(HalError::Rejected {
        status: 500,
        detail: None,
    }));
    backend.push_state_vector(Err(HalError::Backend("connection reset".into())));

    assert!(session.run_simulation().await.is_err());
    assert!(session.get_state_vector().await.is_err());

    assert_eq!(
        messages(&mut session),
        vec![
            (Level::Error, "Simulation failed".to_string()),
            (Level::Error, "State vector computation failed".to_string()),
        ]
    );
    assert!(session.simulation().is_none());
    assert!(session.state_vector().is_none());
}

#[tokio::test]
async fn test_empty_circuit_issues_no_request() {
    let (backend, mut session) = session();
    session.remove_gate(1).unwrap();
    session.remove_gate(0).unwrap();

    assert!(matches!(
        session.run_simulation().await,
        Err(SessionError::EmptyCircuit)
    ));
    assert!(matches!(
        session.get_state_vector().await,
        Err(SessionError::EmptyCircuit)
    ));
    assert_eq!(backend.calls(), 0);
    assert!(!session.is_busy());
}

#[test]
fn test_busy_flag_blocks_second_request() {
    let (_, mut session) = session();
    let request = session.begin_simulation().unwrap();
    assert_eq!(request.shots, 1024);
    assert!(session.is_busy());

    assert!(matches!(
        session.begin_state_vector(),
        Err(SessionError::Busy)
    ));
    assert!(matches!(session.begin_simulation(), Err(SessionError::Busy)));

    session.complete_simulation(Ok(bell_counts(1000, 24))).unwrap();
    assert!(!session.is_busy());
    assert!(session.begin_state_vector().is_ok());
}

#[tokio::test]
async fn test_dropped_call_releases_session() {
    let mut session = Session::new(Arc::new(HungBackend));

    let timed_out = tokio::time::timeout(Duration::from_millis(50), session.run_simulation()).await;
    assert!(timed_out.is_err());
    assert!(!session.is_busy());
    assert_eq!(
        messages(&mut session),
        vec![(Level::Warning, "Request cancelled".to_string())]
    );

    let timed_out =
        tokio::time::timeout(Duration::from_millis(50), session.get_state_vector()).await;
    assert!(timed_out.is_err());
    assert!(session.begin_state_vector().is_ok());
}

#[test]
fn test_abandon_without_request_is_silent() {
    let (_, mut session) = session();
    session.abandon_request();
    assert!(session.notifications().is_empty());
}

#[test]
fn test_results_are_checked_against_the_request_sent() {
    let (_, mut session) = session();

    session.begin_simulation().unwrap();
    session.set_shots(2048).unwrap();
    session.complete_simulation(Ok(bell_counts(800, 224))).unwrap();
    assert!(session.result_violations().is_empty());

    session.begin_simulation().unwrap();
    session.set_shots(1024).unwrap();
    session.complete_simulation(Ok(bell_counts(800, 224))).unwrap();
    assert_eq!(
        session.result_violations(),
        [ResultViolation::ShotMismatch {
            requested: 2048,
            reported: 1024,
        }]
    );

    session.begin_state_vector().unwrap();
    session.set_num_qubits(3).unwrap();
    session
        .complete_state_vector(Ok(bell_state_vector()))
        .unwrap();
    assert!(
        session
            .result_violations()
            .contains(&ResultViolation::StateCount { expected: 4, got: 2 })
    );
    assert!(
        !session
            .result_violations()
            .iter()
            .any(|v| matches!(v, ResultViolation::MalformedState(_)))
    );
}

#[test]
fn test_last_response_wins() {
    let (_, mut session) = session();

    session.begin_simulation().unwrap();
    session.complete_simulation(Ok(bell_counts(800, 224))).unwrap();
    session.begin_simulation().unwrap();
    session.complete_simulation(Ok(bell_counts(500, 524))).unwrap();

    assert_eq!(session.simulation(), Some(&bell_counts(500, 524)));
}

#[tokio::test]
async fn test_state_vector_switches_pane_and_exports_verbatim() {
    let (backend, mut session) = session();
    backend.push_state_vector(Ok(bell_state_vector()));

    session.get_state_vector().await.unwrap();
    assert_eq!(session.pane(), Pane::StateVector);

    let dir = tempfile::tempdir().unwrap();
    let path = session.export_state_vector(dir.path()).unwrap().unwrap();
    assert_eq!(path.file_name().unwrap(), "state_vector.json");

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n  \"state_vector\": ["));
    let exported: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(exported["state_vector"].as_array().unwrap().len(), 2);
    assert_eq!(exported, serde_json::to_value(bell_state_vector()).unwrap());

    assert_eq!(
        messages(&mut session),
        vec![
            (Level::Success, "State vector computed!".to_string()),
            (Level::Success, "State vector exported!".to_string()),
        ]
    );
}

#[test]
fn test_export_without_state_vector_is_noop() {
    let (_, mut session) = session();
    let dir = tempfile::tempdir().unwrap();
    assert!(session.export_state_vector(dir.path()).unwrap().is_none());
    assert!(!dir.path().join("state_vector.json").exists());
    assert!(session.notifications().is_empty());
}

#[tokio::test]
async fn test_reset_clears_results() {
    let (backend, mut session) = session();
    backend.push_simulation(Ok(bell_counts(800, 224)));
    backend.push_state_vector(Ok(bell_state_vector()));
    session.run_simulation().await.unwrap();
    session.get_state_vector().await.unwrap();
    session.set_num_qubits(3).unwrap();
    session.add_gate(GateKind::H);

    session.reset();

    assert_eq!(session.circuit().gates(), Circuit::default_gates().as_slice());
    assert_eq!(session.circuit().num_qubits(), 3);
    assert!(session.simulation().is_none());
    assert!(session.state_vector().is_none());
    assert_eq!(session.pane(), Pane::Circuit);
    assert_eq!(
        session.notifications().last().unwrap().message,
        "Circuit reset"
    );
}

#[tokio::test]
async fn test_save_images_skips_undecodable_payloads() {
    let (backend, mut session) = session();
    let mut result = bell_counts(800, 224);
    result.histogram = "%%%".into();
    backend.push_simulation(Ok(result));
    backend.push_state_vector(Ok(bell_state_vector()));
    session.run_simulation().await.unwrap();
    session.get_state_vector().await.unwrap();
    session.drain_notifications();

    let dir = tempfile::tempdir().unwrap();
    let written = session.save_images(dir.path()).unwrap();

    assert_eq!(written.len(), 2);
    assert!(dir.path().join("circuit_diagram.png").exists());
    assert!(dir.path().join("bloch_sphere_0.png").exists());
    assert!(!dir.path().join("histogram.png").exists());

    let notes = messages(&mut session);
    assert_eq!(notes[0].0, Level::Warning);
    assert!(notes[0].1.contains("histogram.png"));
    assert_eq!(notes[1].0, Level::Success);
}

#[tokio::test]
async fn test_save_images_reports_progress_before_io_failure() {
    let (backend, mut session) = session();
    let mut result = bell_counts(800, 224);
    result.histogram = "%%%".into();
    backend.push_simulation(Ok(result));
    backend.push_state_vector(Ok(bell_state_vector()));
    session.run_simulation().await.unwrap();
    session.get_state_vector().await.unwrap();
    session.drain_notifications();

    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("bloch_sphere_0.png")).unwrap();

    let err = session.save_images(dir.path()).unwrap_err();
    assert!(matches!(err, SessionError::Io { .. }));
    assert!(dir.path().join("circuit_diagram.png").exists());

    let notes = messages(&mut session);
    let levels: Vec<Level> = notes.iter().map(|(level, _)| *level).collect();
    assert_eq!(levels, [Level::Warning, Level::Success, Level::Error]);
    assert!(notes[0].1.contains("histogram.png"));
    assert!(notes[1].1.starts_with("Saved 1 image(s)"));
}
