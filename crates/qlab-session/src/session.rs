//! The interactive session: one circuit, its latest results and the pane
//! that is showing.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use qlab_hal::{
    HalResult, ResultViolation, SimulateRequest, SimulationBackend, SimulationResult,
    StateVectorRequest, StateVectorResult,
};
use qlab_ir::{Circuit, Gate, GateKind, OperandField};

use crate::error::{SessionError, SessionResult};
use crate::export;
use crate::notification::{Level, Notification};
use crate::pane::Pane;

/// Message shown when a failed simulation carried no detail.
pub const SIMULATION_FAILED: &str = "Simulation failed";

/// Message shown when a failed state-vector call carried no detail.
pub const STATE_VECTOR_FAILED: &str = "State vector computation failed";

/// Tolerance used when checking returned amplitudes.
const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Configuration a request was sent with, kept until its response is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    num_qubits: u32,
    shots: u32,
}

impl InFlight {
    fn of(circuit: &Circuit) -> Self {
        Self {
            num_qubits: circuit.num_qubits(),
            shots: circuit.shots(),
        }
    }
}

/// Session state.
///
/// Everything the user sees is owned here and mutated through `&mut self`.
/// Remote calls are split into `begin_*` and `complete_*` so a UI can
/// release the session while the request is in flight; [`Session::run_simulation`]
/// and [`Session::get_state_vector`] do both halves in one call.
pub struct Session {
    backend: Arc<dyn SimulationBackend>,
    circuit: Circuit,
    simulation: Option<SimulationResult>,
    state_vector: Option<StateVectorResult>,
    pane: Pane,
    in_flight: Option<InFlight>,
    violations: Vec<ResultViolation>,
    notifications: Vec<Notification>,
}

/// Releases the session's in-flight slot if a remote call future is
/// dropped before its response is applied.
struct PendingCall<'a> {
    session: &'a mut Session,
}

impl Drop for PendingCall<'_> {
    fn drop(&mut self) {
        self.session.abandon_request();
    }
}

impl Session {
    /// Create a session with the default circuit.
    pub fn new(backend: Arc<dyn SimulationBackend>) -> Self {
        Self::with_circuit(backend, Circuit::new())
    }

    /// Create a session around an existing circuit.
    pub fn with_circuit(backend: Arc<dyn SimulationBackend>, circuit: Circuit) -> Self {
        Self {
            backend,
            circuit,
            simulation: None,
            state_vector: None,
            pane: Pane::Circuit,
            in_flight: None,
            violations: Vec::new(),
            notifications: Vec::new(),
        }
    }

    /// The backend requests are sent to.
    pub fn backend(&self) -> &Arc<dyn SimulationBackend> {
        &self.backend
    }

    /// The circuit being edited.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Latest successful simulation, if any.
    pub fn simulation(&self) -> Option<&SimulationResult> {
        self.simulation.as_ref()
    }

    /// Latest successful state-vector computation, if any.
    pub fn state_vector(&self) -> Option<&StateVectorResult> {
        self.state_vector.as_ref()
    }

    /// Active pane.
    pub fn pane(&self) -> Pane {
        self.pane
    }

    /// Check if a remote call is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Contract problems found in the most recently applied result.
    pub fn result_violations(&self) -> &[ResultViolation] {
        &self.violations
    }

    /// Pending notifications, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Take all pending notifications.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, notification: Notification) {
        match notification.level {
            Level::Success | Level::Info => info!("{}", notification.message),
            Level::Warning | Level::Error => warn!("{}", notification.message),
        }
        self.notifications.push(notification);
    }

    /// Queue one warning per structural problem in the circuit.
    fn report_validation(&mut self) {
        let issues = self.circuit.validate();
        for issue in issues {
            self.notify(Notification::warning(issue.to_string()));
        }
    }

    // ---------------------------------------------------------------------
    // Circuit editing
    // ---------------------------------------------------------------------

    /// Change the register size. Existing operands are not clamped; any
    /// that fall outside the new register are reported as warnings.
    pub fn set_num_qubits(&mut self, num_qubits: u32) -> SessionResult<()> {
        self.circuit.set_num_qubits(num_qubits)?;
        debug!("Register resized to {} qubits", num_qubits);
        self.report_validation();
        Ok(())
    }

    /// Change the shot count.
    pub fn set_shots(&mut self, shots: u32) -> SessionResult<()> {
        self.circuit.set_shots(shots)?;
        debug!("Shot count set to {}", shots);
        Ok(())
    }

    /// Append a gate with default operands.
    pub fn add_gate(&mut self, kind: GateKind) -> usize {
        let index = self.circuit.add_gate(kind);
        self.notify(Notification::success(format!("Added {} gate", kind.label())));
        index
    }

    /// Set an operand of the gate at `index` from user text.
    pub fn update_gate_operand(
        &mut self,
        index: usize,
        field: OperandField,
        raw: &str,
    ) -> SessionResult<()> {
        self.circuit.update_gate_operand(index, field, raw)?;
        self.report_validation();
        Ok(())
    }

    /// Remove the gate at `index`.
    pub fn remove_gate(&mut self, index: usize) -> SessionResult<Gate> {
        let gate = self.circuit.remove_gate(index)?;
        self.notify(Notification::info("Gate removed"));
        Ok(gate)
    }

    /// Restore the default gates, drop both results and return to the
    /// circuit pane.
    pub fn reset(&mut self) {
        self.circuit.reset();
        self.simulation = None;
        self.state_vector = None;
        self.violations.clear();
        self.pane = Pane::Circuit;
        self.notify(Notification::info("Circuit reset"));
    }

    /// Switch panes. Always allowed.
    pub fn select_pane(&mut self, pane: Pane) {
        self.pane = pane;
    }

    // ---------------------------------------------------------------------
    // Remote calls
    // ---------------------------------------------------------------------

    fn begin(&mut self) -> SessionResult<()> {
        if self.in_flight.is_some() {
            self.notify(Notification::warning("A request is already in progress"));
            return Err(SessionError::Busy);
        }
        if self.circuit.is_empty() {
            self.notify(Notification::warning("Add at least one gate first"));
            return Err(SessionError::EmptyCircuit);
        }
        self.report_validation();
        self.in_flight = Some(InFlight::of(&self.circuit));
        Ok(())
    }

    /// Give up on the outstanding request so a new one may be issued.
    ///
    /// A response that still arrives later can be applied with
    /// `complete_*`; it is then checked against the current circuit.
    pub fn abandon_request(&mut self) {
        if self.in_flight.take().is_some() {
            self.notify(Notification::warning("Request cancelled"));
        }
    }

    /// Check preconditions, mark the session busy and snapshot the request.
    ///
    /// Fails with [`SessionError::Busy`] while another call is outstanding
    /// and with [`SessionError::EmptyCircuit`] when there is nothing to send.
    pub fn begin_simulation(&mut self) -> SessionResult<SimulateRequest> {
        self.begin()?;
        Ok(SimulateRequest::from_circuit(&self.circuit))
    }

    /// Apply the outcome of a simulation call and clear the busy flag.
    ///
    /// On failure the stored result and the pane are left as they were.
    pub fn complete_simulation(
        &mut self,
        outcome: HalResult<SimulationResult>,
    ) -> SessionResult<()> {
        let sent = self
            .in_flight
            .take()
            .unwrap_or_else(|| InFlight::of(&self.circuit));
        match outcome {
            Ok(result) => {
                self.violations = result.violations(sent.shots);
                for violation in &self.violations {
                    warn!("Simulation result: {}", violation);
                }
                self.simulation = Some(result);
                self.pane = Pane::Results;
                self.notify(Notification::success("Simulation completed!"));
                Ok(())
            }
            Err(err) => {
                let message = err.detail().unwrap_or(SIMULATION_FAILED).to_string();
                debug!("Simulation failed: {}", err);
                self.notify(Notification::error(message));
                Err(err.into())
            }
        }
    }

    /// Snapshot the request for a state-vector call; same preconditions as
    /// [`Session::begin_simulation`].
    pub fn begin_state_vector(&mut self) -> SessionResult<StateVectorRequest> {
        self.begin()?;
        Ok(StateVectorRequest::from_circuit(&self.circuit))
    }

    /// Apply the outcome of a state-vector call and clear the busy flag.
    pub fn complete_state_vector(
        &mut self,
        outcome: HalResult<StateVectorResult>,
    ) -> SessionResult<()> {
        let sent = self
            .in_flight
            .take()
            .unwrap_or_else(|| InFlight::of(&self.circuit));
        match outcome {
            Ok(result) => {
                self.violations = result.violations(sent.num_qubits, PROBABILITY_TOLERANCE);
                for violation in &self.violations {
                    debug!("State vector result: {}", violation);
                }
                self.state_vector = Some(result);
                self.pane = Pane::StateVector;
                self.notify(Notification::success("State vector computed!"));
                Ok(())
            }
            Err(err) => {
                let message = err.detail().unwrap_or(STATE_VECTOR_FAILED).to_string();
                debug!("State vector computation failed: {}", err);
                self.notify(Notification::error(message));
                Err(err.into())
            }
        }
    }

    /// Run a measurement simulation of the current circuit.
    ///
    /// Dropping the returned future before it resolves abandons the request.
    pub async fn run_simulation(&mut self) -> SessionResult<()> {
        let request = self.begin_simulation()?;
        let backend = Arc::clone(&self.backend);
        let call = PendingCall { session: self };
        let outcome = backend.simulate(&request).await;
        call.session.complete_simulation(outcome)
    }

    /// Compute the state vector of the current circuit.
    ///
    /// Dropping the returned future before it resolves abandons the request.
    pub async fn get_state_vector(&mut self) -> SessionResult<()> {
        let request = self.begin_state_vector()?;
        let backend = Arc::clone(&self.backend);
        let call = PendingCall { session: self };
        let outcome = backend.state_vector(&request).await;
        call.session.complete_state_vector(outcome)
    }

    // ---------------------------------------------------------------------
    // Artifacts
    // ---------------------------------------------------------------------

    /// Write the stored state vector to `dir/state_vector.json`.
    ///
    /// Returns `Ok(None)` without touching the filesystem when no state
    /// vector is stored.
    pub fn export_state_vector(&mut self, dir: &Path) -> SessionResult<Option<PathBuf>> {
        let Some(result) = &self.state_vector else {
            return Ok(None);
        };
        match export::write_state_vector(dir, result) {
            Ok(path) => {
                self.notify(Notification::success("State vector exported!"));
                Ok(Some(path))
            }
            Err(err) => {
                self.notify(Notification::error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Write every stored image into `dir`.
    ///
    /// Images that fail to decode are skipped with a warning; the rest are
    /// still written. An IO failure stops at the failing file, after the
    /// notices for what was already skipped or written are queued.
    pub fn save_images(&mut self, dir: &Path) -> SessionResult<Vec<PathBuf>> {
        let mut written = Vec::new();
        let mut skipped = Vec::new();
        let mut failure = None;
        {
            let mut artifacts = Vec::new();
            if let Some(result) = &self.simulation {
                artifacts.extend(export::simulation_images(result));
            }
            if let Some(result) = &self.state_vector {
                artifacts.extend(export::bloch_images(result));
            }

            for artifact in &artifacts {
                match export::write_image(dir, artifact) {
                    Ok(path) => written.push(path),
                    Err(err @ SessionError::Image { .. }) => skipped.push(err.to_string()),
                    Err(err) => {
                        failure = Some(err);
                        break;
                    }
                }
            }
        }

        for message in skipped {
            self.notify(Notification::warning(message));
        }
        if !written.is_empty() {
            self.notify(Notification::success(format!(
                "Saved {} image(s) to {}",
                written.len(),
                dir.display()
            )));
        }
        if let Some(err) = failure {
            self.notify(Notification::error(err.to_string()));
            return Err(err);
        }
        Ok(written)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("backend", &self.backend.name())
            .field("circuit", &self.circuit)
            .field("pane", &self.pane)
            .field("busy", &self.is_busy())
            .field("has_simulation", &self.simulation.is_some())
            .field("has_state_vector", &self.state_vector.is_some())
            .finish_non_exhaustive()
    }
}
