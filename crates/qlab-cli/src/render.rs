//! Text rendering of the three panes.

use std::fmt::Write as _;

use console::style;

use qlab_ir::Circuit;
use qlab_session::display::{amplitude_rows, bar_cells, count_rows};
use qlab_session::{Pane, Session};

/// Width of probability bars, in cells.
const BAR_WIDTH: usize = 40;

/// Maximum number of measurement outcomes listed.
const MAX_ROWS: usize = 16;

/// Render whichever pane is active, preceded by the tab strip.
pub fn render_session(session: &Session) -> String {
    let mut out = render_tabs(session.pane());
    out.push('\n');
    out.push_str(&render_pane(session, session.pane()));
    out
}

/// Tab strip with the active pane highlighted.
pub fn render_tabs(active: Pane) -> String {
    Pane::ALL
        .iter()
        .map(|&pane| {
            if pane == active {
                style(format!("[{}]", pane.title())).cyan().bold().to_string()
            } else {
                style(format!(" {} ", pane.title())).dim().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render one pane.
pub fn render_pane(session: &Session, pane: Pane) -> String {
    match pane {
        Pane::Circuit => render_circuit(session.circuit()),
        Pane::Results => render_results(session),
        Pane::StateVector => render_state_vector(session),
    }
}

/// Header badge and the numbered gate list.
pub fn render_circuit(circuit: &Circuit) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        style(circuit.summary()).yellow(),
        style(format!("({} gates)", circuit.len())).dim()
    );

    if circuit.is_empty() {
        let _ = writeln!(out, "  {}", style("No gates. Use `add <gate>`.").dim());
        return out;
    }

    for (index, gate) in circuit.gates().iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {}", index, gate);
    }

    let report = circuit.validate();
    for issue in report.issues() {
        let _ = writeln!(out, "  {} {}", style("!").yellow().bold(), issue);
    }
    out
}

/// Measurement table of the stored simulation.
pub fn render_results(session: &Session) -> String {
    let Some(result) = session.simulation() else {
        return format!("  {}\n", style("Run simulation to see results").dim());
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} Results ({} shots):",
        style("✓").green().bold(),
        result.total_shots
    );

    let rows = count_rows(result);
    for row in rows.iter().take(MAX_ROWS) {
        let bar = "█".repeat(bar_cells(row.fraction, BAR_WIDTH));
        let _ = writeln!(
            out,
            "  {}: {:>6} ({:>6}) {}",
            style(&row.state).cyan(),
            row.count,
            row.percent(),
            style(bar).green()
        );
    }
    if rows.len() > MAX_ROWS {
        let _ = writeln!(out, "  ... and {} more outcomes", rows.len() - MAX_ROWS);
    }
    out
}

/// Amplitude table of the stored state vector.
pub fn render_state_vector(session: &Session) -> String {
    let Some(result) = session.state_vector() else {
        return format!("  {}\n", style("Compute state vector to see amplitudes").dim());
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<8} {:<20} {:<10} {}",
        style("State").bold(),
        style("Amplitude").bold(),
        style("Magnitude").bold(),
        style("Probability").bold()
    );
    for row in amplitude_rows(&result.state_vector) {
        let bar = "█".repeat(bar_cells(row.probability, BAR_WIDTH / 2));
        let _ = writeln!(
            out,
            "  {:<8} {:<20} {:<10} {:>6} {}",
            style(&row.ket).cyan(),
            row.amplitude,
            row.magnitude,
            row.percent(),
            style(bar).cyan()
        );
    }

    let spheres = result.bloch_spheres().len();
    if spheres > 0 {
        let _ = writeln!(
            out,
            "  {}",
            style(format!("{spheres} Bloch sphere image(s); use `save` to write them")).dim()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use qlab_adapter_http::HttpBackend;
    use qlab_hal::SimulationResult;
    use qlab_ir::{GateKind, OperandField};

    fn session() -> Session {
        let backend = HttpBackend::new("http://127.0.0.1:9").unwrap();
        Session::new(Arc::new(backend))
    }

    #[test]
    fn test_render_circuit_lists_gates() {
        console::set_colors_enabled(false);
        let text = render_circuit(&Circuit::new());
        assert!(text.starts_with("2 Qubits • 1024 Shots (2 gates)"));
        assert!(text.contains(" 0. H q0"));
        assert!(text.contains(" 1. CX q0 → q1"));
    }

    #[test]
    fn test_render_circuit_flags_problems() {
        console::set_colors_enabled(false);
        let mut circuit = Circuit::new();
        circuit
            .update_gate_operand(1, OperandField::Target, "0")
            .unwrap();
        let text = render_circuit(&circuit);
        assert!(text.contains("control and target are both q0"));
    }

    #[test]
    fn test_empty_panes_show_hints() {
        console::set_colors_enabled(false);
        let session = session();
        assert!(render_results(&session).contains("Run simulation to see results"));
        assert!(render_state_vector(&session).contains("Compute state vector"));
    }

    #[test]
    fn test_render_results_percentages() {
        console::set_colors_enabled(false);
        let mut session = session();
        session.begin_simulation().unwrap();
        session
            .complete_simulation(Ok(SimulationResult {
                circuit_diagram: String::new(),
                histogram: String::new(),
                counts: BTreeMap::from([("00".to_string(), 800), ("11".to_string(), 224)]),
                total_shots: 1024,
            }))
            .unwrap();

        let text = render_session(&session);
        assert!(text.contains("[Results]"));
        assert!(text.contains("00:    800 ( 78.1%)"));
        assert!(text.contains("11:    224 ( 21.9%)"));
    }

    #[test]
    fn test_tabs_follow_selection() {
        console::set_colors_enabled(false);
        let mut session = session();
        session.add_gate(GateKind::Z);
        session.select_pane(Pane::StateVector);
        assert_eq!(
            render_tabs(session.pane()),
            " Circuit   Results  [State Vector]"
        );
    }
}
