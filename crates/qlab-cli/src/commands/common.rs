//! Shared helpers for CLI commands.

use std::sync::Arc;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qlab_adapter_http::HttpBackend;
use qlab_ir::{Circuit, Gate, GateKind, OperandField, QubitId};
use qlab_session::{Level, Notification, Session, SessionError};

use crate::config::ClientConfig;

/// Connect the HTTP backend described by `config`.
pub fn build_backend(config: &ClientConfig) -> Result<Arc<HttpBackend>> {
    let backend = HttpBackend::with_settings(&config.backend.url, &config.http_settings())
        .with_context(|| format!("Failed to configure backend at {}", config.backend.url))?;
    Ok(Arc::new(backend))
}

/// Parse a gate given as `kind:target` or `kind:control:target`,
/// e.g. `h:0` or `cx:0:1`.
pub fn parse_gate_spec(spec: &str) -> Result<Gate> {
    let mut parts = spec.split(':');
    let kind: GateKind = parts.next().unwrap_or_default().parse()?;
    let operands = parts
        .map(|p| {
            p.trim()
                .parse::<u32>()
                .map(QubitId)
                .map_err(|_| anyhow::anyhow!("Invalid qubit index '{p}' in gate '{spec}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut gate = kind.with_default_operands();
    match (gate.control().is_some(), operands.as_slice()) {
        (false, [target]) => gate.set_operand(OperandField::Target, *target)?,
        (true, [control, target]) => {
            gate.set_operand(OperandField::Control, *control)?;
            gate.set_operand(OperandField::Target, *target)?;
        }
        _ => anyhow::bail!(
            "Gate '{spec}' needs {} qubit index(es): {}",
            kind.num_qubits(),
            if kind.is_two_qubit() {
                format!("{}:<control>:<target>", kind.name())
            } else {
                format!("{}:<target>", kind.name())
            }
        ),
    }
    Ok(gate)
}

/// Build the circuit for a one-shot command. No gate specs means the
/// default circuit.
pub fn build_circuit(specs: &[String], qubits: u32, shots: u32) -> Result<Circuit> {
    let circuit = if specs.is_empty() {
        Circuit::with_config(qubits, shots)?
    } else {
        let gates = specs
            .iter()
            .map(|s| parse_gate_spec(s))
            .collect::<Result<Vec<_>>>()?;
        Circuit::from_gates(qubits, shots, gates)?
    };
    Ok(circuit)
}

/// Spinner shown while a remote call is outstanding.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

/// Format a notification for the terminal.
pub fn format_notification(notification: &Notification) -> String {
    let marker = match notification.level {
        Level::Success => style("✓").green().bold(),
        Level::Info => style("•").cyan().bold(),
        Level::Warning => style("!").yellow().bold(),
        Level::Error => style("✗").red().bold(),
    };
    format!("{} {}", marker, notification.message)
}

/// Print and clear the session's notifications.
pub fn print_notifications(session: &mut Session) {
    for notification in session.drain_notifications() {
        println!("{}", format_notification(&notification));
    }
}

/// Print pending notifications for a one-shot command and turn a failed
/// remote call into the command's error, using the message the user was
/// shown.
pub fn finish_remote_call(session: &mut Session, outcome: Result<(), SessionError>) -> Result<()> {
    let notifications = session.drain_notifications();
    let error_message = notifications
        .iter()
        .rev()
        .find(|n| n.level == Level::Error)
        .map(|n| n.message.clone());

    for notification in notifications.iter().filter(|n| n.level != Level::Error) {
        println!("{}", format_notification(notification));
    }

    match outcome {
        Ok(()) => Ok(()),
        Err(err) => match error_message {
            Some(message) => Err(anyhow::anyhow!(message)),
            None => Err(err.into()),
        },
    }
}
