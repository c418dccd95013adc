//! State-vector command implementation.

use anyhow::Result;
use console::style;

use qlab_session::Session;

use super::common::{build_backend, build_circuit, finish_remote_call, spinner};
use crate::config::ClientConfig;
use crate::render::render_state_vector;

/// Execute the state-vector command.
pub async fn execute(
    config: &ClientConfig,
    gates: &[String],
    qubits: Option<u32>,
    export: bool,
    save_images: bool,
) -> Result<()> {
    let circuit = build_circuit(
        gates,
        qubits.unwrap_or(config.defaults.qubits),
        config.defaults.shots,
    )?;

    println!(
        "{} Computing state vector of {} qubits on {}",
        style("→").cyan().bold(),
        circuit.num_qubits(),
        style(&config.backend.url).yellow()
    );
    for gate in circuit.gates() {
        println!("  {gate}");
    }

    let mut session = Session::with_circuit(build_backend(config)?, circuit);

    let progress = spinner("Computing state vector...");
    let outcome = session.get_state_vector().await;
    progress.finish_and_clear();
    finish_remote_call(&mut session, outcome)?;

    print!("{}", render_state_vector(&session));

    if export {
        let path = session.export_state_vector(&config.output.directory)?;
        finish_remote_call(&mut session, Ok(()))?;
        if let Some(path) = path {
            println!("  {}", style(path.display()).dim());
        }
    }
    if save_images {
        let written = session.save_images(&config.output.directory)?;
        finish_remote_call(&mut session, Ok(()))?;
        for path in written {
            println!("  {}", style(path.display()).dim());
        }
    }

    Ok(())
}
