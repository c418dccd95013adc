//! Simulate command implementation.

use anyhow::Result;
use console::style;

use qlab_session::Session;

use super::common::{build_backend, build_circuit, finish_remote_call, spinner};
use crate::config::ClientConfig;
use crate::render::render_results;

/// Execute the simulate command.
pub async fn execute(
    config: &ClientConfig,
    gates: &[String],
    qubits: Option<u32>,
    shots: Option<u32>,
    save_images: bool,
) -> Result<()> {
    let circuit = build_circuit(
        gates,
        qubits.unwrap_or(config.defaults.qubits),
        shots.unwrap_or(config.defaults.shots),
    )?;

    println!(
        "{} Simulating {} on {}",
        style("→").cyan().bold(),
        style(circuit.summary()).green(),
        style(&config.backend.url).yellow()
    );
    for gate in circuit.gates() {
        println!("  {gate}");
    }

    let mut session = Session::with_circuit(build_backend(config)?, circuit);

    let progress = spinner("Simulating...");
    let outcome = session.run_simulation().await;
    progress.finish_and_clear();
    finish_remote_call(&mut session, outcome)?;

    print!("{}", render_results(&session));

    if save_images {
        let written = session.save_images(&config.output.directory)?;
        finish_remote_call(&mut session, Ok(()))?;
        for path in written {
            println!("  {}", style(path.display()).dim());
        }
    }

    Ok(())
}
