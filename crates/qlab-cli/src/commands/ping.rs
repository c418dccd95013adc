//! Ping command implementation.

use anyhow::Result;
use console::style;

use qlab_hal::SimulationBackend;

use super::common::{build_backend, spinner};
use crate::config::ClientConfig;

/// Execute the ping command.
pub async fn execute(config: &ClientConfig) -> Result<()> {
    let backend = build_backend(config)?;

    let progress = spinner(format!("Contacting {}...", backend.base_url()));
    let outcome = backend.ping().await;
    progress.finish_and_clear();

    match outcome {
        Ok(banner) => {
            println!(
                "  {} {} {}",
                style("●").green(),
                style(backend.base_url()).bold(),
                style(banner).dim()
            );
            Ok(())
        }
        Err(e) => {
            println!(
                "  {} {}",
                style("○").red(),
                style(backend.base_url()).bold()
            );
            Err(anyhow::anyhow!("Backend unreachable: {e}"))
        }
    }
}
