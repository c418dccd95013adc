//! Qlab Command-Line Interface
//!
//! Compose small quantum circuits in the terminal and run them on a
//! remote simulation service.
//!
//! ```text
//!   q0 ──[H]──●──
//!             │
//!   q1 ──────[X]─     qlab · quantum entanglement lab
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

use commands::{ping, repl, simulate, state_vector, version};
use config::ClientConfig;

/// qlab - compose quantum circuits and run them on a simulation service
#[derive(Parser)]
#[command(name = "qlab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ~/.qlab/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Repl,

    /// Run a measurement simulation and print the counts
    Simulate {
        /// Gate as kind:target or kind:control:target (repeatable; default H q0, CX q0 → q1)
        #[arg(short, long = "gate")]
        gates: Vec<String>,

        /// Number of qubits (2, 3, 4)
        #[arg(short, long)]
        qubits: Option<u32>,

        /// Number of shots (512, 1024, 2048, 4096)
        #[arg(short, long)]
        shots: Option<u32>,

        /// Write the circuit diagram and histogram to the output directory
        #[arg(long)]
        save_images: bool,
    },

    /// Compute the state vector and print the amplitudes
    StateVector {
        /// Gate as kind:target or kind:control:target (repeatable; default H q0, CX q0 → q1)
        #[arg(short, long = "gate")]
        gates: Vec<String>,

        /// Number of qubits (2, 3, 4)
        #[arg(short, long)]
        qubits: Option<u32>,

        /// Write state_vector.json to the output directory
        #[arg(short, long)]
        export: bool,

        /// Write the Bloch sphere images to the output directory
        #[arg(long)]
        save_images: bool,
    },

    /// Check that the simulation service answers
    Ping,

    /// Show version information
    Version,
}

fn log_filter(verbose: u8, configured: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::new(level)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Configuration comes first since it carries the log level
    let config = ClientConfig::load(cli.config.as_deref());
    let configured_level = config
        .as_ref()
        .map_or("warn", |c| c.logging.level.as_str())
        .to_string();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, &configured_level))
        .with_target(false)
        .init();

    // Execute command
    let result = match config {
        Err(e) => Err(e.into()),
        Ok(config) => match cli.command.unwrap_or(Commands::Repl) {
            Commands::Repl => repl::execute(&config).await,

            Commands::Simulate {
                gates,
                qubits,
                shots,
                save_images,
            } => simulate::execute(&config, &gates, qubits, shots, save_images).await,

            Commands::StateVector {
                gates,
                qubits,
                export,
                save_images,
            } => state_vector::execute(&config, &gates, qubits, export, save_images).await,

            Commands::Ping => ping::execute(&config).await,

            Commands::Version => {
                version::execute();
                Ok(())
            }
        },
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
