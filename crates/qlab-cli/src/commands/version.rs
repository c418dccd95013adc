//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Quantum circuit composer for a remote simulation service",
        style("qlab").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qlab-ir             Circuit model and validation");
    println!("  qlab-hal            Simulation backend abstraction");
    println!("  qlab-adapter-http   REST client for the simulation service");
    println!("  qlab-session        Session state and request orchestration");
    println!("  qlab-cli            Command-line interface");
    println!();
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
