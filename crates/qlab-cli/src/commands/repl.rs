//! Interactive session.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qlab_ir::{Circuit, GateKind, OperandField, QubitId};
use qlab_session::{Pane, Session};

use super::common::{build_backend, format_notification, print_notifications, spinner};
use crate::config::ClientConfig;
use crate::render::{render_pane, render_session};

const HELP: &str = "\
Commands:
  add <gate>                      append h, x, y, z, cx, cz or swap
  set <index> <target|control> <q> change a gate operand
  rm <index>                      remove a gate
  qubits <n>                      set qubit count (2, 3, 4)
  shots <n>                       set shot count (512, 1024, 2048, 4096)
  run                             run the measurement simulation
  sv                              compute the state vector
  export                          write state_vector.json
  save                            write the returned images
  tab <circuit|results|statevector>
  show                            redraw the active pane
  reset                           restore the default circuit
  help                            this text
  quit                            leave";

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Add(GateKind),
    Set {
        index: usize,
        field: OperandField,
        value: String,
    },
    Remove(usize),
    Qubits(u32),
    Shots(u32),
    Run,
    StateVector,
    Export,
    Save,
    Tab(Pane),
    Show,
    Reset,
    Help,
    Quit,
}

impl ReplCommand {
    /// Parse a line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&head, args)) = words.split_first() else {
            return Ok(None);
        };

        let command = match (head.to_ascii_lowercase().as_str(), args) {
            ("add", [kind]) => ReplCommand::Add(kind.parse()?),
            ("set", [index, field, value]) => ReplCommand::Set {
                index: parse_index(index)?,
                field: field.parse()?,
                value: (*value).to_string(),
            },
            ("rm" | "remove", [index]) => ReplCommand::Remove(parse_index(index)?),
            ("qubits", [n]) => ReplCommand::Qubits(parse_number(n)?),
            ("shots", [n]) => ReplCommand::Shots(parse_number(n)?),
            ("run", []) => ReplCommand::Run,
            ("sv" | "statevector", []) => ReplCommand::StateVector,
            ("export", []) => ReplCommand::Export,
            ("save", []) => ReplCommand::Save,
            ("tab", [pane]) => {
                ReplCommand::Tab(pane.parse().map_err(|e: String| anyhow::anyhow!(e))?)
            }
            ("show", []) => ReplCommand::Show,
            ("reset", []) => ReplCommand::Reset,
            ("help" | "?", []) => ReplCommand::Help,
            ("quit" | "exit" | "q", []) => ReplCommand::Quit,
            (other, _) => anyhow::bail!("Unknown command or wrong arguments: '{other}'. Type `help`."),
        };
        Ok(Some(command))
    }
}

fn parse_index(raw: &str) -> Result<usize> {
    raw.parse()
        .map_err(|_| anyhow::anyhow!("Invalid gate index '{raw}'"))
}

fn parse_number(raw: &str) -> Result<u32> {
    raw.parse()
        .map_err(|_| anyhow::anyhow!("Invalid number '{raw}'"))
}

/// Refuse operand values the qubit selector would not offer.
fn check_selectable(circuit: &Circuit, raw: &str) -> Result<()> {
    let choices = circuit.qubit_choices();
    let offered = raw
        .trim()
        .parse::<u32>()
        .is_ok_and(|q| choices.contains(&QubitId(q)));
    if !offered {
        anyhow::bail!(
            "Qubit must be one of {}",
            choices
                .iter()
                .map(|q| q.0.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(())
}

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply one command to the session, printing whatever it produced.
pub async fn apply(session: &mut Session, output_dir: &Path, command: ReplCommand) -> Result<Flow> {
    match command {
        ReplCommand::Add(kind) => {
            session.add_gate(kind);
        }
        ReplCommand::Set {
            index,
            field,
            value,
        } => {
            check_selectable(session.circuit(), &value)?;
            session.update_gate_operand(index, field, &value)?;
        }
        ReplCommand::Remove(index) => {
            session.remove_gate(index)?;
        }
        ReplCommand::Qubits(n) => session.set_num_qubits(n)?,
        ReplCommand::Shots(n) => session.set_shots(n)?,
        ReplCommand::Run => {
            let progress = spinner("Simulating...");
            let outcome = session.run_simulation().await;
            progress.finish_and_clear();
            print_notifications(session);
            if outcome.is_ok() {
                print!("{}", render_session(session));
            }
            return Ok(Flow::Continue);
        }
        ReplCommand::StateVector => {
            let progress = spinner("Computing state vector...");
            let outcome = session.get_state_vector().await;
            progress.finish_and_clear();
            print_notifications(session);
            if outcome.is_ok() {
                print!("{}", render_session(session));
            }
            return Ok(Flow::Continue);
        }
        ReplCommand::Export => {
            if session.export_state_vector(output_dir)?.is_none() {
                println!("{}", style("No state vector to export; run `sv` first").dim());
            }
        }
        ReplCommand::Save => {
            let written = session.save_images(output_dir)?;
            for path in written {
                println!("  {}", style(path.display()).dim());
            }
        }
        ReplCommand::Tab(pane) => {
            session.select_pane(pane);
            print!("{}", render_session(session));
        }
        ReplCommand::Show => print!("{}", render_pane(session, session.pane())),
        ReplCommand::Reset => session.reset(),
        ReplCommand::Help => println!("{HELP}"),
        ReplCommand::Quit => return Ok(Flow::Quit),
    }

    print_notifications(session);
    Ok(Flow::Continue)
}

/// Execute the repl command.
pub async fn execute(config: &ClientConfig) -> Result<()> {
    let backend = build_backend(config)?;
    let circuit = Circuit::with_config(config.defaults.qubits, config.defaults.shots)?;
    let mut session = Session::with_circuit(backend, circuit);

    println!(
        "{} connected to {} ({})",
        style("qlab").cyan().bold(),
        style(&config.backend.url).yellow(),
        style("type `help` for commands").dim()
    );
    print!("{}", render_session(&session));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", style("qlab>").cyan());
        io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("Failed to read input")?;

        let command = match ReplCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{} {}", style("Error:").red().bold(), e);
                continue;
            }
        };

        match apply(&mut session, &config.output.directory, command).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                // Refused edits still leave a usable session.
                for notification in session.drain_notifications() {
                    println!("{}", format_notification(&notification));
                }
                eprintln!("{} {}", style("Error:").red().bold(), e);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use qlab_adapter_http::HttpBackend;

    fn session() -> Session {
        let backend = HttpBackend::new("http://127.0.0.1:9").unwrap();
        Session::new(Arc::new(backend))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            ReplCommand::parse("add CX").unwrap(),
            Some(ReplCommand::Add(GateKind::CX))
        );
        assert_eq!(
            ReplCommand::parse("  set 1 control 2 ").unwrap(),
            Some(ReplCommand::Set {
                index: 1,
                field: OperandField::Control,
                value: "2".into()
            })
        );
        assert_eq!(
            ReplCommand::parse("tab sv").unwrap(),
            Some(ReplCommand::Tab(Pane::StateVector))
        );
        assert_eq!(ReplCommand::parse("rm 0").unwrap(), Some(ReplCommand::Remove(0)));
        assert_eq!(ReplCommand::parse("quit").unwrap(), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_rejects_bad_lines() {
        assert!(ReplCommand::parse("add toffoli").is_err());
        assert!(ReplCommand::parse("set 0 middle 1").is_err());
        assert!(ReplCommand::parse("rm -1").is_err());
        assert!(ReplCommand::parse("run now").is_err());
        assert!(ReplCommand::parse("teleport").is_err());
    }

    #[test]
    fn test_selector_bounds() {
        let mut circuit = Circuit::new();
        assert!(check_selectable(&circuit, "1").is_ok());
        assert!(check_selectable(&circuit, "2").is_err());
        circuit.set_num_qubits(4).unwrap();
        assert!(check_selectable(&circuit, "3").is_ok());
        assert!(check_selectable(&circuit, "q3").is_err());
    }

    #[tokio::test]
    async fn test_apply_edits() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session();

        let flow = apply(&mut session, dir.path(), ReplCommand::Add(GateKind::Y))
            .await
            .unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(session.circuit().len(), 3);

        let refused = apply(
            &mut session,
            dir.path(),
            ReplCommand::Set {
                index: 2,
                field: OperandField::Target,
                value: "5".into(),
            },
        )
        .await;
        assert!(refused.is_err());
        assert_eq!(session.circuit().gate(2).unwrap().target(), QubitId(0));

        apply(&mut session, dir.path(), ReplCommand::Reset).await.unwrap();
        assert_eq!(session.circuit().len(), 2);
        assert_eq!(
            apply(&mut session, dir.path(), ReplCommand::Quit).await.unwrap(),
            Flow::Quit
        );
    }

    #[tokio::test]
    async fn test_export_without_state_vector() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session();
        apply(&mut session, dir.path(), ReplCommand::Export)
            .await
            .unwrap();
        assert!(!dir.path().join("state_vector.json").exists());
    }
}
