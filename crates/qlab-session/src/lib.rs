//! Qlab Session
//!
//! The session owns everything a user interacts with: the circuit being
//! edited, the most recent result of each remote operation, the active
//! display pane and a queue of notifications. Remote calls go through a
//! [`qlab_hal::SimulationBackend`].
//!
//! # Pane transitions
//!
//! | Event | Pane |
//! |-------|------|
//! | start | `circuit` |
//! | tab selection | any |
//! | simulation succeeded | `results` |
//! | state vector succeeded | `statevector` |
//! | reset | `circuit` |
//!
//! Failed calls change neither the pane nor the stored results; they queue
//! an error notification carrying the backend's message when it sent one.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use qlab_adapter_http::HttpBackend;
//! use qlab_ir::GateKind;
//! use qlab_session::{Pane, Session};
//!
//! let backend = Arc::new(HttpBackend::new("http://localhost:8000")?);
//! let mut session = Session::new(backend);
//! session.add_gate(GateKind::X);
//! session.run_simulation().await?;
//! assert_eq!(session.pane(), Pane::Results);
//! ```

pub mod display;
pub mod error;
pub mod export;
pub mod notification;
pub mod pane;
pub mod session;

pub use display::{AmplitudeRow, CountRow, format_amplitude, percentage};
pub use error::{SessionError, SessionResult};
pub use notification::{Level, Notification};
pub use pane::Pane;
pub use session::Session;
