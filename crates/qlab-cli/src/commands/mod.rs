//! CLI command implementations.

pub mod common;
pub mod ping;
pub mod repl;
pub mod simulate;
pub mod state_vector;
pub mod version;
