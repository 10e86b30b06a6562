//! CLI command handlers.
//!
//! The tool has a single command; its arguments live in [`RepackArgs`].

pub mod common;
pub mod repack;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use repack::RepackArgs;
