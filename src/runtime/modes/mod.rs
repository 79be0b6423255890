//! Mode routing
//!
//! This module provides unified entry points for different execution modes:
//! - Server mode (dashboard HTTP server)
//! - CLI mode (summary, charts, export, config)
//!
//! The mode selection is based on the parsed subcommand.

pub mod server;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export mode functions for convenience
pub use server::run_server;

#[cfg(feature = "cli")]
pub use cli::run_cli;

#[cfg(feature = "cli")]
use crate::cli::Commands;

/// Mode detection result
#[derive(Debug, PartialEq)]
pub enum Mode {
    Server,
    #[cfg(feature = "cli")]
    Cli,
}

/// Detect which mode to run based on the parsed subcommand
///
/// No subcommand or `serve` -> Server mode, anything else -> CLI mode
#[cfg(feature = "cli")]
pub fn detect_mode(command: Option<&Commands>) -> Mode {
    match command {
        None | Some(Commands::Serve { .. }) => Mode::Server,
        Some(_) => Mode::Cli,
    }
}
