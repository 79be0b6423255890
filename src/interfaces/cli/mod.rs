//! CLI interface module
//!
//! This module provides command-line interface functionality for salesboard.

pub mod commands;

use crate::cli::{Commands, ConfigCommands};
use crate::config::get_config;
use crate::errors::SalesboardError;
use commands::{config_generate, export_dataset, render_charts, print_summary};
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    DataError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::DataError(msg) => format!("Data error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::DataError(msg) => {
                format!("{} {}", "Data error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<SalesboardError> for CliError {
    fn from(err: SalesboardError) -> Self {
        match err {
            SalesboardError::CsvParse(_)
            | SalesboardError::MissingTable(_)
            | SalesboardError::FileOperation(_) => CliError::DataError(err.to_string()),
            SalesboardError::Validation(_) | SalesboardError::InvalidDateRange(_) => {
                CliError::ParseError(err.to_string())
            }
            _ => CliError::CommandError(err.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
///
/// `serve` is dispatched by the runtime, not here.
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    let config = get_config();

    match cmd {
        Commands::Summary {
            year,
            comparison_year,
            month,
            status,
            all_statuses,
        } => {
            let status = crate::cli::resolve_status(
                status,
                all_statuses,
                config.data.status_filter(),
            );
            print_summary(&config, year, comparison_year, month, status)
        }

        Commands::Charts {
            year,
            comparison_year,
            output,
        } => render_charts(&config, year, comparison_year, output),

        Commands::Export {
            file_path,
            year,
            month,
            status,
            all_statuses,
        } => {
            let status = crate::cli::resolve_status(
                status,
                all_statuses,
                config.data.status_filter(),
            );
            export_dataset(&config, file_path, year, month, status)
        }

        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force).await,

        Commands::Serve { .. } => Err(CliError::CommandError(
            "serve is handled by the server runtime".to_string(),
        )),
    }
}
