//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for salesboard using clap's derive macros.

use clap::{Parser, Subcommand};

/// Salesboard - E-commerce sales analytics and dashboard
#[derive(Parser)]
#[command(name = "salesboard")]
#[command(version)]
#[command(about = "E-commerce sales analytics and dashboard", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    /// Override the directory holding the CSV files
    #[arg(long, short = 'd', global = true)]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the dashboard server (default when no command is given)
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Bind port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the KPI summary to the console
    Summary {
        /// Analysis year (default: dashboard.default_end year)
        #[arg(long)]
        year: Option<i32>,

        /// Comparison year (default: year - 1)
        #[arg(long)]
        comparison_year: Option<i32>,

        /// Restrict both years to one month
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Order status to keep (default: data.default_status)
        #[arg(long, conflicts_with = "all_statuses")]
        status: Option<String>,

        /// Keep orders of every status
        #[arg(long)]
        all_statuses: bool,
    },

    /// Render every chart to SVG files
    Charts {
        /// Analysis year
        #[arg(long)]
        year: Option<i32>,

        /// Comparison year (default: year - 1)
        #[arg(long)]
        comparison_year: Option<i32>,

        /// Output directory (default: charts.output_dir)
        #[arg(long, short = 'o')]
        output: Option<String>,
    },

    /// Export the merged dataset to CSV
    Export {
        /// Output file path (default: sales_export_<timestamp>.csv)
        file_path: Option<String>,

        /// Keep only this purchase year
        #[arg(long)]
        year: Option<i32>,

        /// Keep only this purchase month
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Order status to keep (default: data.default_status)
        #[arg(long, conflicts_with = "all_statuses")]
        status: Option<String>,

        /// Keep orders of every status
        #[arg(long)]
        all_statuses: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Resolve `--status` / `--all-statuses` against the configured default
pub fn resolve_status(
    status: Option<String>,
    all_statuses: bool,
    default: Option<String>,
) -> Option<String> {
    if all_statuses {
        None
    } else {
        status.or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary() {
        let cli = Cli::try_parse_from([
            "salesboard",
            "-c",
            "custom.toml",
            "summary",
            "--year",
            "2023",
            "--month",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        match cli.command {
            Some(Commands::Summary { year, month, .. }) => {
                assert_eq!(year, Some(2023));
                assert_eq!(month, Some(3));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_month_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["salesboard", "summary", "--month", "13"]).is_err());
    }

    #[test]
    fn test_status_conflicts_with_all_statuses() {
        assert!(
            Cli::try_parse_from([
                "salesboard",
                "export",
                "--status",
                "shipped",
                "--all-statuses"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_resolve_status() {
        let default = Some("delivered".to_string());
        assert_eq!(
            resolve_status(None, false, default.clone()).as_deref(),
            Some("delivered")
        );
        assert_eq!(
            resolve_status(Some("shipped".to_string()), false, default.clone()).as_deref(),
            Some("shipped")
        );
        assert_eq!(resolve_status(None, true, default), None);
    }
}
