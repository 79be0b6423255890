//! Console summary command

use colored::Colorize;

use super::helpers::{load_reports, resolve_years};
use crate::analytics::format_metrics_summary;
use crate::config::StaticConfig;
use crate::interfaces::cli::CliError;
use crate::utils::format::{format_count, month_abbr};

pub fn print_summary(
    config: &StaticConfig,
    year: Option<i32>,
    comparison_year: Option<i32>,
    month: Option<u32>,
    status: Option<String>,
) -> Result<(), CliError> {
    let (year, comparison_year) = resolve_years(config, year, comparison_year);
    let reports = load_reports(config, status)?;
    let report = reports.report_for_years(year, comparison_year, month);

    let scope = match month {
        Some(m) => format!("{} {} vs {} {}", month_abbr(m), year, month_abbr(m), comparison_year),
        None => format!("{} vs {}", year, comparison_year),
    };
    eprintln!(
        "{} {} ({} rows, status: {})",
        "Analysing".dimmed(),
        scope.cyan(),
        format_count(report.current_rows),
        reports.status().unwrap_or("all")
    );

    if report.is_empty() {
        println!(
            "{} No orders found for {}",
            "ℹ".bold().blue(),
            scope
        );
        return Ok(());
    }

    let summary = format_metrics_summary(&report.revenue, &report.delivery)
        .map_err(|e| CliError::CommandError(format!("Failed to format summary: {}", e)))?;
    println!();
    print!("{}", summary);
    Ok(())
}
