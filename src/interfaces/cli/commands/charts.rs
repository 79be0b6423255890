//! Render all charts to SVG files

use colored::Colorize;

use super::helpers::{load_reports, resolve_years};
use crate::charts::{ChartSize, render_all_charts};
use crate::config::StaticConfig;
use crate::interfaces::cli::CliError;

pub fn render_charts(
    config: &StaticConfig,
    year: Option<i32>,
    comparison_year: Option<i32>,
    output: Option<String>,
) -> Result<(), CliError> {
    let (year, comparison_year) = resolve_years(config, year, comparison_year);
    let output_dir = output.unwrap_or_else(|| config.charts.output_dir.clone());

    let reports = load_reports(config, config.data.status_filter())?;
    let report = reports.report_for_years(year, comparison_year, None);
    let data = report.chart_data(config.dashboard.top_categories);

    let written = render_all_charts(&data, ChartSize::from(&config.charts), &output_dir)?;

    println!("{}", "Charts written:".bold().green());
    for path in &written {
        println!("  {}", path.display().to_string().blue());
    }
    println!();
    println!(
        "{} {} charts for {} vs {}",
        "ℹ".bold().blue(),
        written.len().to_string().green(),
        year,
        comparison_year
    );
    Ok(())
}
