//! Shared helpers for data-backed commands

use colored::Colorize;
use tracing::info;

use crate::config::StaticConfig;
use crate::data::load_and_process_data;
use crate::interfaces::cli::CliError;
use crate::services::ReportService;

/// Load the CSVs from `data.data_dir` and wrap them in a report service
pub fn load_reports(
    config: &StaticConfig,
    status: Option<String>,
) -> Result<ReportService, CliError> {
    let data_dir = &config.data.data_dir;
    eprintln!("{} {}", "Loading data from".dimmed(), data_dir.blue());

    let (_, records) = load_and_process_data(data_dir)?;
    info!("Loaded {} merged rows from {}", records.len(), data_dir);

    Ok(ReportService::new(records, status))
}

/// `year` defaults to the configured dashboard year, comparison to `year - 1`
pub fn resolve_years(
    config: &StaticConfig,
    year: Option<i32>,
    comparison_year: Option<i32>,
) -> (i32, i32) {
    let year = year.unwrap_or_else(|| config.dashboard.default_year());
    (year, comparison_year.unwrap_or(year - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_years_defaults() {
        let config = StaticConfig::default();
        assert_eq!(resolve_years(&config, None, None), (2023, 2022));
        assert_eq!(resolve_years(&config, Some(2018), None), (2018, 2017));
        assert_eq!(resolve_years(&config, Some(2018), Some(2016)), (2018, 2016));
    }
}
