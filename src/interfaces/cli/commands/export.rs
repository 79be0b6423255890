//! Export the merged dataset to CSV

use colored::Colorize;
use tracing::info;

use crate::config::StaticConfig;
use crate::data::{EcommerceDataLoader, SalesFilter};
use crate::interfaces::cli::CliError;
use crate::utils::csv_handler::{export_to_csv, generate_export_filename};
use crate::utils::format::format_count;

pub fn export_dataset(
    config: &StaticConfig,
    file_path: Option<String>,
    year: Option<i32>,
    month: Option<u32>,
    status: Option<String>,
) -> Result<(), CliError> {
    let path = file_path.unwrap_or_else(generate_export_filename);
    let filter = SalesFilter::all()
        .with_year(year)
        .with_month(month)
        .with_status(status);

    let mut loader = EcommerceDataLoader::new(&config.data.data_dir);
    let records = loader.create_sales_dataset(&filter)?;
    info!("Exporting {} rows with {:?}", records.len(), filter);

    export_to_csv(&records, &path)?;

    println!(
        "{} Exported {} rows to {}",
        "✓".bold().green(),
        format_count(records.len()).green(),
        path.blue()
    );
    Ok(())
}
