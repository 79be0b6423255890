//! Dataset loading, merging and filtering
//!
//! - `tables`: row types of the six source CSV files
//! - `record`: the merged `SalesRecord`
//! - `loader`: `EcommerceDataLoader` and the join pipeline
//! - `filter`: year/month/status and date-window selection

pub mod filter;
pub mod loader;
pub mod record;
pub mod tables;
pub mod timestamp;

pub use filter::{DEFAULT_STATUS, DateWindow, ReportPeriod, SalesFilter, filter_by_date_range};
pub use loader::{EcommerceDataLoader, date_bounds, load_and_process_data, merge_tables};
pub use record::SalesRecord;
pub use tables::{RawTables, TableKind};
