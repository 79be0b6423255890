//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod charts;
mod config_gen;
mod export;
mod helpers;
mod summary;

pub use charts::render_charts;
pub use config_gen::config_generate;
pub use export::export_dataset;
pub use helpers::{load_reports, resolve_years};
pub use summary::print_summary;
