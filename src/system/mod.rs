//! System-level modules
//!
//! Process-wide setup that runs once before any mode starts.

pub mod logging;

pub use logging::init_logging;
