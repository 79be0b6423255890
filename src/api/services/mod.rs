pub mod charts;
pub mod dashboard;
pub mod error_code;
pub mod health;
pub mod helpers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use charts::ChartService;
pub use dashboard::DashboardService;
pub use error_code::ErrorCode;
pub use health::{AppStartTime, HealthService, health_routes};
pub use helpers::{ApiResponse, api_result, error_from_salesboard};
pub use metrics::MetricsService;
pub use routes::{api_v1_routes, configure_routes};
pub use state::{DashboardState, PeriodQuery};
