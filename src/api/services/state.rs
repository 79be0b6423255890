//! Shared application state for the dashboard handlers.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::charts::ChartSize;
use crate::config::StaticConfig;
use crate::data::ReportPeriod;
use crate::errors::Result;
use crate::services::{Report, ReportService};

/// `?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeriodQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl PeriodQuery {
    /// Empty form fields count as missing
    fn field(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn start(&self) -> Option<&str> {
        Self::field(&self.start_date)
    }

    pub fn end(&self) -> Option<&str> {
        Self::field(&self.end_date)
    }
}

/// Dataset plus dashboard settings, loaded once at startup and shared read-only
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub reports: ReportService,
    pub default_range: (NaiveDate, NaiveDate),
    pub top_categories: usize,
    pub chart_size: ChartSize,
}

impl DashboardState {
    pub fn new(reports: ReportService, config: &StaticConfig) -> Self {
        Self {
            reports,
            default_range: (
                config.dashboard.default_start,
                config.dashboard.default_end,
            ),
            top_categories: config.dashboard.top_categories,
            chart_size: ChartSize::from(&config.charts),
        }
    }

    pub fn period(&self, query: &PeriodQuery) -> Result<ReportPeriod> {
        self.reports
            .resolve_period(query.start(), query.end(), self.default_range)
    }

    /// Resolve the query and build the report for it
    pub fn report(&self, query: &PeriodQuery) -> Result<(ReportPeriod, Report)> {
        let period = self.period(query)?;
        let report = self.reports.report_for_period(&period);
        Ok((period, report))
    }
}
