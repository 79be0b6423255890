//! Report service layer
//!
//! Builds the full set of metrics for a reporting period from the processed
//! dataset. Shared by the dashboard handlers and the CLI commands.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::analytics::{
    CategoryRevenue, DeliveryMetrics, MonthlyRevenue, ReviewScoreShare, RevenueMetrics,
    StateMetrics, average_mom_growth, calculate_delivery_metrics, calculate_geographic_metrics,
    calculate_monthly_revenue, calculate_product_metrics, calculate_revenue_metrics,
    calculate_review_distribution, pct_change,
};
use crate::charts::ChartData;
use crate::data::{
    DateWindow, ReportPeriod, SalesFilter, SalesRecord, date_bounds, filter_by_date_range,
};
use crate::errors::{Result, SalesboardError};

/// Every aggregate for one current/comparison pair
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub current_year: i32,
    pub comparison_year: i32,
    pub revenue: RevenueMetrics,
    pub monthly_current: Vec<MonthlyRevenue>,
    pub monthly_comparison: Vec<MonthlyRevenue>,
    pub categories: Vec<CategoryRevenue>,
    pub states: Vec<StateMetrics>,
    pub delivery: DeliveryMetrics,
    pub delivery_comparison: DeliveryMetrics,
    pub reviews: Vec<ReviewScoreShare>,
    pub current_rows: usize,
    pub comparison_rows: usize,
}

impl Report {
    pub fn build(
        current: &[SalesRecord],
        comparison: &[SalesRecord],
        current_year: i32,
        comparison_year: i32,
    ) -> Self {
        Self {
            current_year,
            comparison_year,
            revenue: calculate_revenue_metrics(current, comparison, current_year, comparison_year),
            monthly_current: calculate_monthly_revenue(current),
            monthly_comparison: calculate_monthly_revenue(comparison),
            categories: calculate_product_metrics(current),
            states: calculate_geographic_metrics(current),
            delivery: calculate_delivery_metrics(current),
            delivery_comparison: calculate_delivery_metrics(comparison),
            reviews: calculate_review_distribution(current),
            current_rows: current.len(),
            comparison_rows: comparison.len(),
        }
    }

    /// No rows in the current period
    pub fn is_empty(&self) -> bool {
        self.current_rows == 0
    }

    pub fn average_mom_growth(&self) -> Option<f64> {
        average_mom_growth(&self.monthly_current)
    }

    pub fn delivery_days_trend(&self) -> Option<f64> {
        pct_change(
            self.delivery.avg_delivery_days?,
            self.delivery_comparison.avg_delivery_days?,
        )
    }

    pub fn review_score_trend(&self) -> Option<f64> {
        pct_change(
            self.delivery.avg_review_score?,
            self.delivery_comparison.avg_review_score?,
        )
    }

    pub fn chart_data(&self, top_categories: usize) -> ChartData<'_> {
        ChartData {
            current_year: self.current_year,
            comparison_year: self.comparison_year,
            monthly_current: &self.monthly_current,
            monthly_comparison: &self.monthly_comparison,
            categories: &self.categories,
            states: &self.states,
            reviews: &self.reviews,
            delivery: &self.delivery,
            top_categories,
        }
    }
}

/// Read-only access to the processed dataset
#[derive(Debug, Clone)]
pub struct ReportService {
    records: Arc<Vec<SalesRecord>>,
    status: Option<String>,
}

impl ReportService {
    /// `status` is the order status kept by every report (`None` keeps all)
    pub fn new(records: Arc<Vec<SalesRecord>>, status: Option<String>) -> Self {
        Self { records, status }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// First and last purchase dates in the dataset
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        date_bounds(&self.records).map(|(lo, hi)| (lo.date(), hi.date()))
    }

    /// Metrics for a date window and the same window a year earlier
    pub fn report_for_period(&self, period: &ReportPeriod) -> Report {
        let status = self.status();
        let current = filter_by_date_range(
            &self.records,
            period.current.start,
            period.current.end,
            status,
        );
        let comparison = filter_by_date_range(
            &self.records,
            period.comparison.start,
            period.comparison.end,
            status,
        );
        debug!(
            "report_for_period {:?}: {} current rows, {} comparison rows",
            period,
            current.len(),
            comparison.len()
        );
        Report::build(
            &current,
            &comparison,
            period.current_year,
            period.comparison_year,
        )
    }

    /// Metrics for two calendar years, optionally restricted to one month
    pub fn report_for_years(
        &self,
        current_year: i32,
        comparison_year: i32,
        month: Option<u32>,
    ) -> Report {
        let filter = SalesFilter::all()
            .with_status(self.status.clone())
            .with_month(month);
        let current = filter.clone().with_year(current_year).apply(&self.records);
        let comparison = filter.with_year(comparison_year).apply(&self.records);
        debug!(
            "report_for_years {} vs {}: {} current rows, {} comparison rows",
            current_year,
            comparison_year,
            current.len(),
            comparison.len()
        );
        Report::build(&current, &comparison, current_year, comparison_year)
    }

    /// Resolve optional `YYYY-MM-DD` query values into a report period.
    ///
    /// Missing values fall back to `defaults`. A range that overlaps the
    /// dataset is clamped to the dataset's bounds.
    pub fn resolve_period(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
        defaults: (NaiveDate, NaiveDate),
    ) -> Result<ReportPeriod> {
        let start = match start_date {
            Some(s) => parse_date_strict("start_date", s)?,
            None => defaults.0,
        };
        let end = match end_date {
            Some(e) => parse_date_strict("end_date", e)?,
            None => defaults.1,
        };
        if start > end {
            return Err(SalesboardError::invalid_date_range(
                "Start date must not be later than end date",
            ));
        }

        let mut window = DateWindow::new(start, end);
        if let Some((lo, hi)) = self.bounds()
            && start <= hi
            && end >= lo
        {
            window = window.clamp_to(lo, hi);
        }
        ReportPeriod::from_range(window.start, window.end)
    }
}

fn parse_date_strict(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        SalesboardError::invalid_date_range(format!(
            "Invalid {} format: '{}'. Expected YYYY-MM-DD",
            field, value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::fixtures::{purchased, record};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service() -> ReportService {
        let mut canceled = purchased(record("x", 500.0), "2023-05-01 10:00:00");
        canceled.order_status = Some("canceled".to_string());
        let records = vec![
            purchased(record("a", 100.0), "2023-01-10 10:00:00"),
            purchased(record("b", 200.0), "2023-02-10 10:00:00"),
            purchased(record("c", 150.0), "2022-01-10 10:00:00"),
            canceled,
        ];
        ReportService::new(Arc::new(records), Some("delivered".to_string()))
    }

    #[test]
    fn test_report_for_period() {
        let svc = service();
        let period = ReportPeriod::from_range(date(2023, 1, 1), date(2023, 12, 31)).unwrap();
        let report = svc.report_for_period(&period);
        assert_eq!(report.current_rows, 2);
        assert_eq!(report.comparison_rows, 1);
        assert_eq!(report.revenue.total_revenue_current, 300.0);
        assert_eq!(report.revenue.revenue_growth_pct, Some(100.0));
        assert_eq!(report.monthly_current.len(), 2);
        assert!(!report.is_empty());
    }

    #[test]
    fn test_report_for_years_with_month() {
        let report = service().report_for_years(2023, 2022, Some(1));
        assert_eq!(report.revenue.total_revenue_current, 100.0);
        assert_eq!(report.revenue.total_revenue_previous, 150.0);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(
            service().bounds(),
            Some((date(2022, 1, 10), date(2023, 5, 1)))
        );
    }

    #[test]
    fn test_resolve_period_defaults_and_clamp() {
        let svc = service();
        let period = svc
            .resolve_period(None, None, (date(2023, 1, 1), date(2023, 12, 31)))
            .unwrap();
        assert_eq!(period.current.start, date(2023, 1, 1));
        assert_eq!(period.current.end, date(2023, 5, 1));
        assert_eq!(period.comparison_year, 2022);
    }

    #[test]
    fn test_resolve_period_rejects_bad_input() {
        let svc = service();
        let defaults = (date(2023, 1, 1), date(2023, 12, 31));
        assert!(matches!(
            svc.resolve_period(Some("2023/01/01"), None, defaults),
            Err(SalesboardError::InvalidDateRange(_))
        ));
        assert!(matches!(
            svc.resolve_period(Some("2023-06-01"), Some("2023-01-01"), defaults),
            Err(SalesboardError::InvalidDateRange(_))
        ));
    }

    #[test]
    fn test_empty_window() {
        let svc = service();
        let defaults = (date(2023, 1, 1), date(2023, 12, 31));
        let period = svc
            .resolve_period(Some("2030-01-01"), Some("2030-12-31"), defaults)
            .unwrap();
        assert!(svc.report_for_period(&period).is_empty());
    }
}
