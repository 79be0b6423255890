//! Row selection over the merged sales table.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use super::record::SalesRecord;
use crate::errors::{Result, SalesboardError};

/// Order status kept by default
pub const DEFAULT_STATUS: &str = "delivered";

/// Equality filter on year, month and order status.
///
/// A `None` criterion matches everything; a null field in a record never
/// matches a present criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub status: Option<String>,
}

impl Default for SalesFilter {
    fn default() -> Self {
        Self {
            year: None,
            month: None,
            status: Some(DEFAULT_STATUS.to_string()),
        }
    }
}

impl SalesFilter {
    /// A filter that keeps every row
    pub fn all() -> Self {
        Self {
            year: None,
            month: None,
            status: None,
        }
    }

    pub fn with_year(mut self, year: impl Into<Option<i32>>) -> Self {
        self.year = year.into();
        self
    }

    pub fn with_month(mut self, month: impl Into<Option<u32>>) -> Self {
        self.month = month.into();
        self
    }

    pub fn with_status<S: Into<String>>(mut self, status: Option<S>) -> Self {
        self.status = status.map(Into::into);
        self
    }

    pub fn matches(&self, record: &SalesRecord) -> bool {
        if let Some(year) = self.year
            && record.purchase_year != Some(year)
        {
            return false;
        }
        if let Some(month) = self.month
            && record.purchase_month != Some(month)
        {
            return false;
        }
        match &self.status {
            Some(status) => record.has_status(status),
            None => true,
        }
    }

    pub fn apply(&self, records: &[SalesRecord]) -> Vec<SalesRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Rows purchased within `[start 00:00:00, end 23:59:59]` with the given status
pub fn filter_by_date_range(
    records: &[SalesRecord],
    start: NaiveDate,
    end: NaiveDate,
    status: Option<&str>,
) -> Vec<SalesRecord> {
    let window = DateWindow::new(start, end);
    records
        .iter()
        .filter(|r| window.contains_record(r))
        .filter(|r| status.is_none_or(|s| r.has_status(s)))
        .cloned()
        .collect()
}

/// Inclusive date window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn start_datetime(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Last second of the end day
    pub fn end_datetime(&self) -> NaiveDateTime {
        self.end
            .and_hms_opt(23, 59, 59)
            .unwrap_or_else(|| self.end.and_time(NaiveTime::MIN))
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start_datetime() && ts <= self.end_datetime()
    }

    fn contains_record(&self, record: &SalesRecord) -> bool {
        record
            .order_purchase_timestamp
            .is_some_and(|ts| self.contains(ts))
    }

    /// Same window one year earlier. Feb 29 maps to Feb 28.
    pub fn previous_year(&self) -> Option<Self> {
        let one_year = Months::new(12);
        Some(Self {
            start: self.start.checked_sub_months(one_year)?,
            end: self.end.checked_sub_months(one_year)?,
        })
    }

    /// Clamp both ends into `[lo, hi]`
    pub fn clamp_to(&self, lo: NaiveDate, hi: NaiveDate) -> Self {
        if lo > hi {
            return *self;
        }
        let start = self.start.clamp(lo, hi);
        let end = self.end.clamp(lo, hi).max(start);
        Self { start, end }
    }
}

/// Current window plus the comparison window a year earlier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    pub current: DateWindow,
    pub comparison: DateWindow,
    pub current_year: i32,
    pub comparison_year: i32,
}

impl ReportPeriod {
    pub fn from_range(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(SalesboardError::validation(format!(
                "start_date {} is after end_date {}",
                start, end
            )));
        }
        let current = DateWindow::new(start, end);
        let comparison = current.previous_year().ok_or_else(|| {
            SalesboardError::invalid_date_range(format!(
                "no comparison period before {}",
                start
            ))
        })?;
        let current_year = end.year();
        Ok(Self {
            current,
            comparison,
            current_year,
            comparison_year: current_year - 1,
        })
    }

    /// Full calendar year compared with the previous one
    pub fn for_year(year: i32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1);
        let end = NaiveDate::from_ymd_opt(year, 12, 31);
        match (start, end) {
            (Some(start), Some(end)) => Self::from_range(start, end),
            _ => Err(SalesboardError::invalid_date_range(format!(
                "year {} is out of range",
                year
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::fixtures::{purchased, record};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<SalesRecord> {
        let mut canceled = purchased(record("o3", 30.0), "2023-03-01 10:00:00");
        canceled.order_status = Some("canceled".to_string());
        vec![
            purchased(record("o1", 10.0), "2023-01-15 10:00:00"),
            purchased(record("o2", 20.0), "2022-01-20 10:00:00"),
            canceled,
            record("o4", 40.0),
        ]
    }

    #[test]
    fn test_default_filter_keeps_delivered() {
        let rows = SalesFilter::default().apply(&sample());
        let ids: Vec<_> = rows.iter().map(|r| r.order_id.as_str()).collect();
        assert_eq!(ids, vec!["o1", "o2", "o4"]);
    }

    #[test]
    fn test_year_and_month_criteria() {
        let filter = SalesFilter::all().with_year(2023).with_month(3);
        let rows = filter.apply(&sample());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].order_id, "o3");

        // null purchase year never matches a present year
        let rows = SalesFilter::default().with_year(2023).apply(&sample());
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_all_keeps_everything() {
        assert_eq!(SalesFilter::all().apply(&sample()).len(), 4);
    }

    #[test]
    fn test_date_range_end_day_inclusive() {
        let rows = filter_by_date_range(
            &sample(),
            date(2023, 1, 1),
            date(2023, 1, 15),
            Some(DEFAULT_STATUS),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].order_id, "o1");

        let rows = filter_by_date_range(&sample(), date(2023, 1, 1), date(2023, 12, 31), None);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_report_period_from_range() {
        let period = ReportPeriod::from_range(date(2023, 1, 1), date(2023, 12, 31)).unwrap();
        assert_eq!(period.current_year, 2023);
        assert_eq!(period.comparison_year, 2022);
        assert_eq!(period.comparison.start, date(2022, 1, 1));
        assert_eq!(period.comparison.end, date(2022, 12, 31));
    }

    #[test]
    fn test_leap_day_maps_to_feb_28() {
        let period = ReportPeriod::from_range(date(2024, 2, 29), date(2024, 3, 31)).unwrap();
        assert_eq!(period.comparison.start, date(2023, 2, 28));
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = ReportPeriod::from_range(date(2023, 5, 1), date(2023, 1, 1)).unwrap_err();
        assert!(matches!(err, SalesboardError::Validation(_)));
    }

    #[test]
    fn test_clamp_to_bounds() {
        let window = DateWindow::new(date(2015, 1, 1), date(2030, 1, 1));
        let clamped = window.clamp_to(date(2022, 1, 1), date(2023, 12, 31));
        assert_eq!(clamped, DateWindow::new(date(2022, 1, 1), date(2023, 12, 31)));
    }
}
