use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;

const SECONDS_PER_DAY: i64 = 86_400;

/// One order item line of the merged analytic table.
///
/// Fields filled by a left join are `None` when the join found no match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    pub order_id: String,
    pub order_item_id: u32,
    pub product_id: String,
    pub price: f64,
    pub freight_value: f64,
    pub customer_id: Option<String>,
    pub order_status: Option<String>,
    pub order_purchase_timestamp: Option<NaiveDateTime>,
    pub order_delivered_customer_date: Option<NaiveDateTime>,
    pub product_category_name: Option<String>,
    pub customer_state: Option<String>,
    pub customer_city: Option<String>,
    pub review_score: Option<u8>,
    pub purchase_year: Option<i32>,
    pub purchase_month: Option<u32>,
    pub delivery_days: Option<i64>,
}

impl SalesRecord {
    /// Fill `purchase_year`, `purchase_month` and `delivery_days` from the timestamps
    pub fn derive_time_columns(&mut self) {
        self.purchase_year = self.order_purchase_timestamp.map(|ts| ts.year());
        self.purchase_month = self.order_purchase_timestamp.map(|ts| ts.month());
        self.delivery_days = match (
            self.order_purchase_timestamp,
            self.order_delivered_customer_date,
        ) {
            (Some(purchased), Some(delivered)) => Some(whole_days(delivered - purchased)),
            _ => None,
        };
    }

    pub fn has_status(&self, status: &str) -> bool {
        self.order_status.as_deref() == Some(status)
    }
}

/// Whole days of a duration, floored (-1h counts as -1 day)
fn whole_days(duration: chrono::Duration) -> i64 {
    duration.num_seconds().div_euclid(SECONDS_PER_DAY)
}
