//! Revenue KPIs and monthly trend.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::{distinct_orders, mean, round_to};
use crate::data::SalesRecord;

/// Year-over-year revenue KPIs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueMetrics {
    pub current_year: i32,
    pub comparison_year: i32,
    pub total_revenue_current: f64,
    pub total_revenue_previous: f64,
    pub revenue_growth_pct: Option<f64>,
    pub total_orders_current: usize,
    pub total_orders_previous: usize,
    pub order_growth_pct: Option<f64>,
    pub aov_current: Option<f64>,
    pub aov_previous: Option<f64>,
    pub aov_growth_pct: Option<f64>,
}

/// One month of revenue with its month-over-month change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    pub month: u32,
    pub revenue: f64,
    pub mom_growth_pct: Option<f64>,
}

/// `(new - old) / old * 100`, rounded to 2 places; `None` when `old` is 0
pub fn pct_change(new: f64, old: f64) -> Option<f64> {
    if old == 0.0 || !old.is_finite() {
        return None;
    }
    Some(round_to((new - old) / old * 100.0, 2))
}

fn opt_pct_change(new: Option<f64>, old: Option<f64>) -> Option<f64> {
    pct_change(new?, old?)
}

fn total_revenue(sales: &[SalesRecord]) -> f64 {
    sales.iter().map(|r| r.price).sum()
}

/// Mean of per-order revenue
fn average_order_value(sales: &[SalesRecord]) -> Option<f64> {
    let mut per_order: HashMap<&str, f64> = HashMap::new();
    for r in sales {
        *per_order.entry(r.order_id.as_str()).or_default() += r.price;
    }
    mean(per_order.into_values()).map(|v| round_to(v, 2))
}

pub fn calculate_revenue_metrics(
    current: &[SalesRecord],
    comparison: &[SalesRecord],
    current_year: i32,
    comparison_year: i32,
) -> RevenueMetrics {
    let revenue_current = total_revenue(current);
    let revenue_previous = total_revenue(comparison);
    let orders_current = distinct_orders(current);
    let orders_previous = distinct_orders(comparison);
    let aov_current = average_order_value(current);
    let aov_previous = average_order_value(comparison);

    RevenueMetrics {
        current_year,
        comparison_year,
        total_revenue_current: round_to(revenue_current, 2),
        total_revenue_previous: round_to(revenue_previous, 2),
        revenue_growth_pct: pct_change(revenue_current, revenue_previous),
        total_orders_current: orders_current,
        total_orders_previous: orders_previous,
        order_growth_pct: pct_change(orders_current as f64, orders_previous as f64),
        aov_current,
        aov_previous,
        aov_growth_pct: opt_pct_change(aov_current, aov_previous),
    }
}

/// Revenue per purchase month, ascending, with MoM growth.
///
/// Rows without a purchase month are skipped.
pub fn calculate_monthly_revenue(sales: &[SalesRecord]) -> Vec<MonthlyRevenue> {
    let mut by_month: BTreeMap<u32, f64> = BTreeMap::new();
    for r in sales {
        if let Some(month) = r.purchase_month {
            *by_month.entry(month).or_default() += r.price;
        }
    }

    let mut previous: Option<f64> = None;
    by_month
        .into_iter()
        .map(|(month, revenue)| {
            let mom_growth_pct = previous.and_then(|prev| pct_change(revenue, prev));
            previous = Some(revenue);
            MonthlyRevenue {
                month,
                revenue: round_to(revenue, 2),
                mom_growth_pct,
            }
        })
        .collect()
}

/// Mean of the present MoM values
pub fn average_mom_growth(monthly: &[MonthlyRevenue]) -> Option<f64> {
    mean(monthly.iter().filter_map(|m| m.mom_growth_pct)).map(|v| round_to(v, 2))
}
