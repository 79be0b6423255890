//! Business metric aggregators
//!
//! 所有聚合函数都是纯函数：输入 `&[SalesRecord]`，输出可序列化的结果结构，
//! 供 CLI 摘要、图表渲染与 Dashboard API 共用。

pub mod experience;
pub mod geographic;
pub mod product;
pub mod revenue;
pub mod summary;

pub use experience::{
    DeliveryBucket, DeliveryBucketSummary, DeliveryMetrics, ReviewScoreShare,
    calculate_delivery_metrics, calculate_review_distribution,
};
pub use geographic::{StateMetrics, calculate_geographic_metrics};
pub use product::{CategoryRevenue, calculate_product_metrics};
pub use revenue::{
    MonthlyRevenue, RevenueMetrics, average_mom_growth, calculate_monthly_revenue,
    calculate_revenue_metrics, pct_change,
};
pub use summary::format_metrics_summary;

use std::collections::HashSet;

use crate::data::SalesRecord;

/// Round half away from zero to `places` decimals
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Arithmetic mean, `None` for an empty input
pub(crate) fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

pub(crate) fn distinct_orders<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    records
        .into_iter()
        .map(|r| r.order_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// First row of every order, in input order
pub(crate) fn first_row_per_order(records: &[SalesRecord]) -> Vec<&SalesRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .filter(|r| seen.insert(r.order_id.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::fixtures::record;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.005_1, 2), 1.01);
        assert_eq!(round_to(2.25, 1), 2.3);
        assert_eq!(round_to(-2.25, 1), -2.3);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(Vec::<f64>::new()), None);
        assert_eq!(mean([1.0, 2.0, 6.0]), Some(3.0));
    }

    #[test]
    fn test_first_row_per_order() {
        let rows = vec![record("a", 1.0), record("b", 2.0), record("a", 3.0)];
        let firsts = first_row_per_order(&rows);
        assert_eq!(firsts.len(), 2);
        assert_eq!(firsts[0].price, 1.0);
        assert_eq!(distinct_orders(&rows), 2);
    }
}
