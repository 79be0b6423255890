use std::collections::BTreeMap;

use serde::Serialize;

use super::round_to;
use crate::data::SalesRecord;

/// 类目收入与市场份额
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRevenue {
    pub product_category_name: String,
    pub revenue: f64,
    pub market_share_pct: f64,
}

/// Revenue per product category, highest first.
///
/// Ties keep name order. Rows without a category are skipped.
pub fn calculate_product_metrics(sales: &[SalesRecord]) -> Vec<CategoryRevenue> {
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
    for r in sales {
        if let Some(category) = r.product_category_name.as_deref() {
            *by_category.entry(category).or_default() += r.price;
        }
    }

    let total: f64 = by_category.values().sum();
    let mut sums: Vec<(&str, f64)> = by_category.into_iter().collect();
    // stable: equal revenues stay in name order; sort before rounding
    sums.sort_by(|a, b| b.1.total_cmp(&a.1));

    let rows = sums
        .into_iter()
        .map(|(name, revenue)| CategoryRevenue {
            product_category_name: name.to_string(),
            revenue: round_to(revenue, 2),
            market_share_pct: if total > 0.0 {
                round_to(revenue / total * 100.0, 2)
            } else {
                0.0
            },
        })
        .collect();

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::fixtures::record;

    fn in_category(order_id: &str, price: f64, category: Option<&str>) -> SalesRecord {
        let mut r = record(order_id, price);
        r.product_category_name = category.map(str::to_string);
        r
    }

    #[test]
    fn test_sorted_with_share() {
        let sales = vec![
            in_category("a", 30.0, Some("toys")),
            in_category("b", 50.0, Some("books")),
            in_category("c", 20.0, Some("toys")),
            in_category("d", 100.0, None),
        ];
        let rows = calculate_product_metrics(&sales);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_category_name, "books");
        assert_eq!(rows[0].market_share_pct, 50.0);
        assert_eq!(rows[1].revenue, 50.0);
    }

    #[test]
    fn test_ties_break_by_name() {
        let sales = vec![
            in_category("a", 10.0, Some("zebra")),
            in_category("b", 10.0, Some("apple")),
        ];
        let rows = calculate_product_metrics(&sales);
        assert_eq!(rows[0].product_category_name, "apple");
        assert_eq!(rows[1].product_category_name, "zebra");
    }

    #[test]
    fn test_order_uses_unrounded_revenue() {
        let sales = vec![
            in_category("a", 10.001, Some("alpha")),
            in_category("b", 10.004, Some("beta")),
        ];
        let rows = calculate_product_metrics(&sales);
        assert_eq!(rows[0].product_category_name, "beta");
        assert_eq!(rows[0].revenue, 10.0);
        assert_eq!(rows[1].product_category_name, "alpha");
    }

    #[test]
    fn test_zero_total_has_zero_share() {
        let rows = calculate_product_metrics(&[in_category("a", 0.0, Some("free"))]);
        assert_eq!(rows[0].market_share_pct, 0.0);
    }
}
