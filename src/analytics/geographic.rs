use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::round_to;
use crate::data::SalesRecord;

/// 按州统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateMetrics {
    pub customer_state: String,
    pub revenue: f64,
    pub order_count: usize,
    pub aov: f64,
}

/// Revenue, distinct orders and AOV per customer state, highest revenue first
pub fn calculate_geographic_metrics(sales: &[SalesRecord]) -> Vec<StateMetrics> {
    let mut by_state: BTreeMap<&str, (f64, HashSet<&str>)> = BTreeMap::new();
    for r in sales {
        if let Some(state) = r.customer_state.as_deref() {
            let entry = by_state.entry(state).or_default();
            entry.0 += r.price;
            entry.1.insert(r.order_id.as_str());
        }
    }

    let mut rows: Vec<StateMetrics> = by_state
        .into_iter()
        .map(|(state, (revenue, orders))| {
            let order_count = orders.len();
            StateMetrics {
                customer_state: state.to_string(),
                revenue: round_to(revenue, 2),
                order_count,
                aov: round_to(revenue / order_count as f64, 2),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    rows
}
