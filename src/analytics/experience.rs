//! Customer experience: delivery speed and review scores.
//!
//! Both aggregations work at order level, using the first row of each order.

use std::collections::BTreeMap;

use serde::Serialize;
use strum::{AsRefStr, EnumIter};

use super::{first_row_per_order, mean, round_to};
use crate::data::SalesRecord;

/// Delivery time bucket, ordered fastest first
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, EnumIter, AsRefStr,
)]
pub enum DeliveryBucket {
    #[serde(rename = "1-3 days")]
    #[strum(serialize = "1-3 days")]
    OneToThreeDays,
    #[serde(rename = "4-7 days")]
    #[strum(serialize = "4-7 days")]
    FourToSevenDays,
    #[serde(rename = "8+ days")]
    #[strum(serialize = "8+ days")]
    EightPlusDays,
    #[serde(rename = "unknown")]
    #[strum(serialize = "unknown")]
    Unknown,
}

impl DeliveryBucket {
    pub fn from_days(days: Option<i64>) -> Self {
        match days {
            Some(d) if d <= 3 => Self::OneToThreeDays,
            Some(d) if d <= 7 => Self::FourToSevenDays,
            Some(_) => Self::EightPlusDays,
            None => Self::Unknown,
        }
    }

    pub fn label(&self) -> &str {
        self.as_ref()
    }
}

impl std::fmt::Display for DeliveryBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryBucketSummary {
    pub delivery_bucket: DeliveryBucket,
    pub avg_review_score: Option<f64>,
    pub order_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryMetrics {
    pub avg_delivery_days: Option<f64>,
    pub avg_review_score: Option<f64>,
    pub delivery_bucket_summary: Vec<DeliveryBucketSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewScoreShare {
    pub review_score: u8,
    pub proportion: f64,
    pub pct: f64,
}

pub fn calculate_delivery_metrics(sales: &[SalesRecord]) -> DeliveryMetrics {
    let orders = first_row_per_order(sales);

    let avg_delivery_days =
        mean(orders.iter().filter_map(|r| r.delivery_days).map(|d| d as f64))
            .map(|v| round_to(v, 1));
    let avg_review_score = mean(
        orders
            .iter()
            .filter_map(|r| r.review_score)
            .map(f64::from),
    )
    .map(|v| round_to(v, 2));

    // bucket -> (scores, order count)
    let mut buckets: BTreeMap<DeliveryBucket, (Vec<f64>, usize)> = BTreeMap::new();
    for r in &orders {
        let entry = buckets
            .entry(DeliveryBucket::from_days(r.delivery_days))
            .or_default();
        if let Some(score) = r.review_score {
            entry.0.push(f64::from(score));
        }
        entry.1 += 1;
    }

    let delivery_bucket_summary = buckets
        .into_iter()
        .map(|(delivery_bucket, (scores, order_count))| DeliveryBucketSummary {
            delivery_bucket,
            avg_review_score: mean(scores).map(|v| round_to(v, 2)),
            order_count,
        })
        .collect();

    DeliveryMetrics {
        avg_delivery_days,
        avg_review_score,
        delivery_bucket_summary,
    }
}

/// Share of each review score among reviewed orders, lowest score first
pub fn calculate_review_distribution(sales: &[SalesRecord]) -> Vec<ReviewScoreShare> {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for r in first_row_per_order(sales) {
        if let Some(score) = r.review_score {
            *counts.entry(score).or_default() += 1;
        }
    }

    let total: usize = counts.values().sum();
    counts
        .into_iter()
        .map(|(review_score, count)| {
            let proportion = count as f64 / total as f64;
            ReviewScoreShare {
                review_score,
                proportion,
                pct: round_to(proportion * 100.0, 1),
            }
        })
        .collect()
}
