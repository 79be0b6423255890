//! Row types of the six source tables.

use chrono::NaiveDateTime;
use serde::Deserialize;
use strum::{AsRefStr, EnumIter};

use super::timestamp::coerce_timestamp;

/// 源数据表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum TableKind {
    Orders,
    OrderItems,
    Products,
    Customers,
    Reviews,
    Payments,
}

impl TableKind {
    /// Expected file name inside the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Orders => "orders_dataset.csv",
            Self::OrderItems => "order_items_dataset.csv",
            Self::Products => "products_dataset.csv",
            Self::Customers => "customers_dataset.csv",
            Self::Reviews => "order_reviews_dataset.csv",
            Self::Payments => "order_payments_dataset.csv",
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderRow {
    pub order_id: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub order_status: Option<String>,
    #[serde(default, deserialize_with = "coerce_timestamp")]
    pub order_purchase_timestamp: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "coerce_timestamp")]
    pub order_approved_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "coerce_timestamp")]
    pub order_delivered_carrier_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "coerce_timestamp")]
    pub order_delivered_customer_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "coerce_timestamp")]
    pub order_estimated_delivery_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderItemRow {
    pub order_id: String,
    pub order_item_id: u32,
    pub product_id: String,
    #[serde(default)]
    pub seller_id: Option<String>,
    #[serde(default, deserialize_with = "coerce_timestamp")]
    pub shipping_limit_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub freight_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductRow {
    pub product_id: String,
    #[serde(default)]
    pub product_category_name: Option<String>,
    #[serde(default)]
    pub product_weight_g: Option<f64>,
    #[serde(default)]
    pub product_length_cm: Option<f64>,
    #[serde(default)]
    pub product_height_cm: Option<f64>,
    #[serde(default)]
    pub product_width_cm: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomerRow {
    pub customer_id: String,
    #[serde(default)]
    pub customer_unique_id: Option<String>,
    #[serde(default)]
    pub customer_zip_code_prefix: Option<String>,
    #[serde(default)]
    pub customer_city: Option<String>,
    #[serde(default)]
    pub customer_state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReviewRow {
    #[serde(default)]
    pub review_id: Option<String>,
    pub order_id: String,
    #[serde(default)]
    pub review_score: Option<u8>,
    #[serde(default)]
    pub review_comment_title: Option<String>,
    #[serde(default)]
    pub review_comment_message: Option<String>,
    #[serde(default, deserialize_with = "coerce_timestamp")]
    pub review_creation_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "coerce_timestamp")]
    pub review_answer_timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentRow {
    pub order_id: String,
    #[serde(default)]
    pub payment_sequential: Option<u32>,
    #[serde(default)]
    pub payment_type: Option<String>,
    #[serde(default)]
    pub payment_installments: Option<u32>,
    #[serde(default)]
    pub payment_value: Option<f64>,
}

/// All six source tables as read from disk
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub orders: Vec<OrderRow>,
    pub order_items: Vec<OrderItemRow>,
    pub products: Vec<ProductRow>,
    pub customers: Vec<CustomerRow>,
    pub reviews: Vec<ReviewRow>,
    pub payments: Vec<PaymentRow>,
}

impl RawTables {
    /// Row count per table, in load order
    pub fn row_counts(&self) -> Vec<(TableKind, usize)> {
        vec![
            (TableKind::Orders, self.orders.len()),
            (TableKind::OrderItems, self.order_items.len()),
            (TableKind::Products, self.products.len()),
            (TableKind::Customers, self.customers.len()),
            (TableKind::Reviews, self.reviews.len()),
            (TableKind::Payments, self.payments.len()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_file_names_are_distinct() {
        let mut names: Vec<_> = TableKind::iter().map(|t| t.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_table_kind_display() {
        assert_eq!(TableKind::OrderItems.to_string(), "order_items");
        assert_eq!(TableKind::Reviews.file_name(), "order_reviews_dataset.csv");
    }
}
