//! Data loading and merge pipeline
//!
//! Reads the six source tables and joins them into one flat
//! [`SalesRecord`] table:
//!
//! ```text
//! order_items ⟕ orders ⟕ products ⟕ customers ⟕ reviews(first per order)
//! ```
//!
//! Every join is a left join, so every order item line survives. A key
//! with several matches on the right fans out into one row per match.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use super::filter::SalesFilter;
use super::record::SalesRecord;
use super::tables::{
    CustomerRow, OrderRow, PaymentRow, ProductRow, RawTables, ReviewRow, TableKind,
};
use crate::errors::Result;
use crate::utils::csv_handler::read_table;

/// Loads and preprocesses the e-commerce CSV files found in `data_path`.
#[derive(Debug, Clone)]
pub struct EcommerceDataLoader {
    data_path: PathBuf,
    raw: Option<RawTables>,
    processed: Option<Arc<Vec<SalesRecord>>>,
}

impl EcommerceDataLoader {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            raw: None,
            processed: None,
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    fn table_path(&self, table: TableKind) -> PathBuf {
        self.data_path.join(table.file_name())
    }

    /// Read all six CSV files.
    pub fn load_raw_data(&mut self) -> Result<&RawTables> {
        let start = Instant::now();
        info!("Loading source tables from {}", self.data_path.display());

        let raw = RawTables {
            orders: read_table(self.table_path(TableKind::Orders))?,
            order_items: read_table(self.table_path(TableKind::OrderItems))?,
            products: read_table(self.table_path(TableKind::Products))?,
            customers: read_table(self.table_path(TableKind::Customers))?,
            reviews: read_table(self.table_path(TableKind::Reviews))?,
            payments: read_table(self.table_path(TableKind::Payments))?,
        };

        for (table, rows) in raw.row_counts() {
            debug!("Loaded {} rows from {}", rows, table.file_name());
        }
        info!("Source tables loaded in {:?}", start.elapsed());

        // 原始数据变化后，合并结果失效
        self.processed = None;
        Ok(self.raw.insert(raw))
    }

    /// Merge all tables into the flat sales table and derive the time columns.
    ///
    /// Raw tables are loaded on first use. The result is cached.
    pub fn process_data(&mut self) -> Result<Arc<Vec<SalesRecord>>> {
        if let Some(processed) = &self.processed {
            return Ok(processed.clone());
        }
        if self.raw.is_none() {
            self.load_raw_data()?;
        }
        let raw = self.raw.as_ref().map(merge_tables).unwrap_or_default();

        info!("Processed dataset: {} order item rows", raw.len());
        let processed = Arc::new(raw);
        self.processed = Some(processed.clone());
        Ok(processed)
    }

    /// Filtered copy of the processed dataset
    pub fn create_sales_dataset(&mut self, filter: &SalesFilter) -> Result<Vec<SalesRecord>> {
        let processed = self.process_data()?;
        let sales = filter.apply(&processed);
        debug!(
            "create_sales_dataset: {:?} kept {} of {} rows",
            filter,
            sales.len(),
            processed.len()
        );
        Ok(sales)
    }

    pub fn raw(&self) -> Option<&RawTables> {
        self.raw.as_ref()
    }

    pub fn processed(&self) -> Option<&Arc<Vec<SalesRecord>>> {
        self.processed.as_ref()
    }

    /// Raw orders table (empty before loading)
    pub fn orders(&self) -> &[OrderRow] {
        self.raw.as_ref().map_or(&[], |r| &r.orders)
    }

    /// Raw products table (empty before loading)
    pub fn products(&self) -> &[ProductRow] {
        self.raw.as_ref().map_or(&[], |r| &r.products)
    }

    /// Raw customers table (empty before loading)
    pub fn customers(&self) -> &[CustomerRow] {
        self.raw.as_ref().map_or(&[], |r| &r.customers)
    }

    /// Raw reviews table (empty before loading)
    pub fn reviews(&self) -> &[ReviewRow] {
        self.raw.as_ref().map_or(&[], |r| &r.reviews)
    }

    /// Raw payments table (empty before loading)
    pub fn payments(&self) -> &[PaymentRow] {
        self.raw.as_ref().map_or(&[], |r| &r.payments)
    }
}

/// Load and process all e-commerce data in one call.
pub fn load_and_process_data(
    data_path: impl Into<PathBuf>,
) -> Result<(EcommerceDataLoader, Arc<Vec<SalesRecord>>)> {
    let mut loader = EcommerceDataLoader::new(data_path);
    let processed = loader.process_data()?;
    Ok((loader, processed))
}

/// Earliest and latest purchase timestamps in the table
pub fn date_bounds(records: &[SalesRecord]) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let mut timestamps = records.iter().filter_map(|r| r.order_purchase_timestamp);
    let first = timestamps.next()?;
    Some(timestamps.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts))))
}

/// Join the raw tables into the flat sales table.
pub fn merge_tables(raw: &RawTables) -> Vec<SalesRecord> {
    let base: Vec<SalesRecord> = raw
        .order_items
        .iter()
        .map(|item| SalesRecord {
            order_id: item.order_id.clone(),
            order_item_id: item.order_item_id,
            product_id: item.product_id.clone(),
            price: item.price.unwrap_or_default(),
            freight_value: item.freight_value.unwrap_or_default(),
            customer_id: None,
            order_status: None,
            order_purchase_timestamp: None,
            order_delivered_customer_date: None,
            product_category_name: None,
            customer_state: None,
            customer_city: None,
            review_score: None,
            purchase_year: None,
            purchase_month: None,
            delivery_days: None,
        })
        .collect();

    // Merge order items with order header
    let orders = index_by(&raw.orders, |o| Some(o.order_id.as_str()));
    let merged = left_join(
        base,
        &orders,
        |r| Some(r.order_id.as_str()),
        |r, o: &OrderRow| {
            r.customer_id = o.customer_id.clone();
            r.order_status = o.order_status.clone();
            r.order_purchase_timestamp = o.order_purchase_timestamp;
            r.order_delivered_customer_date = o.order_delivered_customer_date;
        },
    );

    // Attach product category
    let products = index_by(&raw.products, |p| Some(p.product_id.as_str()));
    let merged = left_join(
        merged,
        &products,
        |r| Some(r.product_id.as_str()),
        |r, p: &ProductRow| r.product_category_name = p.product_category_name.clone(),
    );

    // Attach customer state / city
    let customers = index_by(&raw.customers, |c| Some(c.customer_id.as_str()));
    let merged = left_join(
        merged,
        &customers,
        |r| r.customer_id.as_deref(),
        |r, c: &CustomerRow| {
            r.customer_state = c.customer_state.clone();
            r.customer_city = c.customer_city.clone();
        },
    );

    // Attach review score: one review per order, first one wins
    let reviews = first_review_per_order(&raw.reviews);
    let mut merged = left_join(
        merged,
        &reviews,
        |r| Some(r.order_id.as_str()),
        |r, review: &ReviewRow| r.review_score = review.review_score,
    );

    for record in &mut merged {
        record.derive_time_columns();
    }
    merged
}

/// Group rows by join key; rows with a null key never match
fn index_by<'a, T, F>(rows: &'a [T], key: F) -> HashMap<&'a str, Vec<&'a T>>
where
    F: Fn(&'a T) -> Option<&'a str>,
{
    let mut index: HashMap<&str, Vec<&T>> = HashMap::with_capacity(rows.len());
    for row in rows {
        if let Some(k) = key(row) {
            index.entry(k).or_default().push(row);
        }
    }
    index
}

fn first_review_per_order(reviews: &[ReviewRow]) -> HashMap<&str, Vec<&ReviewRow>> {
    let mut index: HashMap<&str, Vec<&ReviewRow>> = HashMap::with_capacity(reviews.len());
    for review in reviews {
        index
            .entry(review.order_id.as_str())
            .or_insert_with(|| vec![review]);
    }
    index
}

fn left_join<R, K, A>(
    left: Vec<SalesRecord>,
    right: &HashMap<&str, Vec<&R>>,
    key: K,
    attach: A,
) -> Vec<SalesRecord>
where
    K: Fn(&SalesRecord) -> Option<&str>,
    A: Fn(&mut SalesRecord, &R),
{
    let mut out = Vec::with_capacity(left.len());
    for mut row in left {
        let matches = key(&row).and_then(|k| right.get(k));
        match matches.map(|m| m.as_slice()) {
            Some([rest @ .., last]) => {
                for &other in rest {
                    let mut fanned = row.clone();
                    attach(&mut fanned, other);
                    out.push(fanned);
                }
                attach(&mut row, last);
                out.push(row);
            }
            _ => out.push(row),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tables::OrderItemRow;
    use crate::data::timestamp::parse_timestamp;

    fn item(order_id: &str, item_id: u32, product_id: &str, price: f64) -> OrderItemRow {
        OrderItemRow {
            order_id: order_id.to_string(),
            order_item_id: item_id,
            product_id: product_id.to_string(),
            seller_id: None,
            shipping_limit_date: None,
            price: Some(price),
            freight_value: Some(1.0),
        }
    }

    fn order(order_id: &str, customer_id: &str, purchased: &str, delivered: &str) -> OrderRow {
        OrderRow {
            order_id: order_id.to_string(),
            customer_id: Some(customer_id.to_string()),
            order_status: Some("delivered".to_string()),
            order_purchase_timestamp: parse_timestamp(purchased),
            order_approved_at: None,
            order_delivered_carrier_date: None,
            order_delivered_customer_date: parse_timestamp(delivered),
            order_estimated_delivery_date: None,
        }
    }

    fn review(order_id: &str, score: u8) -> ReviewRow {
        ReviewRow {
            review_id: None,
            order_id: order_id.to_string(),
            review_score: Some(score),
            review_comment_title: None,
            review_comment_message: None,
            review_creation_date: None,
            review_answer_timestamp: None,
        }
    }

    fn sample_tables() -> RawTables {
        RawTables {
            orders: vec![
                order("o1", "c1", "2023-01-05 10:00:00", "2023-01-08 09:00:00"),
                order("o2", "c2", "2023-02-01 12:00:00", ""),
            ],
            order_items: vec![
                item("o1", 1, "p1", 100.0),
                item("o1", 2, "p2", 50.0),
                item("o2", 1, "p1", 80.0),
                item("orphan", 1, "p9", 5.0),
            ],
            products: vec![ProductRow {
                product_id: "p1".to_string(),
                product_category_name: Some("electronics".to_string()),
                product_weight_g: None,
                product_length_cm: None,
                product_height_cm: None,
                product_width_cm: None,
            }],
            customers: vec![CustomerRow {
                customer_id: "c1".to_string(),
                customer_unique_id: None,
                customer_zip_code_prefix: None,
                customer_city: Some("Austin".to_string()),
                customer_state: Some("TX".to_string()),
            }],
            reviews: vec![review("o1", 5), review("o1", 1), review("o2", 3)],
            payments: vec![],
        }
    }

    #[test]
    fn test_merge_keeps_every_item_line() {
        let merged = merge_tables(&sample_tables());
        assert_eq!(merged.len(), 4);

        let orphan = merged.iter().find(|r| r.order_id == "orphan").unwrap();
        assert_eq!(orphan.order_status, None);
        assert_eq!(orphan.purchase_year, None);
        assert_eq!(orphan.review_score, None);
    }

    #[test]
    fn test_merge_attaches_dimensions() {
        let merged = merge_tables(&sample_tables());
        let first = &merged[0];
        assert_eq!(first.order_id, "o1");
        assert_eq!(first.product_category_name.as_deref(), Some("electronics"));
        assert_eq!(first.customer_state.as_deref(), Some("TX"));
        assert_eq!(first.customer_city.as_deref(), Some("Austin"));
        assert_eq!(first.purchase_month, Some(1));
        assert_eq!(first.delivery_days, Some(2));

        // p2 has no product row
        assert_eq!(merged[1].product_category_name, None);
        // c2 has no customer row
        assert_eq!(merged[2].customer_state, None);
        assert_eq!(merged[2].delivery_days, None);
    }

    #[test]
    fn test_first_review_wins() {
        let merged = merge_tables(&sample_tables());
        assert!(
            merged
                .iter()
                .filter(|r| r.order_id == "o1")
                .all(|r| r.review_score == Some(5))
        );
    }

    #[test]
    fn test_duplicate_right_keys_fan_out() {
        let mut tables = sample_tables();
        tables.products.push(ProductRow {
            product_id: "p1".to_string(),
            product_category_name: Some("gadgets".to_string()),
            product_weight_g: None,
            product_length_cm: None,
            product_height_cm: None,
            product_width_cm: None,
        });
        let merged = merge_tables(&tables);
        // two items reference p1, each now matches two product rows
        assert_eq!(merged.len(), 6);
        let categories: Vec<_> = merged
            .iter()
            .filter(|r| r.order_id == "o1" && r.order_item_id == 1)
            .map(|r| r.product_category_name.clone().unwrap())
            .collect();
        assert_eq!(categories, vec!["electronics", "gadgets"]);
    }

    #[test]
    fn test_date_bounds() {
        let merged = merge_tables(&sample_tables());
        let (lo, hi) = date_bounds(&merged).unwrap();
        assert_eq!(lo, parse_timestamp("2023-01-05 10:00:00").unwrap());
        assert_eq!(hi, parse_timestamp("2023-02-01 12:00:00").unwrap());
        assert_eq!(date_bounds(&[]), None);
    }

    #[test]
    fn test_accessors_empty_before_load() {
        let loader = EcommerceDataLoader::new("/nowhere");
        assert!(loader.orders().is_empty());
        assert!(loader.reviews().is_empty());
        assert!(loader.processed().is_none());
    }

    #[test]
    fn test_process_missing_directory_fails() {
        let mut loader = EcommerceDataLoader::new("/definitely/not/a/dir");
        let err = loader.process_data().unwrap_err();
        assert!(err.message().contains("orders_dataset.csv"));
    }
}
