//! Data loader integration tests
//!
//! Reads the fixture CSVs from a temp directory and checks the merged
//! dataset, derived columns and filters.

mod common;

use std::fs;

use salesboard::data::{
    EcommerceDataLoader, SalesFilter, TableKind, date_bounds, load_and_process_data,
};
use salesboard::errors::SalesboardError;

#[test]
fn test_load_raw_data_counts() {
    let dir = common::dataset_dir();
    let mut loader = EcommerceDataLoader::new(dir.path());

    let raw = loader.load_raw_data().unwrap();
    let counts: Vec<(TableKind, usize)> = raw.row_counts();
    assert_eq!(
        counts,
        vec![
            (TableKind::Orders, 5),
            (TableKind::OrderItems, 6),
            (TableKind::Products, 3),
            (TableKind::Customers, 3),
            (TableKind::Reviews, 5),
            (TableKind::Payments, 5),
        ]
    );
    assert_eq!(loader.orders().len(), 5);
    assert_eq!(loader.payments().len(), 5);
}

#[test]
fn test_accessors_empty_before_load() {
    let dir = common::dataset_dir();
    let loader = EcommerceDataLoader::new(dir.path());
    assert!(loader.raw().is_none());
    assert!(loader.orders().is_empty());
    assert!(loader.processed().is_none());
}

#[test]
fn test_merged_dataset_one_row_per_item() {
    let dir = common::dataset_dir();
    let (_, records) = load_and_process_data(dir.path()).unwrap();
    assert_eq!(records.len(), 6);

    let first = records
        .iter()
        .find(|r| r.order_id == "o1" && r.order_item_id == 1)
        .unwrap();
    assert_eq!(first.customer_state.as_deref(), Some("SP"));
    assert_eq!(first.product_category_name.as_deref(), Some("electronics"));
    assert_eq!(first.purchase_year, Some(2023));
    assert_eq!(first.purchase_month, Some(1));
    assert_eq!(first.delivery_days, Some(3));
    // first review per order wins over the later duplicate
    assert_eq!(first.review_score, Some(5));
}

#[test]
fn test_missing_values_stay_empty() {
    let dir = common::dataset_dir();
    let (_, records) = load_and_process_data(dir.path()).unwrap();

    let canceled = records.iter().find(|r| r.order_id == "o4").unwrap();
    assert_eq!(canceled.delivery_days, None);
    assert_eq!(canceled.review_score, None);

    let uncategorised = records.iter().find(|r| r.order_id == "o5").unwrap();
    assert_eq!(uncategorised.product_category_name, None);
    assert_eq!(uncategorised.delivery_days, Some(5));
}

#[test]
fn test_process_data_is_cached() {
    let dir = common::dataset_dir();
    let mut loader = EcommerceDataLoader::new(dir.path());
    let a = loader.process_data().unwrap();
    let b = loader.process_data().unwrap();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
}

#[test]
fn test_create_sales_dataset_filters() {
    let dir = common::dataset_dir();
    let mut loader = EcommerceDataLoader::new(dir.path());

    let delivered_2023 = loader
        .create_sales_dataset(&SalesFilter::default().with_year(2023))
        .unwrap();
    assert_eq!(delivered_2023.len(), 4);
    assert!(delivered_2023.iter().all(|r| r.has_status("delivered")));

    let march_any_status = loader
        .create_sales_dataset(&SalesFilter::all().with_year(2023).with_month(3))
        .unwrap();
    assert_eq!(march_any_status.len(), 2);
}

#[test]
fn test_date_bounds() {
    let dir = common::dataset_dir();
    let (_, records) = load_and_process_data(dir.path()).unwrap();
    let (lo, hi) = date_bounds(&records).unwrap();
    assert_eq!(lo.to_string(), "2022-01-20 08:00:00");
    assert_eq!(hi.to_string(), "2023-03-12 14:30:00");
}

#[test]
fn test_missing_file_names_table() {
    let dir = common::dataset_dir();
    fs::remove_file(dir.path().join("products_dataset.csv")).unwrap();

    let err = load_and_process_data(dir.path()).unwrap_err();
    assert!(matches!(err, SalesboardError::MissingTable(_)));
    assert!(err.to_string().contains("products_dataset.csv"));
}

#[test]
fn test_malformed_rows_skipped() {
    let dir = common::dataset_dir();
    let items = format!("{}o9,oops,p1,s1,,1.00,1.00\n", common::ORDER_ITEMS);
    fs::write(dir.path().join("order_items_dataset.csv"), items).unwrap();

    let (_, records) = load_and_process_data(dir.path()).unwrap();
    assert_eq!(records.len(), 6);
}

#[test]
fn test_all_rows_malformed_is_parse_error() {
    let dir = common::dataset_dir();
    fs::write(
        dir.path().join("order_items_dataset.csv"),
        "order_id,order_item_id,product_id,price\no1,x,p1,1.0\no2,y,p2,2.0\n",
    )
    .unwrap();

    let err = load_and_process_data(dir.path()).unwrap_err();
    assert!(matches!(err, SalesboardError::CsvParse(_)));
}
