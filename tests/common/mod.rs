//! Shared CSV fixtures for integration tests
//!
//! Five orders across 2022 and 2023:
//! - o1 (SP, delivered 2023-01): two items, 100 + 50, 3 days, score 5
//! - o2 (RJ, delivered 2023-02): 200, 10 days, score 3
//! - o3 (SP, delivered 2022-01): 150, 5 days, score 4
//! - o4 (MG, canceled 2023-03): 80, never delivered
//! - o5 (MG, delivered 2023-03): 120, uncategorised product, 5 days, score 4

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

pub const ORDERS: &str = "\
order_id,customer_id,order_status,order_purchase_timestamp,order_approved_at,order_delivered_carrier_date,order_delivered_customer_date,order_estimated_delivery_date
o1,c1,delivered,2023-01-15 10:00:00,2023-01-15 11:00:00,2023-01-16 10:00:00,2023-01-18 10:00:00,2023-01-25 00:00:00
o2,c2,delivered,2023-02-10 12:00:00,2023-02-10 13:00:00,2023-02-12 12:00:00,2023-02-20 12:00:00,2023-02-25 00:00:00
o3,c1,delivered,2022-01-20 08:00:00,2022-01-20 09:00:00,2022-01-21 08:00:00,2022-01-25 08:00:00,2022-02-01 00:00:00
o4,c3,canceled,2023-03-05 09:00:00,,,,2023-03-20 00:00:00
o5,c3,delivered,2023-03-12 14:30:00,2023-03-12 15:00:00,2023-03-13 14:30:00,2023-03-17 14:30:00,2023-03-25 00:00:00
";

pub const ORDER_ITEMS: &str = "\
order_id,order_item_id,product_id,seller_id,shipping_limit_date,price,freight_value
o1,1,p1,s1,2023-01-17 10:00:00,100.00,10.00
o1,2,p2,s1,2023-01-17 10:00:00,50.00,5.00
o2,1,p1,s2,2023-02-12 12:00:00,200.00,20.00
o3,1,p2,s1,2022-01-22 08:00:00,150.00,15.00
o4,1,p1,s1,2023-03-07 09:00:00,80.00,8.00
o5,1,p3,s2,2023-03-14 14:30:00,120.00,12.00
";

pub const PRODUCTS: &str = "\
product_id,product_category_name,product_weight_g,product_length_cm,product_height_cm,product_width_cm
p1,electronics,500,20,10,15
p2,housewares,1200,30,20,25
p3,,300,10,5,10
";

pub const CUSTOMERS: &str = "\
customer_id,customer_unique_id,customer_zip_code_prefix,customer_city,customer_state
c1,u1,01000,sao paulo,SP
c2,u2,20000,rio de janeiro,RJ
c3,u3,30000,belo horizonte,MG
";

pub const REVIEWS: &str = "\
review_id,order_id,review_score,review_comment_title,review_comment_message,review_creation_date,review_answer_timestamp
r1,o1,5,,great,2023-01-19 00:00:00,2023-01-20 10:00:00
r2,o2,3,,,2023-02-21 00:00:00,2023-02-22 10:00:00
r3,o3,4,,,2022-01-26 00:00:00,2022-01-27 10:00:00
r5,o5,4,,,2023-03-18 00:00:00,2023-03-19 10:00:00
r1b,o1,1,,duplicate,2023-01-21 00:00:00,2023-01-22 10:00:00
";

pub const PAYMENTS: &str = "\
order_id,payment_sequential,payment_type,payment_installments,payment_value
o1,1,credit_card,2,165.00
o2,1,boleto,1,220.00
o3,1,credit_card,1,165.00
o4,1,voucher,1,88.00
o5,1,credit_card,3,132.00
";

pub const FILES: [(&str, &str); 6] = [
    ("orders_dataset.csv", ORDERS),
    ("order_items_dataset.csv", ORDER_ITEMS),
    ("products_dataset.csv", PRODUCTS),
    ("customers_dataset.csv", CUSTOMERS),
    ("order_reviews_dataset.csv", REVIEWS),
    ("order_payments_dataset.csv", PAYMENTS),
];

/// Write the full fixture set into `dir`
pub fn write_dataset(dir: &Path) {
    for (name, content) in FILES {
        fs::write(dir.join(name), content).expect("Failed to write fixture");
    }
}

/// Fresh temp directory holding the fixture set
pub fn dataset_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_dataset(dir.path());
    dir
}
