//! CSV 读写共享逻辑
//!
//! 提供统一的 CSV 读取（源数据表）与导出（合并后的销售数据）功能，供 loader 和 CLI 使用

use chrono::Utc;
use csv::{ReaderBuilder, WriterBuilder};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::warn;

use crate::data::SalesRecord;
use crate::errors::SalesboardError;

/// 最多在日志中展示的错误行数
const MAX_REPORTED_ERRORS: usize = 10;

/// 从 CSV 文件读取一张表
///
/// 无法反序列化的行会被跳过并记录警告；如果所有数据行都失败，返回错误。
pub fn read_table<T, P>(path: P) -> Result<Vec<T>, SalesboardError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        SalesboardError::missing_table(format!("Failed to open {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for (row_idx, result) in csv_reader.deserialize::<T>().enumerate() {
        let row_num = row_idx + 2; // CSV 行号（1-based，跳过 header）
        match result {
            Ok(row) => rows.push(row),
            Err(e) => errors.push(format!("Row {}: {}", row_num, e)),
        }
    }

    if !errors.is_empty() && rows.is_empty() {
        return Err(SalesboardError::csv_parse(format!(
            "Failed to read {}:\n{}",
            path.display(),
            errors
                .iter()
                .take(MAX_REPORTED_ERRORS)
                .cloned()
                .collect::<Vec<_>>()
                .join("\n")
        )));
    }

    // 部分行失败：打印警告但继续
    if !errors.is_empty() {
        warn!(
            "Skipped {} malformed row(s) in {}:\n{}",
            errors.len(),
            path.display(),
            errors
                .iter()
                .take(MAX_REPORTED_ERRORS)
                .cloned()
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(rows)
}

/// 导出合并后的销售数据到 CSV 文件
pub fn export_to_csv<P: AsRef<Path>>(
    records: &[SalesRecord],
    path: P,
) -> Result<(), SalesboardError> {
    let file = File::create(path.as_ref())
        .map_err(|e| SalesboardError::file_operation(format!("Failed to create file: {}", e)))?;
    let writer = BufWriter::new(file);
    let mut csv_writer = WriterBuilder::new().from_writer(writer);

    for record in records {
        csv_writer.serialize(record).map_err(|e| {
            SalesboardError::serialization(format!("Failed to write CSV row: {}", e))
        })?;
    }

    csv_writer
        .flush()
        .map_err(|e| SalesboardError::file_operation(format!("Failed to flush CSV: {}", e)))?;

    Ok(())
}

/// 生成默认导出文件名（带时间戳）
pub fn generate_export_filename() -> String {
    format!("sales_export_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tables::{CustomerRow, OrderRow};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_table_skips_malformed_rows() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "order_id,order_item_id,product_id,price").unwrap();
        writeln!(temp_file, "o1,1,p1,10.5").unwrap();
        writeln!(temp_file, "o2,not-a-number,p2,3.0").unwrap();

        let rows: Vec<crate::data::tables::OrderItemRow> = read_table(temp_file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].order_id, "o1");
        assert_eq!(rows[0].price, Some(10.5));
        assert_eq!(rows[0].freight_value, None);
    }

    #[test]
    fn test_read_table_all_rows_bad_is_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "order_id,order_item_id,product_id").unwrap();
        writeln!(temp_file, "o1,x,p1").unwrap();

        let result: Result<Vec<crate::data::tables::OrderItemRow>, _> =
            read_table(temp_file.path());
        assert!(matches!(result, Err(SalesboardError::CsvParse(_))));
    }

    #[test]
    fn test_read_table_header_only_is_empty() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "customer_id,customer_city,customer_state").unwrap();
        let rows: Vec<CustomerRow> = read_table(temp_file.path()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_read_table_missing_file() {
        let result: Result<Vec<OrderRow>, _> = read_table("/definitely/not/here.csv");
        assert!(matches!(result, Err(SalesboardError::MissingTable(_))));
    }

    #[test]
    fn test_read_table_coerces_bad_dates() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            "order_id,customer_id,order_status,order_purchase_timestamp,order_delivered_customer_date"
        )
        .unwrap();
        writeln!(temp_file, "o1,c1,delivered,2023-01-05 10:00:00,garbage").unwrap();

        let rows: Vec<OrderRow> = read_table(temp_file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].order_purchase_timestamp.is_some());
        assert!(rows[0].order_delivered_customer_date.is_none());
        assert!(rows[0].order_approved_at.is_none());
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let record = crate::data::record::fixtures::record("o1", 12.5);
        let temp_file = NamedTempFile::new().unwrap();
        export_to_csv(&[record], temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("order_id,order_item_id,product_id,price"));
        assert!(lines.next().unwrap().starts_with("o1,1,p-o1,12.5"));
    }

    #[test]
    fn test_generate_export_filename() {
        let filename = generate_export_filename();
        assert!(filename.starts_with("sales_export_"));
        assert!(filename.ends_with(".csv"));
    }
}
