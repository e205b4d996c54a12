// ==========================================
// 产品补货看板 - 文件解析器实现
// ==========================================
// 支持: 产品源 CSV (.csv) / Excel (.xlsx/.xls)
//       供应商源 JSON (.json, records 或 columns 结构)
// ==========================================

use crate::importer::catalog_loader_trait::{
    FileParser, RawRecords, RawRow, RawTable, RecordParser,
};
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 检查文件存在
fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::SourceUnavailable(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;
        ensure_exists(path)?;

        let ext = extension_of(path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let source_name = path.display().to_string();
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许短行
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ImportError::malformed(&source_name, e))?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::malformed(&source_name, "文件为空，没有可解析的列"));
        }

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result.map_err(|e| ImportError::malformed(&source_name, e))?;
            // 短行按缺失值处理，多出的字段视为解析失败
            if record.len() > headers.len() {
                return Err(ImportError::malformed(
                    &source_name,
                    format!(
                        "row {}: expected {} fields, saw {}",
                        row_idx + 2,
                        headers.len(),
                        record.len()
                    ),
                ));
            }
            let mut values = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    values.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if values.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(RawRow {
                row_number: row_idx + 2,
                values,
            });
        }

        tracing::debug!(source = %source_name, rows = rows.len(), "CSV 解析完成");
        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;
        ensure_exists(path)?;

        let ext = extension_of(path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let source_name = path.display().to_string();
        let mut workbook =
            open_workbook_auto(path).map_err(|e| ImportError::malformed(&source_name, e))?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::malformed(&source_name, "Excel 文件无工作表"))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::malformed(&source_name, e))?;

        // 提取表头（第一行）
        let mut rows_iter = range.rows();
        let header_row = rows_iter
            .next()
            .ok_or_else(|| ImportError::malformed(&source_name, "Excel 文件无表头行"))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::malformed(&source_name, "表头行为空"));
        }

        let mut rows = Vec::new();
        for (row_idx, data_row) in rows_iter.enumerate() {
            let mut values = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    values.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            if values.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(RawRow {
                row_number: row_idx + 2,
                values,
            });
        }

        tracing::debug!(source = %source_name, rows = rows.len(), "Excel 解析完成");
        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// 通用表格解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;
        match extension_of(file_path).as_str() {
            "csv" => CsvParser.parse_to_raw_table(file_path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_table(file_path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

// ==========================================
// JSON 记录解析器（供应商源）
// ==========================================
// 支持两种结构:
// - records: [{"SupplierID": 1, "CompanyName": "..."}, ...]
// - columns: {"SupplierID": {"0": 1, ...}, "CompanyName": {"0": "...", ...}}
pub struct JsonRecordParser;

impl RecordParser for JsonRecordParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<RawRecords> {
        let path = file_path;
        ensure_exists(path)?;

        let ext = extension_of(path);
        if ext != "json" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let source_name = path.display().to_string();
        let text = std::fs::read_to_string(path)?;
        let value: Value =
            serde_json::from_str(&text).map_err(|e| ImportError::malformed(&source_name, e))?;

        let parsed = match value {
            Value::Array(items) => parse_records_orient(items, &source_name)?,
            Value::Object(map) => parse_columns_orient(map, &source_name)?,
            _ => {
                return Err(ImportError::malformed(
                    &source_name,
                    "顶层必须是记录数组或列对象",
                ))
            }
        };

        tracing::debug!(source = %source_name, records = parsed.records.len(), "JSON 解析完成");
        Ok(parsed)
    }
}

fn push_column(columns: &mut Vec<String>, key: &str) {
    if !columns.iter().any(|c| c == key) {
        columns.push(key.to_string());
    }
}

fn parse_records_orient(items: Vec<Value>, source_name: &str) -> ImportResult<RawRecords> {
    let mut columns = Vec::new();
    let mut records = Vec::with_capacity(items.len());

    for (idx, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(record) => {
                for key in record.keys() {
                    push_column(&mut columns, key);
                }
                records.push(record);
            }
            other => {
                return Err(ImportError::malformed(
                    source_name,
                    format!("第 {} 条记录不是对象: {}", idx, other),
                ))
            }
        }
    }

    Ok(RawRecords { columns, records })
}

fn parse_columns_orient(map: Map<String, Value>, source_name: &str) -> ImportResult<RawRecords> {
    let mut columns = Vec::new();
    let mut index_labels: Vec<String> = Vec::new();

    for (column, cells) in map.iter() {
        let cells = cells.as_object().ok_or_else(|| {
            ImportError::malformed(source_name, format!("列 {} 不是 索引→值 对象", column))
        })?;
        push_column(&mut columns, column);
        for label in cells.keys() {
            if !index_labels.iter().any(|l| l == label) {
                index_labels.push(label.clone());
            }
        }
    }

    // 纯数字索引按数值排序，保证 "10" 排在 "2" 之后
    let numeric: Option<Vec<u64>> = index_labels.iter().map(|l| l.parse().ok()).collect();
    if let Some(nums) = numeric {
        let mut pairs: Vec<(u64, String)> = nums.into_iter().zip(index_labels).collect();
        pairs.sort_by_key(|(n, _)| *n);
        index_labels = pairs.into_iter().map(|(_, l)| l).collect();
    }

    let records = index_labels
        .iter()
        .map(|label| {
            let mut record = Map::new();
            for (column, cells) in map.iter() {
                if let Some(v) = cells.get(label) {
                    record.insert(column.clone(), v.clone());
                }
            }
            record
        })
        .collect();

    Ok(RawRecords { columns, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_with_suffix(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let file = temp_with_suffix(
            ".csv",
            "ProductName,UnitsInStock\nWidget,5\nGadget,20\n",
        );

        let table = CsvParser.parse_to_raw_table(file.path()).unwrap();

        assert_eq!(table.headers, vec!["ProductName", "UnitsInStock"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].values.get("ProductName"), Some(&"Widget".to_string()));
        assert_eq!(table.rows[1].row_number, 3);
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_table(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::SourceUnavailable(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let file = temp_with_suffix(".csv", "ProductName,UnitsInStock\nWidget,5\n,\nGadget,20\n");

        let table = CsvParser.parse_to_raw_table(file.path()).unwrap();

        // 应跳过空行
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_csv_parser_header_only() {
        let file = temp_with_suffix(".csv", "ProductName,UnitsInStock\n");
        let table = CsvParser.parse_to_raw_table(file.path()).unwrap();
        assert_eq!(table.headers.len(), 2);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_csv_parser_empty_file_is_malformed() {
        let file = temp_with_suffix(".csv", "");
        let result = CsvParser.parse_to_raw_table(file.path());
        assert!(matches!(result, Err(ImportError::MalformedSource { .. })));
    }

    #[test]
    fn test_csv_parser_rejects_extra_fields() {
        let file = temp_with_suffix(
            ".csv",
            "ProductName,SupplierID,UnitsInStock,UnitsOnOrder,ReorderLevel\nWidget,1,5,2,10,999,junk\n",
        );

        match CsvParser.parse_to_raw_table(file.path()) {
            Err(ImportError::MalformedSource { message, .. }) => {
                assert_eq!(message, "row 2: expected 5 fields, saw 7");
            }
            other => panic!("unexpected result: {:?}", other.map(|t| t.rows.len())),
        }
    }

    #[test]
    fn test_csv_parser_short_row_keeps_missing_cells_empty() {
        let file = temp_with_suffix(".csv", "ProductName,UnitsInStock\nWidget\n");
        let table = CsvParser.parse_to_raw_table(file.path()).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].values.get("UnitsInStock"), None);
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let file = temp_with_suffix(".txt", "a,b\n1,2\n");
        let result = UniversalFileParser.parse_to_raw_table(file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_json_records_orient() {
        let file = temp_with_suffix(
            ".json",
            r#"[{"SupplierID": 1, "CompanyName": "Acme"}, {"SupplierID": 2, "CompanyName": "Globex", "City": "Springfield"}]"#,
        );

        let parsed = JsonRecordParser.parse_to_raw_records(file.path()).unwrap();

        assert_eq!(parsed.records.len(), 2);
        assert!(parsed.columns.contains(&"City".to_string()));
        assert_eq!(parsed.records[1]["CompanyName"], "Globex");
    }

    #[test]
    fn test_json_columns_orient_numeric_index_order() {
        let file = temp_with_suffix(
            ".json",
            r#"{"SupplierID": {"0": 1, "2": 3, "10": 11, "1": 2}, "CompanyName": {"0": "A", "1": "B", "2": "C", "10": "K"}}"#,
        );

        let parsed = JsonRecordParser.parse_to_raw_records(file.path()).unwrap();

        let names: Vec<&str> = parsed
            .records
            .iter()
            .map(|r| r["CompanyName"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["A", "B", "C", "K"]);
    }

    #[test]
    fn test_json_malformed() {
        let file = temp_with_suffix(".json", "{not json");
        let result = JsonRecordParser.parse_to_raw_records(file.path());
        assert!(matches!(result, Err(ImportError::MalformedSource { .. })));
    }

    #[test]
    fn test_json_scalar_top_level_is_malformed() {
        let file = temp_with_suffix(".json", "42");
        let result = JsonRecordParser.parse_to_raw_records(file.path());
        assert!(matches!(result, Err(ImportError::MalformedSource { .. })));
    }
}
