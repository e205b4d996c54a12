// ==========================================
// 产品补货看板 - 数据源结构校验
// ==========================================
// 职责: 在字段映射前检查必需列是否齐全
// 红线: 缺列一次性全部报告,不逐列失败
// ==========================================

use crate::importer::error::{ImportError, ImportResult};

/// 产品源列名
pub mod product_columns {
    pub const PRODUCT_ID: &str = "ProductID";
    pub const PRODUCT_NAME: &str = "ProductName";
    pub const UNITS_IN_STOCK: &str = "UnitsInStock";
    pub const UNITS_ON_ORDER: &str = "UnitsOnOrder";
    pub const REORDER_LEVEL: &str = "ReorderLevel";
    pub const SUPPLIER_ID: &str = "SupplierID";
}

/// 供应商源列名
pub mod supplier_columns {
    pub const SUPPLIER_ID: &str = "SupplierID";
    pub const COMPANY_NAME: &str = "CompanyName";
}

/// 产品源必需列（下游报表/关联所需）
pub const REQUIRED_PRODUCT_COLUMNS: [&str; 5] = [
    product_columns::PRODUCT_NAME,
    product_columns::UNITS_IN_STOCK,
    product_columns::REORDER_LEVEL,
    product_columns::UNITS_ON_ORDER,
    product_columns::SUPPLIER_ID,
];

/// 供应商源必需列
pub const REQUIRED_SUPPLIER_COLUMNS: [&str; 2] =
    [supplier_columns::SUPPLIER_ID, supplier_columns::COMPANY_NAME];

pub struct SchemaValidator;

impl SchemaValidator {
    /// 返回缺失的必需列（保持必需列定义顺序）
    pub fn missing_columns<S: AsRef<str>>(columns: &[S], required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|req| !columns.iter().any(|c| c.as_ref() == **req))
            .map(|req| req.to_string())
            .collect()
    }

    /// 校验产品源表头
    pub fn validate_product_headers<S: AsRef<str>>(
        headers: &[S],
        source_name: &str,
    ) -> ImportResult<()> {
        Self::check(headers, &REQUIRED_PRODUCT_COLUMNS, source_name)
    }

    /// 校验供应商源字段
    pub fn validate_supplier_columns<S: AsRef<str>>(
        columns: &[S],
        source_name: &str,
    ) -> ImportResult<()> {
        Self::check(columns, &REQUIRED_SUPPLIER_COLUMNS, source_name)
    }

    fn check<S: AsRef<str>>(columns: &[S], required: &[&str], source_name: &str) -> ImportResult<()> {
        let missing = Self::missing_columns(columns, required);
        if missing.is_empty() {
            return Ok(());
        }

        tracing::warn!(source = source_name, missing = ?missing, "必需字段缺失");
        Err(ImportError::SchemaViolation {
            source_name: source_name.to_string(),
            missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_columns_present() {
        let headers = vec![
            "ProductID",
            "ProductName",
            "SupplierID",
            "UnitsInStock",
            "UnitsOnOrder",
            "ReorderLevel",
        ];
        assert!(SchemaValidator::validate_product_headers(&headers, "p.csv").is_ok());
    }

    #[test]
    fn test_missing_reorder_level_is_named() {
        let headers = vec!["ProductName", "SupplierID", "UnitsInStock", "UnitsOnOrder"];
        let err = SchemaValidator::validate_product_headers(&headers, "p.csv").unwrap_err();
        match err {
            ImportError::SchemaViolation { missing, .. } => {
                assert_eq!(missing, vec!["ReorderLevel".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_columns_reported_together() {
        let headers: Vec<String> = vec!["ProductName".to_string()];
        let missing = SchemaValidator::missing_columns(&headers, &REQUIRED_PRODUCT_COLUMNS);
        assert_eq!(missing.len(), 4);
    }

    #[test]
    fn test_supplier_missing_company_name() {
        let columns = vec!["SupplierID", "ContactName"];
        let err = SchemaValidator::validate_supplier_columns(&columns, "s.json").unwrap_err();
        assert!(err.to_string().contains("CompanyName"));
    }
}
