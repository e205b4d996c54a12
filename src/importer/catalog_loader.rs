// ==========================================
// 产品补货看板 - 目录导入器实现
// ==========================================
// 职责: 整合导入流程，从两个数据源到只读目录
// 流程: 存在性检查 → 解析 → 结构校验 → 映射/数值转换
// 约束: 不重试；任一失败直接返回给调用方（表现层负责终止会话）
// ==========================================

use crate::domain::product::Catalog;
use crate::importer::catalog_loader_trait::{CatalogLoader, FieldMapper, FileParser, RecordParser};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::{JsonRecordParser, UniversalFileParser};
use crate::importer::schema_validator::SchemaValidator;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

// ==========================================
// CatalogLoaderImpl - 目录导入器实现
// ==========================================
pub struct CatalogLoaderImpl {
    product_parser: Box<dyn FileParser>,
    supplier_parser: Box<dyn RecordParser>,
    field_mapper: Box<dyn FieldMapper>,
}

impl CatalogLoaderImpl {
    /// 使用自定义组件创建导入器
    pub fn new(
        product_parser: Box<dyn FileParser>,
        supplier_parser: Box<dyn RecordParser>,
        field_mapper: Box<dyn FieldMapper>,
    ) -> Self {
        Self {
            product_parser,
            supplier_parser,
            field_mapper,
        }
    }
}

impl Default for CatalogLoaderImpl {
    fn default() -> Self {
        Self::new(
            Box::new(UniversalFileParser),
            Box::new(JsonRecordParser),
            Box::new(FieldMapperImpl),
        )
    }
}

impl CatalogLoader for CatalogLoaderImpl {
    #[instrument(skip(self), fields(products = %products_path.display(), suppliers = %suppliers_path.display()))]
    fn load(&self, products_path: &Path, suppliers_path: &Path) -> ImportResult<Catalog> {
        let start_time = Instant::now();

        // === 步骤 1: 存在性检查（两个源都先检查，再解析）===
        for path in [products_path, suppliers_path] {
            if !path.exists() {
                error!(path = %path.display(), "数据源不存在");
                return Err(ImportError::SourceUnavailable(path.display().to_string()));
            }
        }

        // === 步骤 2: 解析 ===
        debug!("步骤 2: 解析文件");
        let product_table = self.product_parser.parse_to_raw_table(products_path)?;
        let supplier_records = self.supplier_parser.parse_to_raw_records(suppliers_path)?;

        // === 步骤 3: 结构校验 ===
        debug!("步骤 3: 必需字段校验");
        SchemaValidator::validate_product_headers(
            &product_table.headers,
            &products_path.display().to_string(),
        )?;
        if !supplier_records.records.is_empty() {
            SchemaValidator::validate_supplier_columns(
                &supplier_records.columns,
                &suppliers_path.display().to_string(),
            )?;
        }

        // === 步骤 4: 字段映射与数值转换 ===
        debug!("步骤 4: 字段映射");
        let products = product_table
            .rows
            .iter()
            .map(|row| self.field_mapper.map_to_product(row))
            .collect::<ImportResult<Vec<_>>>()?;

        let suppliers: Vec<_> = supplier_records
            .records
            .iter()
            .enumerate()
            .filter_map(|(idx, record)| self.field_mapper.map_to_supplier(record, idx))
            .collect();
        let skipped = supplier_records.records.len() - suppliers.len();
        if skipped > 0 {
            warn!(skipped, "部分供应商记录缺少有效键，已跳过");
        }

        info!(
            products = products.len(),
            suppliers = suppliers.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "目录加载完成"
        );

        Ok(Catalog {
            products,
            suppliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const PRODUCTS: &str = "ProductID,ProductName,SupplierID,UnitsInStock,UnitsOnOrder,ReorderLevel\n\
                            1,Widget,1,5,2,10\n\
                            2,Gadget,2,20,0,5\n";
    const SUPPLIERS: &str = r#"[{"SupplierID":1,"CompanyName":"Acme"},{"SupplierID":2,"CompanyName":"Globex"}]"#;

    #[test]
    fn test_load_ok() {
        let products = write_temp(".csv", PRODUCTS);
        let suppliers = write_temp(".json", SUPPLIERS);

        let catalog = CatalogLoaderImpl::default()
            .load(products.path(), suppliers.path())
            .unwrap();

        assert_eq!(catalog.products.len(), 2);
        assert_eq!(catalog.suppliers.len(), 2);
        assert_eq!(catalog.products[1].units_in_stock, 20.0);
    }

    #[test]
    fn test_missing_supplier_source() {
        let products = write_temp(".csv", PRODUCTS);
        let err = CatalogLoaderImpl::default()
            .load(products.path(), Path::new("/nonexistent/suppliers.json"))
            .unwrap_err();
        assert!(matches!(err, ImportError::SourceUnavailable(_)));
    }

    #[test]
    fn test_schema_checked_before_coercion() {
        // 缺 ReorderLevel 且数值非法：应报结构错误而不是类型错误
        let products = write_temp(
            ".csv",
            "ProductName,SupplierID,UnitsInStock,UnitsOnOrder\nWidget,1,abc,2\n",
        );
        let suppliers = write_temp(".json", SUPPLIERS);

        let err = CatalogLoaderImpl::default()
            .load(products.path(), suppliers.path())
            .unwrap_err();
        match err {
            ImportError::SchemaViolation { missing, .. } => {
                assert_eq!(missing, vec!["ReorderLevel".to_string()])
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bad_number_fails_whole_load() {
        let products = write_temp(
            ".csv",
            "ProductName,SupplierID,UnitsInStock,UnitsOnOrder,ReorderLevel\nWidget,1,5,2,10\nGadget,2,x,0,5\n",
        );
        let suppliers = write_temp(".json", SUPPLIERS);

        let err = CatalogLoaderImpl::default()
            .load(products.path(), suppliers.path())
            .unwrap_err();
        assert!(matches!(err, ImportError::TypeValidationError { row: 3, .. }));
    }

    #[test]
    fn test_null_supplier_key_does_not_fail_load() {
        let products = write_temp(".csv", PRODUCTS);
        let suppliers = write_temp(
            ".json",
            r#"[{"SupplierID":1,"CompanyName":"Acme"},{"SupplierID":null,"CompanyName":"Ghost"}]"#,
        );

        let catalog = CatalogLoaderImpl::default()
            .load(products.path(), suppliers.path())
            .unwrap();
        assert_eq!(catalog.products.len(), 2);
        assert_eq!(catalog.suppliers.len(), 1);
        assert_eq!(catalog.suppliers[0].company_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_extra_csv_fields_are_malformed() {
        let products = write_temp(
            ".csv",
            "ProductName,SupplierID,UnitsInStock,UnitsOnOrder,ReorderLevel\nWidget,1,5,2,10,999,junk\n",
        );
        let suppliers = write_temp(".json", SUPPLIERS);

        let err = CatalogLoaderImpl::default()
            .load(products.path(), suppliers.path())
            .unwrap_err();
        assert!(matches!(err, ImportError::MalformedSource { .. }));
    }

    #[test]
    fn test_empty_product_file_is_malformed() {
        let products = write_temp(".csv", "");
        let suppliers = write_temp(".json", SUPPLIERS);

        let err = CatalogLoaderImpl::default()
            .load(products.path(), suppliers.path())
            .unwrap_err();
        assert!(matches!(err, ImportError::MalformedSource { .. }));
    }

    #[test]
    fn test_empty_supplier_list_is_allowed() {
        let products = write_temp(".csv", PRODUCTS);
        let suppliers = write_temp(".json", "[]");

        let catalog = CatalogLoaderImpl::default()
            .load(products.path(), suppliers.path())
            .unwrap();
        assert!(catalog.suppliers.is_empty());
    }
}
