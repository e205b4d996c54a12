// ==========================================
// 产品补货看板 - 字段映射器实现
// ==========================================
// 职责: 源字段 → 领域字段映射 + 数值类型转换
// 约束: 任一数值字段转换失败即整体失败（无行级恢复）
// ==========================================

use crate::domain::product::{ProductRecord, SupplierRecord};
use crate::domain::types::SupplierId;
use crate::importer::catalog_loader_trait::{FieldMapper as FieldMapperTrait, RawRow};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::schema_validator::{product_columns, supplier_columns};
use serde_json::{Map, Value};

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_to_product(&self, row: &RawRow) -> ImportResult<ProductRecord> {
        let supplier_raw = self.get_string(row, product_columns::SUPPLIER_ID);

        Ok(ProductRecord {
            product_id: self.get_string(row, product_columns::PRODUCT_ID),
            product_name: self
                .get_string(row, product_columns::PRODUCT_NAME)
                .unwrap_or_default(),
            units_in_stock: self.parse_quantity(row, product_columns::UNITS_IN_STOCK)?,
            units_on_order: self.parse_quantity(row, product_columns::UNITS_ON_ORDER)?,
            reorder_level: self.parse_quantity(row, product_columns::REORDER_LEVEL)?,
            supplier_id: SupplierId::from_raw(supplier_raw.as_deref().unwrap_or("")),
            row_number: row.row_number,
        })
    }

    fn map_to_supplier(&self, record: &Map<String, Value>, index: usize) -> Option<SupplierRecord> {
        let raw_id = record
            .get(supplier_columns::SUPPLIER_ID)
            .unwrap_or(&Value::Null);
        let Some(supplier_id) = SupplierId::from_json(raw_id) else {
            tracing::warn!(index, value = %raw_id, "供应商键为空或无法作为键，该记录不参与关联");
            return None;
        };

        let company_name = match record.get(supplier_columns::COMPANY_NAME) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };

        let extra = record
            .iter()
            .filter(|(k, _)| {
                k.as_str() != supplier_columns::SUPPLIER_ID
                    && k.as_str() != supplier_columns::COMPANY_NAME
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Some(SupplierRecord {
            supplier_id,
            company_name,
            extra,
        })
    }
}

impl FieldMapper {
    /// 提取字符串字段（空白视为缺失）
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        row.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    }

    /// 解析数量字段: 必须是有限非负浮点数
    fn parse_quantity(&self, row: &RawRow, key: &str) -> ImportResult<f64> {
        let raw = row.values.get(key).map(|v| v.trim()).unwrap_or("");
        let fail = |message: &str| ImportError::TypeValidationError {
            row: row.row_number,
            field: key.to_string(),
            value: raw.to_string(),
            message: message.to_string(),
        };

        if raw.is_empty() {
            return Err(fail("数值为空"));
        }

        let value = raw.parse::<f64>().map_err(|_| fail("无法解析为浮点数"))?;
        if !value.is_finite() {
            return Err(fail("数值必须是有限数"));
        }
        if value < 0.0 {
            return Err(fail("数值不能为负"));
        }

        Ok(value)
    }
}
