// ==========================================
// 产品补货看板 - 补货报表模型
// ==========================================
// 报表是 EnrichedProduct 的纯投影/过滤结果,不持有独立状态,按需重算
// 字段名与导出表头、文档存储键名一致
// ==========================================

use crate::domain::product::EnrichedProduct;
use serde::{Deserialize, Serialize};

/// 导出表头 / 文档键名（固定顺序）
pub const REPORT_COLUMNS: [&str; 5] = [
    "ProductName",
    "UnitsInStock",
    "UnitsOnOrder",
    "ReorderLevel",
    "CompanyName",
];

// ==========================================
// ReorderReportRow - 报表行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderReportRow {
    #[serde(rename = "ProductName")]
    pub product_name: String,
    #[serde(rename = "UnitsInStock")]
    pub units_in_stock: f64,
    #[serde(rename = "UnitsOnOrder")]
    pub units_on_order: f64,
    #[serde(rename = "ReorderLevel")]
    pub reorder_level: f64,
    #[serde(rename = "CompanyName")]
    pub company_name: Option<String>,
}

impl From<&EnrichedProduct> for ReorderReportRow {
    fn from(p: &EnrichedProduct) -> Self {
        Self {
            product_name: p.product.product_name.clone(),
            units_in_stock: p.product.units_in_stock,
            units_on_order: p.product.units_on_order,
            reorder_level: p.product.reorder_level,
            company_name: p.company_name.clone(),
        }
    }
}

impl ReorderReportRow {
    /// 转换为文档存储记录（键 = 五个投影字段名）
    pub fn to_document(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut doc = serde_json::Map::new();
        doc.insert(
            "ProductName".to_string(),
            serde_json::Value::String(self.product_name.clone()),
        );
        doc.insert("UnitsInStock".to_string(), serde_json::json!(self.units_in_stock));
        doc.insert("UnitsOnOrder".to_string(), serde_json::json!(self.units_on_order));
        doc.insert("ReorderLevel".to_string(), serde_json::json!(self.reorder_level));
        doc.insert(
            "CompanyName".to_string(),
            match &self.company_name {
                Some(name) => serde_json::Value::String(name.clone()),
                None => serde_json::Value::Null,
            },
        );
        doc
    }
}

// ==========================================
// ReorderReport - 补货报表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReorderReport {
    pub rows: Vec<ReorderReportRow>,
}

impl ReorderReport {
    pub fn new(rows: Vec<ReorderReportRow>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReorderReportRow> {
        self.rows.iter()
    }

    /// 每行一条文档记录
    pub fn to_documents(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows.iter().map(ReorderReportRow::to_document).collect()
    }
}
