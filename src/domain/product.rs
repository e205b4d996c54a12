// ==========================================
// 产品补货看板 - 产品与供应商领域模型
// ==========================================
// 用途: 导入层写入,引擎层只读
// 生命周期: 每个会话加载一次,会话结束即丢弃
// ==========================================

use crate::domain::types::SupplierId;
use serde::{Deserialize, Serialize};

// ==========================================
// ProductRecord - 产品记录
// ==========================================
// 约束: 三个数值字段在校验后均为有限非负数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: Option<String>, // 产品编号（ProductID，可缺省）
    pub product_name: String,       // 产品名称
    pub units_in_stock: f64,        // 在库数量
    pub units_on_order: f64,        // 在途数量
    pub reorder_level: f64,         // 补货阈值
    pub supplier_id: SupplierId,    // 供应商关联键
    pub row_number: usize,          // 源文件行号（表头为第 1 行）
}

// ==========================================
// SupplierRecord - 供应商记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub supplier_id: SupplierId,
    pub company_name: Option<String>,
    /// 其余描述字段（联系人、地址等），核心逻辑不使用
    #[serde(default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ==========================================
// EnrichedProduct - 关联供应商后的产品
// ==========================================
// 多对一: EnrichedProduct → SupplierRecord
// 未匹配到供应商时 company_name 为 None,不视为错误
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedProduct {
    #[serde(flatten)]
    pub product: ProductRecord,
    pub company_name: Option<String>,
}

impl EnrichedProduct {
    pub fn product_name(&self) -> &str {
        &self.product.product_name
    }

    /// 在库 + 在途
    pub fn available_units(&self) -> f64 {
        self.product.units_in_stock + self.product.units_on_order
    }
}

// ==========================================
// Catalog - 会话内只读目录
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<ProductRecord>,
    pub suppliers: Vec<SupplierRecord>,
}
