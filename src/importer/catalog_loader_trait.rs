// ==========================================
// 产品补货看板 - 目录导入 Trait
// ==========================================
// 职责: 定义目录导入接口（不包含实现）
// ==========================================

use crate::domain::product::{Catalog, ProductRecord, SupplierRecord};
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// 原始表结构
// ==========================================

/// 原始行（列名 → 单元格文本）
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 源文件行号（表头为第 1 行）
    pub row_number: usize,
    pub values: HashMap<String, String>,
}

/// 表格型数据源解析结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// 表头（去除首尾空白，保持源顺序）
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// 记录型数据源（JSON）解析结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecords {
    /// 所有记录中出现过的字段
    pub columns: Vec<String>,
    pub records: Vec<serde_json::Map<String, serde_json::Value>>,
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 表格文件解析接口（产品源）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 行记录（完全空白行已跳过）
    /// - Err: SourceUnavailable / UnsupportedFormat / MalformedSource
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// RecordParser Trait
// ==========================================
// 用途: 记录型文件解析接口（供应商源）
// 实现者: JsonRecordParser
pub trait RecordParser: Send + Sync {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<RawRecords>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射 + 数值类型转换
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 将原始行映射为 ProductRecord
    ///
    /// # 返回
    /// - Err(TypeValidationError): 数值字段无法转换为有限非负浮点数
    fn map_to_product(&self, row: &RawRow) -> ImportResult<ProductRecord>;

    /// 将 JSON 记录映射为 SupplierRecord
    ///
    /// # 参数
    /// - index: 记录在源中的序号（从 0 开始，用于日志定位）
    ///
    /// # 返回
    /// - None: 供应商键缺失或无法作为键（该记录不参与关联）
    fn map_to_supplier(
        &self,
        record: &serde_json::Map<String, serde_json::Value>,
        index: usize,
    ) -> Option<SupplierRecord>;
}

// ==========================================
// CatalogLoader Trait
// ==========================================
// 用途: 目录导入主接口
// 实现者: CatalogLoaderImpl
pub trait CatalogLoader: Send + Sync {
    /// 加载产品与供应商目录
    ///
    /// # 导入流程
    /// 1. 两个数据源存在性检查
    /// 2. 文件解析
    /// 3. 必需字段校验
    /// 4. 字段映射与数值转换
    ///
    /// # 返回
    /// - Ok(Catalog): 校验通过的只读目录
    /// - Err: 任一阶段失败即终止（无部分结果）
    fn load(&self, products_path: &Path, suppliers_path: &Path) -> ImportResult<Catalog>;
}
