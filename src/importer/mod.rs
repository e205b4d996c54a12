// ==========================================
// 产品补货看板 - 导入层
// ==========================================
// 职责: 外部数据导入,生成只读目录
// 支持: 产品 CSV/Excel, 供应商 JSON
// ==========================================

// 模块声明
pub mod catalog_loader;
pub mod catalog_loader_trait;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod schema_validator;

// 重导出核心类型
pub use catalog_loader::CatalogLoaderImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, JsonRecordParser, UniversalFileParser};
pub use schema_validator::{SchemaValidator, REQUIRED_PRODUCT_COLUMNS, REQUIRED_SUPPLIER_COLUMNS};

// 重导出 Trait 接口
pub use catalog_loader_trait::{
    CatalogLoader, FieldMapper, FileParser, RawRecords, RawRow, RawTable, RecordParser,
};
