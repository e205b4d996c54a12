// ==========================================
// 产品补货看板 - 领域模型层
// ==========================================
// 职责: 定义领域实体与值类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod chart;
pub mod product;
pub mod report;
pub mod types;

// 重导出核心类型
pub use chart::{BarChartPoint, HistogramBin, ReorderVsStockPoint, ScatterPoint, SupplierActivity};
pub use product::{Catalog, EnrichedProduct, ProductRecord, SupplierRecord};
pub use report::{ReorderReport, ReorderReportRow, REPORT_COLUMNS};
pub use types::{InsertMode, SupplierId};
