// ==========================================
// 产品补货看板 - 引擎层
// ==========================================
// 职责: 关联、补货判定、报表导出、图表数据派生
// 红线: 引擎不直接访问数据源或数据库,只做纯计算
// ==========================================

pub mod chart_data;
pub mod exporter;
pub mod joiner;
pub mod reorder;

// 重导出核心引擎
pub use chart_data::{ChartDataBuilder, DEFAULT_HISTOGRAM_BINS};
pub use exporter::{
    format_number, ExportError, ReportDownload, ReportExporter, EXPORT_FILE_NAME, EXPORT_MIME_TYPE,
};
pub use joiner::CatalogJoiner;
pub use reorder::ReorderRuleEngine;
