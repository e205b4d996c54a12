// ==========================================
// 产品补货看板 - API 层
// ==========================================
// 职责: 组合引擎与网关,为表现层提供业务接口
// 架构: app（表现层动作） → api → engine / repository
// ==========================================

pub mod error;
pub mod persistence_api;
pub mod report_api;

pub use error::{ApiError, ApiResult};
pub use persistence_api::PersistenceApi;
pub use report_api::{CatalogInsights, ReportApi, ReportCharts};
