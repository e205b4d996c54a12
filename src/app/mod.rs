// ==========================================
// 产品补货看板 - 应用层
// ==========================================
// 职责: 会话管理与用户动作处理,连接控制台与 API 层
// ==========================================

pub mod commands;
pub mod common;
pub mod state;

// 重导出
pub use commands::{
    dashboard_charts, download_report, insert_report, open_session, page_load, query_reorders,
    scan_lookup,
};
pub use common::{map_api_error, ErrorResponse};
pub use state::Session;
