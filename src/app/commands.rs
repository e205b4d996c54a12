// ==========================================
// 产品补货看板 - 表现层动作
// ==========================================
// 每个动作对应一次用户操作，返回 JSON 字符串；
// 失败时返回 ErrorResponse JSON（见 common.rs）
// ==========================================

use std::path::Path;

use serde::Serialize;

use crate::api::{ApiError, CatalogInsights, ReportCharts};
use crate::app::state::Session;
use crate::config::AppConfig;
use crate::domain::report::{ReorderReportRow, REPORT_COLUMNS};
use crate::engine::ReportDownload;
use crate::i18n::{t, t_with_args};
use crate::repository::{Document, InsertOutcome};

use super::common::{map_api_error, to_json};

// ==========================================
// 响应结构
// ==========================================

/// 页面加载结果
#[derive(Debug, Serialize)]
pub struct PageLoadResponse {
    pub title: String,
    /// 状态提示（加载成功/网关状态）
    pub messages: Vec<String>,
    pub gateway_connected: bool,
    pub columns: Vec<String>,
    pub rows: Vec<ReorderReportRow>,
    pub summary: String,
    pub charts: ReportCharts,
}

/// 导出结果
#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    #[serde(flatten)]
    pub download: ReportDownload,
    pub saved_to: Option<String>,
    pub message: Option<String>,
}

/// 写入结果
#[derive(Debug, Serialize)]
pub struct InsertResponse {
    #[serde(flatten)]
    pub outcome: InsertOutcome,
    pub message: String,
}

/// 查询结果
#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    pub records: Vec<Document>,
    pub message: Option<String>,
}

/// 看板图表
#[derive(Debug, Serialize)]
pub struct DashboardChartsResponse {
    pub report: ReportCharts,
    pub catalog: CatalogInsights,
}

// ==========================================
// 会话
// ==========================================

/// 打开会话
///
/// 失败时返回的 ErrorResponse 中 fatal = true，调用方应停止后续处理
pub fn open_session(config: AppConfig) -> Result<Session, String> {
    Session::open(config).map_err(|e| {
        tracing::error!(error = %e, "{}", t_with_args("session.load_failed", &[("error", &e.to_string())]));
        map_api_error(e)
    })
}

// ==========================================
// 报表动作
// ==========================================

/// 页面加载: 报表表格 + 图表 + 状态提示
pub fn page_load(session: &Session) -> Result<String, String> {
    let report_api = session.report_api();
    let report = report_api.reorder_report();

    let mut messages = vec![t("session.files_loaded"), t("session.types_validated")];
    match session.persistence_api() {
        Ok(_) => messages.push(t("session.gateway_connected")),
        Err(e) => messages.push(t_with_args(
            "session.gateway_unavailable",
            &[("error", &e.to_string())],
        )),
    }

    let summary = if report.is_empty() {
        t("report.none")
    } else {
        t_with_args("report.count", &[("count", &report.len().to_string())])
    };

    tracing::info!(rows = report.len(), "页面加载");

    let response = PageLoadResponse {
        title: t("report.title"),
        messages,
        gateway_connected: session.gateway_connected(),
        columns: REPORT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        charts: report_api.report_charts(),
        rows: report.rows,
        summary,
    };
    to_json(&response)
}

/// 下载报表
///
/// # 参数
/// - target: 可选的保存路径；为 None 时只返回下载内容
pub fn download_report(session: &Session, target: Option<&Path>) -> Result<String, String> {
    let download = session.report_api().export_report().map_err(map_api_error)?;

    let (saved_to, message) = match target {
        Some(path) => {
            std::fs::write(path, download.content.as_bytes()).map_err(|e| {
                map_api_error(ApiError::ExportFailed(format!("{}: {}", path.display(), e)))
            })?;
            let shown = path.display().to_string();
            tracing::info!(path = %shown, "报表已保存");
            let message = t_with_args("export.saved", &[("path", &shown)]);
            (Some(shown), Some(message))
        }
        None => (None, None),
    };

    to_json(&DownloadResponse {
        download,
        saved_to,
        message,
    })
}

/// 看板图表: 报表图表 + 全目录分析
pub fn dashboard_charts(session: &Session) -> Result<String, String> {
    let report_api = session.report_api();
    to_json(&DashboardChartsResponse {
        report: report_api.report_charts(),
        catalog: report_api.catalog_insights(),
    })
}

// ==========================================
// 持久化动作（失败只影响当次动作）
// ==========================================

/// 写入报表到文档存储
pub fn insert_report(session: &Session) -> Result<String, String> {
    let api = session.persistence_api().map_err(map_api_error)?;
    let report = session.report_api().reorder_report();
    let outcome = api.insert_report(&report).map_err(map_api_error)?;

    let message = t_with_args(
        "gateway.inserted",
        &[
            ("inserted", &outcome.inserted.to_string()),
            ("skipped", &outcome.skipped.to_string()),
        ],
    );
    to_json(&InsertResponse { outcome, message })
}

/// 查询已写入的补货记录
pub fn query_reorders(session: &Session) -> Result<String, String> {
    let api = session.persistence_api().map_err(map_api_error)?;
    let records = api.query_reorders().map_err(map_api_error)?;

    let message = records.is_empty().then(|| t("gateway.query_empty"));
    to_json(&RecordsResponse { records, message })
}

/// 扫码查单
///
/// # 参数
/// - payload: 二维码解码后的文本（即产品名）
pub fn scan_lookup(session: &Session, payload: &str) -> Result<String, String> {
    let api = session.persistence_api().map_err(map_api_error)?;
    let records = api.lookup_scanned(payload).map_err(map_api_error)?;

    let message = records
        .is_empty()
        .then(|| t_with_args("scan.no_match", &[("payload", payload.trim())]));
    to_json(&RecordsResponse { records, message })
}
