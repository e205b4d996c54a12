// ==========================================
// 产品补货看板 - 报表导出器
// ==========================================
// 格式: CSV，固定表头顺序，无行索引列
// 约束: 同一报表每次导出的字节完全相同
// 数值: 与区域设置无关，整数值保留一位小数（5 → "5.0"）
// ==========================================

use crate::domain::report::{ReorderReport, REPORT_COLUMNS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 下载文件名
pub const EXPORT_FILE_NAME: &str = "reorder_report.csv";

/// 下载媒体类型
pub const EXPORT_MIME_TYPE: &str = "text/csv";

/// 导出错误
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV 写入失败: {0}")]
    CsvWriteError(String),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvWriteError(err.to_string())
    }
}

/// 提供给表现层的下载内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDownload {
    pub file_name: String,
    pub mime_type: String,
    pub content: String,
}

pub struct ReportExporter;

impl ReportExporter {
    /// 导出为 CSV 字节
    pub fn to_csv_bytes(report: &ReorderReport) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(REPORT_COLUMNS)?;
        for row in report.iter() {
            writer.write_record([
                row.product_name.clone(),
                format_number(row.units_in_stock),
                format_number(row.units_on_order),
                format_number(row.reorder_level),
                row.company_name.clone().unwrap_or_default(),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| ExportError::CsvWriteError(e.to_string()))
    }

    /// 导出为 CSV 文本
    pub fn to_csv_string(report: &ReorderReport) -> Result<String, ExportError> {
        let bytes = Self::to_csv_bytes(report)?;
        String::from_utf8(bytes).map_err(|e| ExportError::CsvWriteError(e.to_string()))
    }

    /// 构造下载内容（固定文件名 + text/csv）
    pub fn to_download(report: &ReorderReport) -> Result<ReportDownload, ExportError> {
        Ok(ReportDownload {
            file_name: EXPORT_FILE_NAME.to_string(),
            mime_type: EXPORT_MIME_TYPE.to_string(),
            content: Self::to_csv_string(report)?,
        })
    }
}

/// 浮点数渲染: 最短可往返表示，整数值补 ".0"
pub fn format_number(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}
