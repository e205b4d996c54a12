// ==========================================
// 产品补货看板 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约定: 导入层任何错误对当前会话都是致命的,不做重试
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("数据源不存在: {0}")]
    SourceUnavailable(String),

    #[error("文件格式不支持: {0}（产品仅支持 .csv/.xlsx/.xls，供应商仅支持 .json）")]
    UnsupportedFormat(String),

    #[error("数据源解析失败 ({source_name}): {message}")]
    MalformedSource {
        source_name: String,
        message: String,
    },

    // ===== 结构校验错误 =====
    #[error("{source_name} 缺少必需字段: {}", .missing.join(", "))]
    SchemaViolation {
        source_name: String,
        missing: Vec<String>,
    },

    // ===== 类型转换错误 =====
    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}，实际值 '{value}'")]
    TypeValidationError {
        row: usize,
        field: String,
        value: String,
        message: String,
    },
}

impl ImportError {
    /// 便捷构造: 解析失败
    pub fn malformed(source_name: impl Into<String>, message: impl ToString) -> Self {
        ImportError::MalformedSource {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ImportError::SourceUnavailable(err.to_string()),
            _ => ImportError::malformed("io", err),
        }
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::malformed("csv", err)
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::malformed("excel", err)
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::malformed("json", err)
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
