// ==========================================
// 产品补货看板 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，把导入层/网关层错误转换为用户可读的消息
// 传播策略:
// - 导入类错误（数据源/结构/类型）对会话致命
// - 网关错误只作用于当次操作
// ==========================================

use crate::config::ConfigError;
use crate::engine::ExportError;
use crate::importer::ImportError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 加载错误（会话致命）
    // ==========================================
    #[error("数据源不存在: {0}")]
    SourceUnavailable(String),

    #[error("数据源解析失败: {0}")]
    MalformedSource(String),

    #[error("{source_name} 缺少必需字段: {}", .missing.join(", "))]
    SchemaViolation {
        source_name: String,
        missing: Vec<String>,
    },

    #[error("数据类型校验失败: {0}")]
    TypeValidationError(String),

    // ==========================================
    // 网关错误（仅影响当次操作）
    // ==========================================
    #[error("文档存储不可用: {0}")]
    GatewayUnavailable(String),

    // ==========================================
    // 业务/输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("报表导出失败: {0}")]
    ExportFailed(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 是否为会话致命错误（表现层应停止后续处理）
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ApiError::SourceUnavailable(_)
                | ApiError::MalformedSource(_)
                | ApiError::SchemaViolation { .. }
                | ApiError::TypeValidationError(_)
                | ApiError::ConfigError(_)
        )
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::SourceUnavailable(path) => ApiError::SourceUnavailable(path),
            ImportError::UnsupportedFormat(_) | ImportError::MalformedSource { .. } => {
                ApiError::MalformedSource(err.to_string())
            }
            ImportError::SchemaViolation {
                source_name,
                missing,
            } => ApiError::SchemaViolation {
                source_name,
                missing,
            },
            ImportError::TypeValidationError { .. } => ApiError::TypeValidationError(err.to_string()),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// 所有网关故障对调用方都是 GatewayUnavailable
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        ApiError::GatewayUnavailable(err.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::ExportFailed(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
