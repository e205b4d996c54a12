use crate::api::error::ApiError;
use serde::{Deserialize, Serialize};

// ==========================================
// 公共工具：错误映射、序列化
// ==========================================

/// 错误响应（返回给表现层）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,

    /// 是否终止会话
    pub fatal: bool,

    /// 详细信息（可选）
    pub details: Option<serde_json::Value>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        ErrorResponse {
            code: match err {
                ApiError::SourceUnavailable(_) => "SOURCE_UNAVAILABLE",
                ApiError::MalformedSource(_) => "MALFORMED_SOURCE",
                ApiError::SchemaViolation { .. } => "SCHEMA_VIOLATION",
                ApiError::TypeValidationError(_) => "TYPE_VALIDATION_ERROR",
                ApiError::GatewayUnavailable(_) => "GATEWAY_UNAVAILABLE",
                ApiError::InvalidInput(_) => "INVALID_INPUT",
                ApiError::ExportFailed(_) => "EXPORT_FAILED",
                ApiError::ConfigError(_) => "CONFIG_ERROR",
                ApiError::InternalError(_) => "INTERNAL_ERROR",
            }
            .to_string(),
            message: err.to_string(),
            fatal: err.is_fatal(),
            details: match err {
                ApiError::SchemaViolation {
                    source_name,
                    missing,
                } => Some(serde_json::json!({
                    "source": source_name,
                    "missing": missing,
                })),
                _ => None,
            },
        }
    }
}

/// 将ApiError转换为JSON字符串
pub fn map_api_error(err: ApiError) -> String {
    serde_json::to_string(&ErrorResponse::from(&err)).unwrap_or_else(|_| err.to_string())
}

/// 序列化动作结果
pub(super) fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value)
        .map_err(|e| map_api_error(ApiError::InternalError(format!("序列化失败: {}", e))))
}
