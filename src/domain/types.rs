// ==========================================
// 产品补货看板 - 领域类型定义
// ==========================================
// 职责: 供应商键、写入模式等值类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 供应商键 (Supplier Id)
// ==========================================
// 关联键按规范化文本精确比较:
// - 整数值（含 "1"、"1.0"、JSON 数字 1）统一为 "1"
// - 其他值保留去除首尾空白后的原文
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(String);

impl SupplierId {
    /// 从源文本构造（CSV 单元格 / Excel 单元格）
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                SupplierId(format!("{}", v as i64))
            }
            _ => SupplierId(trimmed.to_string()),
        }
    }

    /// 从 JSON 值构造（供应商 JSON 源）
    ///
    /// # 返回
    /// - None: null / 数组 / 对象 等无法作为键的值
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self::from_raw(s)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(SupplierId(i.to_string()))
                } else if let Some(u) = n.as_u64() {
                    Some(SupplierId(u.to_string()))
                } else {
                    n.as_f64().map(|f| Self::from_raw(&f.to_string()))
                }
            }
            serde_json::Value::Bool(b) => Some(SupplierId(b.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SupplierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==========================================
// 写入模式 (Insert Mode)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与配置/数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsertMode {
    Append, // 盲写，每次提交都生成新记录
    Upsert, // 按 (产品名, 报表快照) 覆盖写
}

impl InsertMode {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            InsertMode::Append => "APPEND",
            InsertMode::Upsert => "UPSERT",
        }
    }
}

impl fmt::Display for InsertMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_supplier_id_normalizes_integers() {
        assert_eq!(SupplierId::from_raw("1"), SupplierId::from_raw(" 1.0 "));
        assert_eq!(SupplierId::from_json(&json!(1)), Some(SupplierId::from_raw("1")));
        assert_eq!(SupplierId::from_json(&json!("7")), Some(SupplierId::from_raw("7.0")));
    }

    #[test]
    fn test_supplier_id_keeps_text_keys() {
        assert_eq!(SupplierId::from_raw("ACME-01").as_str(), "ACME-01");
        assert_ne!(SupplierId::from_raw("1.5"), SupplierId::from_raw("1"));
        assert_eq!(SupplierId::from_json(&json!(null)), None);
    }
}
