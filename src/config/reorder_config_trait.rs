// ==========================================
// 产品补货看板 - 补货配置读取 Trait
// ==========================================
// 职责: 定义补货规则/持久化所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::config_manager::ConfigResult;
use crate::domain::types::InsertMode;

// ==========================================
// ReorderConfigReader Trait
// ==========================================
// 实现者: ConfigManager, AppConfig
pub trait ReorderConfigReader: Send + Sync {
    /// 补货判定容差
    ///
    /// # 规则
    /// - 判定式: 在库 + 在途 <= 补货阈值 + 容差
    ///
    /// # 默认值
    /// - 0.0（精确比较）
    fn get_reorder_tolerance(&self) -> ConfigResult<f64>;

    /// 写入模式
    ///
    /// # 默认值
    /// - APPEND
    fn get_insert_mode(&self) -> ConfigResult<InsertMode>;
}
