// ==========================================
// 产品补货看板 - 配置层
// ==========================================
// 职责: 系统配置管理,支持 默认值/配置文件/环境变量 多级覆写
// ==========================================

pub mod config_manager;
pub mod reorder_config_trait;

// 重导出核心配置管理器
pub use config_manager::{
    config_keys, get_default_db_path, AppConfig, ConfigError, ConfigManager, ConfigResult,
};
pub use reorder_config_trait::ReorderConfigReader;
