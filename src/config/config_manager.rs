// ==========================================
// 产品补货看板 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 覆写顺序: 内置默认值 → JSON 配置文件 → 环境变量
// 红线: 连接凭据/路径只来自外部配置,代码中不写死
// ==========================================

use crate::config::reorder_config_trait::ReorderConfigReader;
use crate::domain::types::InsertMode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // 数据源
    pub const PRODUCTS_PATH: &str = "products_path";
    pub const SUPPLIERS_PATH: &str = "suppliers_path";

    // 文档存储
    pub const DB_PATH: &str = "db_path";
    pub const DATABASE_NAME: &str = "database_name";
    pub const COLLECTION_NAME: &str = "collection_name";
    pub const DEDUP_INSERTS: &str = "dedup_inserts";

    // 补货规则
    pub const REORDER_TOLERANCE: &str = "reorder_tolerance";

    // 界面
    pub const LOCALE: &str = "locale";

    /// 全部配置键（用于快照与环境变量映射）
    pub const ALL: [&str; 8] = [
        PRODUCTS_PATH,
        SUPPLIERS_PATH,
        DB_PATH,
        DATABASE_NAME,
        COLLECTION_NAME,
        DEDUP_INSERTS,
        REORDER_TOLERANCE,
        LOCALE,
    ];
}

/// 指向 JSON 配置文件的环境变量
pub const CONFIG_FILE_ENV: &str = "REORDER_DASHBOARD_CONFIG";

/// 环境变量前缀（键名大写后拼接）
pub const ENV_PREFIX: &str = "REORDER_DASHBOARD_";

/// 配置键 → 环境变量名
pub fn env_var_for(key: &str) -> String {
    match key {
        config_keys::DATABASE_NAME => format!("{}DATABASE", ENV_PREFIX),
        config_keys::COLLECTION_NAME => format!("{}COLLECTION", ENV_PREFIX),
        config_keys::REORDER_TOLERANCE => format!("{}TOLERANCE", ENV_PREFIX),
        _ => format!("{}{}", ENV_PREFIX, key.to_uppercase()),
    }
}

// ==========================================
// AppConfig - 解析后的强类型配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub products_path: PathBuf,
    pub suppliers_path: PathBuf,
    pub db_path: String,
    pub database_name: String,
    pub collection_name: String,
    pub dedup_inserts: bool,
    pub reorder_tolerance: f64,
    pub locale: String,
}

impl AppConfig {
    /// 文档存储中的完整集合名（database.collection）
    pub fn qualified_collection(&self) -> String {
        format!("{}.{}", self.database_name, self.collection_name)
    }

    pub fn insert_mode(&self) -> InsertMode {
        if self.dedup_inserts {
            InsertMode::Upsert
        } else {
            InsertMode::Append
        }
    }
}

impl ReorderConfigReader for AppConfig {
    fn get_reorder_tolerance(&self) -> ConfigResult<f64> {
        Ok(self.reorder_tolerance)
    }

    fn get_insert_mode(&self) -> ConfigResult<InsertMode> {
        Ok(self.insert_mode())
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    values: BTreeMap<String, String>,
}

impl ConfigManager {
    /// 从进程环境加载配置
    pub fn load() -> ConfigResult<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        let file = env
            .get(CONFIG_FILE_ENV)
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        Self::from_sources(file.as_deref(), &env)
    }

    /// 从指定配置文件与环境变量表加载（便于测试）
    ///
    /// # 参数
    /// - file: JSON 配置文件（扁平对象: 键 → 字符串/数字/布尔）
    /// - env: 环境变量表
    pub fn from_sources(file: Option<&Path>, env: &HashMap<String, String>) -> ConfigResult<Self> {
        let mut values = default_values();

        if let Some(path) = file {
            for (key, value) in read_config_file(path)? {
                if config_keys::ALL.contains(&key.as_str()) {
                    values.insert(key, value);
                } else {
                    tracing::warn!(key = %key, "忽略未知配置项");
                }
            }
        }

        for key in config_keys::ALL {
            if let Some(value) = env.get(&env_var_for(key)) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    values.insert(key.to_string(), trimmed.to_string());
                }
            }
        }

        Ok(Self { values })
    }

    /// 读取配置值
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> String {
        serde_json::to_string(&self.values).unwrap_or_else(|_| "{}".to_string())
    }

    /// 解析为强类型配置
    pub fn app_config(&self) -> ConfigResult<AppConfig> {
        let collection_name = self.require_non_empty(config_keys::COLLECTION_NAME)?;
        let database_name = self.require_non_empty(config_keys::DATABASE_NAME)?;

        Ok(AppConfig {
            products_path: PathBuf::from(self.require_non_empty(config_keys::PRODUCTS_PATH)?),
            suppliers_path: PathBuf::from(self.require_non_empty(config_keys::SUPPLIERS_PATH)?),
            db_path: self.require_non_empty(config_keys::DB_PATH)?,
            database_name,
            collection_name,
            dedup_inserts: self.parse_bool(config_keys::DEDUP_INSERTS)?,
            reorder_tolerance: self.get_reorder_tolerance()?,
            locale: self
                .get_config_value(config_keys::LOCALE)
                .unwrap_or("zh-CN")
                .to_string(),
        })
    }

    fn raw(&self, key: &str) -> String {
        self.get_config_value(key).unwrap_or_default().to_string()
    }

    fn require_non_empty(&self, key: &str) -> ConfigResult<String> {
        let value = self.raw(key);
        if value.trim().is_empty() {
            return Err(ConfigError::ConfigValueError {
                key: key.to_string(),
                value,
                message: "不能为空".to_string(),
            });
        }
        Ok(value)
    }

    fn parse_bool(&self, key: &str) -> ConfigResult<bool> {
        let value = self.raw(key);
        match value.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::ConfigValueError {
                key: key.to_string(),
                value,
                message: "期望布尔值 (true/false)".to_string(),
            }),
        }
    }
}

impl ReorderConfigReader for ConfigManager {
    fn get_reorder_tolerance(&self) -> ConfigResult<f64> {
        let value = self.raw(config_keys::REORDER_TOLERANCE);
        let invalid = |message: &str| ConfigError::ConfigValueError {
            key: config_keys::REORDER_TOLERANCE.to_string(),
            value: value.clone(),
            message: message.to_string(),
        };

        let tolerance = value
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid("无法解析为浮点数"))?;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(invalid("必须是有限非负数"));
        }
        Ok(tolerance)
    }

    fn get_insert_mode(&self) -> ConfigResult<InsertMode> {
        Ok(if self.parse_bool(config_keys::DEDUP_INSERTS)? {
            InsertMode::Upsert
        } else {
            InsertMode::Append
        })
    }
}

/// 内置默认值
fn default_values() -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();
    values.insert(config_keys::PRODUCTS_PATH.to_string(), "products.csv".to_string());
    values.insert(config_keys::SUPPLIERS_PATH.to_string(), "suppliers.json".to_string());
    values.insert(config_keys::DB_PATH.to_string(), get_default_db_path());
    values.insert(config_keys::DATABASE_NAME.to_string(), "northwind_database".to_string());
    values.insert(config_keys::COLLECTION_NAME.to_string(), "reorder_products".to_string());
    values.insert(config_keys::DEDUP_INSERTS.to_string(), "false".to_string());
    values.insert(config_keys::REORDER_TOLERANCE.to_string(), "0.0".to_string());
    values.insert(config_keys::LOCALE.to_string(), "zh-CN".to_string());
    values
}

/// 默认数据库路径: 用户数据目录下的 reorder-dashboard/reorder_dashboard.db
pub fn get_default_db_path() -> String {
    let mut path = PathBuf::from("./reorder_dashboard.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("reorder-dashboard");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("reorder_dashboard.db");
        }
    }

    path.to_string_lossy().to_string()
}

fn read_config_file(path: &Path) -> ConfigResult<BTreeMap<String, String>> {
    let file_err = |message: String| ConfigError::FileReadError {
        path: path.display().to_string(),
        message,
    };

    let text = std::fs::read_to_string(path).map_err(|e| file_err(e.to_string()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| file_err(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| file_err("顶层必须是对象".to_string()))?;

    let mut values = BTreeMap::new();
    for (key, v) in object {
        let text = match v {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            other => return Err(file_err(format!("配置项 {} 类型不支持: {}", key, other))),
        };
        values.insert(key.clone(), text);
    }
    Ok(values)
}
