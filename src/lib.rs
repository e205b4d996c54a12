// ==========================================
// 产品补货看板 - 核心库
// ==========================================
// 技术栈: Rust + SQLite(文档存储) + CSV/JSON 数据源
// 数据流: 目录导入 → 关联 → 补货规则 → {导出, 展示, 持久化}
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 产品/供应商数据源
pub mod importer;

// 引擎层 - 关联、补货规则、导出、图表数据
pub mod engine;

// 数据仓储层 - 文档存储网关
pub mod repository;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 会话与用户动作
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{InsertMode, SupplierId};

// 领域实体
pub use domain::{
    Catalog, EnrichedProduct, ProductRecord, ReorderReport, ReorderReportRow, SupplierRecord,
};

// 引擎
pub use engine::{CatalogJoiner, ChartDataBuilder, ReorderRuleEngine, ReportExporter};

// API
pub use api::{ApiError, PersistenceApi, ReportApi};

// 会话
pub use app::Session;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "产品补货看板";
