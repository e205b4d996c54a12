// ==========================================
// 产品补货看板 - 数据仓储层（文档存储网关）
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供报表持久化/查询接口,屏蔽存储细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod document_store;
pub mod error;
pub mod reorder_gateway;

// 重导出核心仓储
pub use document_store::SqliteDocumentStore;
pub use error::{RepositoryError, RepositoryResult};
pub use reorder_gateway::{snapshot_id_for, Document, InsertOutcome, ReorderGateway, StoredDocument};
