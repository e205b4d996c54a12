// ==========================================
// 产品补货看板 - 文档存储网关接口
// ==========================================
// 职责: 接收报表记录批量写入命名集合,并应答查询
// 红线: 网关不含业务逻辑,只负责数据访问
// ==========================================

use crate::domain::types::InsertMode;
use crate::repository::error::RepositoryResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// 文档记录（键 = 报表字段名）
pub type Document = Map<String, Value>;

/// 已存储的文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub doc_key: String,
    pub collection: String,
    pub snapshot_id: Option<String>,
    pub inserted_at: DateTime<Utc>,
    pub body: Document,
}

impl StoredDocument {
    /// 转换为展示用记录: 文档字段 + "_id"
    pub fn to_record(&self) -> Document {
        let mut record = self.body.clone();
        record.insert("_id".to_string(), Value::String(self.doc_key.clone()));
        record
    }
}

/// 批量写入结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertOutcome {
    pub mode: InsertMode,
    /// 报表内容快照 ID（同一报表内容始终相同）
    pub snapshot_id: String,
    /// 新写入条数
    pub inserted: usize,
    /// 因键已存在而跳过的条数（仅 UPSERT 模式）
    pub skipped: usize,
}

/// 报表内容快照 ID: 导出字节的 UUID v5 摘要
pub fn snapshot_id_for(export_bytes: &[u8]) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, export_bytes).to_string()
}

// ==========================================
// ReorderGateway Trait
// ==========================================
// 实现者: SqliteDocumentStore
pub trait ReorderGateway: Send + Sync {
    /// 连通性检查
    fn ping(&self) -> RepositoryResult<()>;

    /// 批量写入（单事务）
    ///
    /// # 参数
    /// - collection: 集合名
    /// - documents: 文档列表（报表行顺序）
    /// - mode: APPEND 每次生成新键；UPSERT 以 (快照, 行序, 产品名) 为键，已存在则跳过
    /// - snapshot_id: 报表内容快照 ID
    fn insert_many(
        &self,
        collection: &str,
        documents: &[Document],
        mode: InsertMode,
        snapshot_id: &str,
    ) -> RepositoryResult<InsertOutcome>;

    /// 查询集合中全部文档（写入顺序）
    fn find_all(&self, collection: &str) -> RepositoryResult<Vec<StoredDocument>>;

    /// 按产品名查询（扫码查单）
    fn find_by_product_name(
        &self,
        collection: &str,
        product_name: &str,
    ) -> RepositoryResult<Vec<StoredDocument>>;

    /// 集合文档数
    fn count(&self, collection: &str) -> RepositoryResult<usize>;
}
