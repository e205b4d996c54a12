// ==========================================
// 产品补货看板 - SQLite 文档存储
// ==========================================
// 职责: 以 documents 表模拟命名集合,实现 ReorderGateway
// 红线: 不含业务逻辑,只负责数据访问
// 约束: 所有查询使用参数化
// ==========================================

use crate::db::{configure_sqlite_connection, init_document_schema, open_sqlite_connection};
use crate::domain::types::InsertMode;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::reorder_gateway::{Document, InsertOutcome, ReorderGateway, StoredDocument};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// SqliteDocumentStore - 文档集合仓储
// ==========================================
pub struct SqliteDocumentStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDocumentStore {
    /// 打开数据库并初始化 schema
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(format!("{}: {}", db_path, e)))?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建仓储实例
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA 并建表（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
            init_document_schema(&guard)?;
        }
        Ok(Self { conn })
    }

    /// 内存库（测试/演示）
    pub fn in_memory() -> RepositoryResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn query_documents(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> RepositoryResult<Vec<StoredDocument>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(sql)?;

        let rows = stmt
            .query_map(params, |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        rows.into_iter()
            .map(|(doc_key, collection, snapshot_id, inserted_at, payload)| {
                let inserted_at = DateTime::parse_from_rfc3339(&inserted_at)
                    .map_err(|e| RepositoryError::FieldValueError {
                        field: "inserted_at".to_string(),
                        message: e.to_string(),
                    })?
                    .with_timezone(&Utc);
                let body: Document = serde_json::from_str(&payload)?;
                Ok(StoredDocument {
                    doc_key,
                    collection,
                    snapshot_id,
                    inserted_at,
                    body,
                })
            })
            .collect()
    }
}

fn document_product_name(doc: &Document) -> Option<String> {
    doc.get("ProductName")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

impl ReorderGateway for SqliteDocumentStore {
    fn ping(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    fn insert_many(
        &self,
        collection: &str,
        documents: &[Document],
        mode: InsertMode,
        snapshot_id: &str,
    ) -> RepositoryResult<InsertOutcome> {
        if collection.trim().is_empty() {
            return Err(RepositoryError::FieldValueError {
                field: "collection".to_string(),
                message: "集合名不能为空".to_string(),
            });
        }

        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        let inserted_at = Utc::now().to_rfc3339();

        let mut inserted = 0;
        let mut skipped = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO documents (
                    collection, doc_key, snapshot_id, product_name, payload_json, inserted_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT(collection, doc_key) DO NOTHING
                "#,
            )?;

            for (idx, doc) in documents.iter().enumerate() {
                let product_name = document_product_name(doc);
                let doc_key = match mode {
                    InsertMode::Append => Uuid::new_v4().to_string(),
                    InsertMode::Upsert => format!(
                        "{}/{}/{}",
                        snapshot_id,
                        idx,
                        product_name.as_deref().unwrap_or("")
                    ),
                };
                let payload = serde_json::to_string(doc)?;

                let changed = stmt.execute(params![
                    collection,
                    doc_key,
                    snapshot_id,
                    product_name,
                    payload,
                    inserted_at,
                ])?;
                if changed == 0 {
                    skipped += 1;
                } else {
                    inserted += changed;
                }
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tracing::info!(
            collection,
            mode = %mode,
            inserted,
            skipped,
            "文档批量写入完成"
        );

        Ok(InsertOutcome {
            mode,
            snapshot_id: snapshot_id.to_string(),
            inserted,
            skipped,
        })
    }

    fn find_all(&self, collection: &str) -> RepositoryResult<Vec<StoredDocument>> {
        self.query_documents(
            r#"
            SELECT doc_key, collection, snapshot_id, inserted_at, payload_json
            FROM documents
            WHERE collection = ?1
            ORDER BY seq ASC
            "#,
            &[&collection],
        )
    }

    fn find_by_product_name(
        &self,
        collection: &str,
        product_name: &str,
    ) -> RepositoryResult<Vec<StoredDocument>> {
        self.query_documents(
            r#"
            SELECT doc_key, collection, snapshot_id, inserted_at, payload_json
            FROM documents
            WHERE collection = ?1 AND product_name = ?2
            ORDER BY seq ASC
            "#,
            &[&collection, &product_name],
        )
    }

    fn count(&self, collection: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
