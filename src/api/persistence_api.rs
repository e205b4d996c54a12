// ==========================================
// 产品补货看板 - 持久化 API
// ==========================================
// 职责: 报表写入文档存储、查询已写入记录、扫码查单
// 约束: 网关失败只返回错误,不重试,不影响已计算的报表
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::report::ReorderReport;
use crate::domain::types::InsertMode;
use crate::engine::ReportExporter;
use crate::repository::{snapshot_id_for, Document, InsertOutcome, ReorderGateway};
use std::sync::Arc;
use tracing::{info, warn};

pub struct PersistenceApi {
    gateway: Arc<dyn ReorderGateway>,
    collection: String,
    insert_mode: InsertMode,
}

impl PersistenceApi {
    /// 创建持久化 API
    ///
    /// # 参数
    /// - gateway: 文档存储网关
    /// - collection: 目标集合名
    /// - insert_mode: 写入模式
    pub fn new(gateway: Arc<dyn ReorderGateway>, collection: String, insert_mode: InsertMode) -> Self {
        Self {
            gateway,
            collection,
            insert_mode,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// 连通性检查
    pub fn ping(&self) -> ApiResult<()> {
        self.gateway.ping().map_err(|e| {
            warn!(error = %e, "文档存储连通性检查失败");
            ApiError::from(e)
        })
    }

    /// 写入补货报表（每行一条文档）
    pub fn insert_report(&self, report: &ReorderReport) -> ApiResult<InsertOutcome> {
        if report.is_empty() {
            return Err(ApiError::InvalidInput("报表为空，无需写入".to_string()));
        }

        let snapshot_id = snapshot_id_for(&ReportExporter::to_csv_bytes(report)?);
        let documents = report.to_documents();

        info!(
            collection = %self.collection,
            rows = documents.len(),
            mode = %self.insert_mode,
            snapshot_id = %snapshot_id,
            "写入补货报表"
        );

        self.gateway
            .insert_many(&self.collection, &documents, self.insert_mode, &snapshot_id)
            .map_err(|e| {
                warn!(error = %e, "补货报表写入失败");
                ApiError::from(e)
            })
    }

    /// 查询已写入的补货记录（含 "_id"）
    pub fn query_reorders(&self) -> ApiResult<Vec<Document>> {
        let docs = self.gateway.find_all(&self.collection).map_err(|e| {
            warn!(error = %e, "补货记录查询失败");
            ApiError::from(e)
        })?;
        Ok(docs.iter().map(|d| d.to_record()).collect())
    }

    /// 扫码查单: 扫码结果文本即产品名
    pub fn lookup_scanned(&self, payload: &str) -> ApiResult<Vec<Document>> {
        let product_name = payload.trim();
        if product_name.is_empty() {
            return Err(ApiError::InvalidInput("扫码内容为空".to_string()));
        }

        let docs = self
            .gateway
            .find_by_product_name(&self.collection, product_name)
            .map_err(|e| {
                warn!(error = %e, product_name, "扫码查单失败");
                ApiError::from(e)
            })?;
        Ok(docs.iter().map(|d| d.to_record()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::ReorderReportRow;
    use crate::repository::SqliteDocumentStore;

    fn report() -> ReorderReport {
        ReorderReport::new(vec![ReorderReportRow {
            product_name: "Widget".to_string(),
            units_in_stock: 5.0,
            units_on_order: 2.0,
            reorder_level: 10.0,
            company_name: Some("Acme".to_string()),
        }])
    }

    fn api(mode: InsertMode) -> PersistenceApi {
        let store = SqliteDocumentStore::in_memory().unwrap();
        PersistenceApi::new(Arc::new(store), "northwind_database.reorder_products".to_string(), mode)
    }

    #[test]
    fn test_insert_then_query() {
        let api = api(InsertMode::Append);
        let outcome = api.insert_report(&report()).unwrap();
        assert_eq!(outcome.inserted, 1);

        let records = api.query_reorders().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["ProductName"], "Widget");
        assert_eq!(records[0]["CompanyName"], "Acme");
        assert!(records[0].contains_key("_id"));
    }

    #[test]
    fn test_upsert_mode_dedups_unchanged_report() {
        let api = api(InsertMode::Upsert);
        api.insert_report(&report()).unwrap();
        let again = api.insert_report(&report()).unwrap();
        assert_eq!(again.inserted, 0);
        assert_eq!(api.query_reorders().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_report_rejected() {
        let api = api(InsertMode::Append);
        let err = api.insert_report(&ReorderReport::default()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn test_lookup_scanned() {
        let api = api(InsertMode::Append);
        api.insert_report(&report()).unwrap();

        assert_eq!(api.lookup_scanned(" Widget\n").unwrap().len(), 1);
        assert!(api.lookup_scanned("Gadget").unwrap().is_empty());
        assert!(matches!(api.lookup_scanned("  "), Err(ApiError::InvalidInput(_))));
    }
}
