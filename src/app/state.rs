// ==========================================
// 产品补货看板 - 会话状态
// ==========================================
// 职责: 持有一次会话内的只读目录、报表 API 与(可选)持久化 API
// 约束: 目录加载失败即不创建会话；网关失败不阻止会话创建
// ==========================================

use std::sync::Arc;

use crate::api::{ApiError, ApiResult, PersistenceApi, ReportApi};
use crate::config::AppConfig;
use crate::domain::product::Catalog;
use crate::engine::ReorderRuleEngine;
use crate::importer::{CatalogLoader, CatalogLoaderImpl};
use crate::repository::{ReorderGateway, SqliteDocumentStore};

/// 会话上下文
///
/// 由表现层显式持有并传给每个动作处理函数
pub struct Session {
    /// 会话配置
    config: AppConfig,

    /// 报表 API（持有关联后的目录）
    report_api: ReportApi,

    /// 持久化 API（网关不可用时为 None）
    persistence_api: Option<PersistenceApi>,

    /// 网关不可用的原因
    gateway_error: Option<String>,
}

impl Session {
    /// 打开会话
    ///
    /// # 说明
    /// 1. 从配置的两个数据源加载目录（失败即返回错误，不创建会话）
    /// 2. 创建报表 API
    /// 3. 尝试连接文档存储（失败只记录警告）
    pub fn open(config: AppConfig) -> ApiResult<Self> {
        tracing::info!(
            products = %config.products_path.display(),
            suppliers = %config.suppliers_path.display(),
            "打开会话"
        );

        let catalog = CatalogLoaderImpl::default()
            .load(&config.products_path, &config.suppliers_path)?;

        let gateway = match SqliteDocumentStore::new(&config.db_path) {
            Ok(store) => Ok(Arc::new(store) as Arc<dyn ReorderGateway>),
            Err(e) => {
                tracing::warn!(db_path = %config.db_path, error = %e, "文档存储连接失败，持久化功能不可用");
                Err(e.to_string())
            }
        };

        Self::from_parts(config, &catalog, gateway)
    }

    /// 由已加载的目录与网关构建会话
    ///
    /// gateway 为 Err 时会话仍可用，持久化动作返回 GatewayUnavailable
    pub fn from_parts(
        config: AppConfig,
        catalog: &Catalog,
        gateway: Result<Arc<dyn ReorderGateway>, String>,
    ) -> ApiResult<Self> {
        let rule_engine = ReorderRuleEngine::from_config(&config)?;
        let report_api = ReportApi::new(catalog, rule_engine);

        let (persistence_api, gateway_error) = match gateway {
            Ok(gateway) => {
                let api = PersistenceApi::new(
                    gateway,
                    config.qualified_collection(),
                    config.insert_mode(),
                );
                (Some(api), None)
            }
            Err(reason) => (None, Some(reason)),
        };

        tracing::info!(
            products = report_api.enriched_products().len(),
            tolerance = report_api.rule_engine().tolerance(),
            gateway = persistence_api.is_some(),
            "会话已就绪"
        );

        Ok(Self {
            config,
            report_api,
            persistence_api,
            gateway_error,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn report_api(&self) -> &ReportApi {
        &self.report_api
    }

    /// 网关是否已连接
    pub fn gateway_connected(&self) -> bool {
        self.persistence_api.is_some()
    }

    /// 获取持久化 API
    ///
    /// # 返回
    /// - Err(GatewayUnavailable): 会话打开时网关连接失败
    pub fn persistence_api(&self) -> ApiResult<&PersistenceApi> {
        self.persistence_api.as_ref().ok_or_else(|| {
            ApiError::GatewayUnavailable(
                self.gateway_error
                    .clone()
                    .unwrap_or_else(|| "文档存储未连接".to_string()),
            )
        })
    }
}
