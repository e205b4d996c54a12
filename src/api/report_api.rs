// ==========================================
// 产品补货看板 - 报表 API
// ==========================================
// 职责: 持有会话内只读的关联目录,按需派生报表/导出/图表数据
// 约束: 报表每次调用重新计算,展示、导出、持久化拿到的是同一纯函数的结果
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::chart::{
    BarChartPoint, HistogramBin, ReorderVsStockPoint, ScatterPoint, SupplierActivity,
};
use crate::domain::product::{Catalog, EnrichedProduct};
use crate::domain::report::ReorderReport;
use crate::engine::{
    CatalogJoiner, ChartDataBuilder, ReorderRuleEngine, ReportDownload, ReportExporter,
    DEFAULT_HISTOGRAM_BINS,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 报表图表数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportCharts {
    pub bar_chart: Vec<BarChartPoint>,
    pub scatter_chart: Vec<ScatterPoint>,
}

/// 全目录探索性分析数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogInsights {
    pub supplier_activity: Vec<SupplierActivity>,
    pub stock_distribution: Vec<HistogramBin>,
    pub reorder_vs_stock: Vec<ReorderVsStockPoint>,
}

// ==========================================
// ReportApi - 报表 API
// ==========================================
pub struct ReportApi {
    /// 关联后的产品（会话内只读）
    products: Arc<Vec<EnrichedProduct>>,
    rule_engine: ReorderRuleEngine,
}

impl ReportApi {
    /// 关联目录并创建 API（关联只做一次）
    pub fn new(catalog: &Catalog, rule_engine: ReorderRuleEngine) -> Self {
        let products = CatalogJoiner::join(&catalog.products, &catalog.suppliers);
        Self {
            products: Arc::new(products),
            rule_engine,
        }
    }

    pub fn enriched_products(&self) -> &[EnrichedProduct] {
        &self.products
    }

    pub fn rule_engine(&self) -> &ReorderRuleEngine {
        &self.rule_engine
    }

    /// 派生补货报表
    pub fn reorder_report(&self) -> ReorderReport {
        self.rule_engine.evaluate(&self.products)
    }

    /// 导出报表为下载内容
    pub fn export_report(&self) -> ApiResult<ReportDownload> {
        let report = self.reorder_report();
        let download = ReportExporter::to_download(&report)?;
        tracing::info!(rows = report.len(), file = %download.file_name, "报表导出完成");
        Ok(download)
    }

    /// 报表图表数据（柱状图 + 散点图）
    pub fn report_charts(&self) -> ReportCharts {
        let report = self.reorder_report();
        ReportCharts {
            bar_chart: ChartDataBuilder::bar_chart_series(&report),
            scatter_chart: ChartDataBuilder::scatter_points(&report),
        }
    }

    /// 全目录分析数据
    pub fn catalog_insights(&self) -> CatalogInsights {
        CatalogInsights {
            supplier_activity: ChartDataBuilder::supplier_activity(&self.products),
            stock_distribution: ChartDataBuilder::stock_level_distribution(
                &self.products,
                DEFAULT_HISTOGRAM_BINS,
            ),
            reorder_vs_stock: ChartDataBuilder::reorder_vs_stock(&self.products),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::{ProductRecord, SupplierRecord};
    use crate::domain::types::SupplierId;

    fn catalog() -> Catalog {
        let product = |name: &str, stock: f64, on_order: f64, level: f64, supplier: &str| ProductRecord {
            product_id: None,
            product_name: name.to_string(),
            units_in_stock: stock,
            units_on_order: on_order,
            reorder_level: level,
            supplier_id: SupplierId::from_raw(supplier),
            row_number: 2,
        };
        let supplier = |id: &str, name: &str| SupplierRecord {
            supplier_id: SupplierId::from_raw(id),
            company_name: Some(name.to_string()),
            extra: serde_json::Map::new(),
        };

        Catalog {
            products: vec![
                product("Widget", 5.0, 2.0, 10.0, "1"),
                product("Gadget", 20.0, 0.0, 5.0, "2"),
            ],
            suppliers: vec![supplier("1", "Acme"), supplier("2", "Globex")],
        }
    }

    #[test]
    fn test_report_and_export_agree() {
        let api = ReportApi::new(&catalog(), ReorderRuleEngine::default());

        let report = api.reorder_report();
        assert_eq!(report.len(), 1);
        assert_eq!(report.rows[0].company_name.as_deref(), Some("Acme"));

        let download = api.export_report().unwrap();
        assert_eq!(
            download.content,
            "ProductName,UnitsInStock,UnitsOnOrder,ReorderLevel,CompanyName\nWidget,5.0,2.0,10.0,Acme\n"
        );
        assert_eq!(api.export_report().unwrap(), download);
    }

    #[test]
    fn test_charts_follow_report() {
        let api = ReportApi::new(&catalog(), ReorderRuleEngine::default());
        let charts = api.report_charts();
        assert_eq!(charts.bar_chart.len(), 2);
        assert_eq!(charts.scatter_chart.len(), 1);

        let insights = api.catalog_insights();
        assert_eq!(insights.supplier_activity.len(), 2);
        assert_eq!(insights.reorder_vs_stock.len(), 2);
        assert_eq!(
            insights.stock_distribution.iter().map(|b| b.count).sum::<usize>(),
            2
        );
    }
}
