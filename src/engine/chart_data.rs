// ==========================================
// 产品补货看板 - 图表数据派生
// ==========================================
// 职责: 从报表/目录派生图表所需数据（纯函数）
// 不负责: 颜色、尺寸、排序方向等展示样式
// ==========================================

use crate::domain::chart::{
    BarChartPoint, HistogramBin, ReorderVsStockPoint, ScatterPoint, SupplierActivity,
};
use crate::domain::product::EnrichedProduct;
use crate::domain::report::ReorderReport;
use std::collections::HashMap;

/// 直方图默认区间数
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

pub struct ChartDataBuilder;

impl ChartDataBuilder {
    /// 分组柱状图: 每个产品展开为 UnitsInStock / ReorderLevel 两个点
    ///
    /// 顺序: 先全部 UnitsInStock，再全部 ReorderLevel（宽表 melt 的行序）
    pub fn bar_chart_series(report: &ReorderReport) -> Vec<BarChartPoint> {
        let stock = report.iter().map(|r| BarChartPoint {
            product_name: r.product_name.clone(),
            series: "UnitsInStock".to_string(),
            value: r.units_in_stock,
        });
        let level = report.iter().map(|r| BarChartPoint {
            product_name: r.product_name.clone(),
            series: "ReorderLevel".to_string(),
            value: r.reorder_level,
        });
        stock.chain(level).collect()
    }

    /// 散点图: 在库 vs 在途
    pub fn scatter_points(report: &ReorderReport) -> Vec<ScatterPoint> {
        report
            .iter()
            .map(|r| ScatterPoint {
                product_name: r.product_name.clone(),
                units_in_stock: r.units_in_stock,
                units_on_order: r.units_on_order,
                reorder_level: r.reorder_level,
            })
            .collect()
    }

    /// 各供应商产品数量（降序；数量相同按公司名升序；未匹配产品不计入）
    pub fn supplier_activity(products: &[EnrichedProduct]) -> Vec<SupplierActivity> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for name in products.iter().filter_map(|p| p.company_name.as_deref()) {
            *counts.entry(name).or_insert(0) += 1;
        }

        let mut activity: Vec<SupplierActivity> = counts
            .into_iter()
            .map(|(company_name, product_count)| SupplierActivity {
                company_name: company_name.to_string(),
                product_count,
            })
            .collect();
        activity.sort_by(|a, b| {
            b.product_count
                .cmp(&a.product_count)
                .then_with(|| a.company_name.cmp(&b.company_name))
        });
        activity
    }

    /// 在库数量等宽直方图
    ///
    /// # 规则
    /// - 区间 [min, max] 等分为 bins 段，最后一段右闭
    /// - 全部取值相同时，区间取 [v - 0.5, v + 0.5]
    /// - 空输入或 bins = 0 返回空
    pub fn stock_level_distribution(products: &[EnrichedProduct], bins: usize) -> Vec<HistogramBin> {
        if products.is_empty() || bins == 0 {
            return Vec::new();
        }

        let values: Vec<f64> = products.iter().map(|p| p.product.units_in_stock).collect();
        let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let width = (max - min) / bins as f64;
        let mut histogram: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                lower: min + width * i as f64,
                upper: if i + 1 == bins {
                    max
                } else {
                    min + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for v in values {
            let idx = (((v - min) / width).floor() as usize).min(bins - 1);
            histogram[idx].count += 1;
        }

        histogram
    }

    /// 全目录 补货阈值 vs 在库
    pub fn reorder_vs_stock(products: &[EnrichedProduct]) -> Vec<ReorderVsStockPoint> {
        products
            .iter()
            .map(|p| ReorderVsStockPoint {
                product_name: p.product.product_name.clone(),
                reorder_level: p.product.reorder_level,
                units_in_stock: p.product.units_in_stock,
            })
            .collect()
    }
}
