// ==========================================
// 产品补货看板 - 图表数据模型
// ==========================================
// 只描述图表所需数据,不含任何样式/渲染信息
// ==========================================

use serde::{Deserialize, Serialize};

/// 分组柱状图数据点（在库 vs 补货阈值，宽表展开为长表）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartPoint {
    #[serde(rename = "ProductName")]
    pub product_name: String,
    /// 系列名: "UnitsInStock" / "ReorderLevel"
    #[serde(rename = "Type")]
    pub series: String,
    #[serde(rename = "Value")]
    pub value: f64,
}

/// 散点图数据点（x=在库, y=在途, 颜色/大小=补货阈值/在库）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    #[serde(rename = "ProductName")]
    pub product_name: String,
    #[serde(rename = "UnitsInStock")]
    pub units_in_stock: f64,
    #[serde(rename = "UnitsOnOrder")]
    pub units_on_order: f64,
    #[serde(rename = "ReorderLevel")]
    pub reorder_level: f64,
}

/// 供应商产品数量统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierActivity {
    pub company_name: String,
    pub product_count: usize,
}

/// 在库数量直方图区间 [lower, upper)，最后一个区间闭合
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// 全目录 补货阈值 vs 在库 折线数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderVsStockPoint {
    pub product_name: String,
    pub reorder_level: f64,
    pub units_in_stock: f64,
}
