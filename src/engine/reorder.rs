// ==========================================
// 产品补货看板 - 补货规则引擎
// ==========================================
// 规则: units_in_stock + units_on_order <= reorder_level (+ tolerance)
// 红线: 纯函数,不写库,不缓存;同一输入两次调用结果逐元素相等
// ==========================================
// 输入: EnrichedProduct 序列
// 输出: ReorderReport（保持输入相对顺序，仅投影五个字段）
// ==========================================

use crate::config::{config_keys, ConfigError, ConfigResult, ReorderConfigReader};
use crate::domain::product::EnrichedProduct;
use crate::domain::report::{ReorderReport, ReorderReportRow};
use tracing::instrument;

// ==========================================
// ReorderRuleEngine - 补货规则引擎
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReorderRuleEngine {
    /// 判定容差（0.0 = 精确浮点比较）
    tolerance: f64,
}

impl Default for ReorderRuleEngine {
    fn default() -> Self {
        Self { tolerance: 0.0 }
    }
}

impl ReorderRuleEngine {
    /// 创建引擎
    ///
    /// # 参数
    /// - tolerance: 判定容差，必须是有限非负数
    ///
    /// # 返回
    /// - Err(ConfigValueError): 负数或非有限数
    pub fn new(tolerance: f64) -> ConfigResult<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::ConfigValueError {
                key: config_keys::REORDER_TOLERANCE.to_string(),
                value: tolerance.to_string(),
                message: "必须是有限非负数".to_string(),
            });
        }
        Ok(Self { tolerance })
    }

    /// 从配置读取器创建
    pub fn from_config<C: ReorderConfigReader + ?Sized>(config: &C) -> ConfigResult<Self> {
        Self::new(config.get_reorder_tolerance()?)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// 补货判定
    pub fn needs_reorder(&self, product: &EnrichedProduct) -> bool {
        let p = &product.product;
        p.units_in_stock + p.units_on_order <= p.reorder_level + self.tolerance
    }

    /// 生成补货报表
    #[instrument(skip_all, fields(products = products.len(), tolerance = self.tolerance))]
    pub fn evaluate(&self, products: &[EnrichedProduct]) -> ReorderReport {
        let rows: Vec<ReorderReportRow> = products
            .iter()
            .filter(|p| self.needs_reorder(p))
            .map(ReorderReportRow::from)
            .collect();

        tracing::debug!(reorder_count = rows.len(), "补货判定完成");
        ReorderReport::new(rows)
    }
}
