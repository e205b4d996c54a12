// ==========================================
// 产品补货看板 - 目录关联引擎
// ==========================================
// 职责: 按供应商键把公司名左关联到每个产品
// 规则:
// - 每个产品恰好输出一次（左关联，不丢行不重复）
// - 键按精确相等比较
// - 同一键有多条供应商记录时，取源顺序中的第一条
// - 未匹配 → company_name = None
// ==========================================

use crate::domain::product::{EnrichedProduct, ProductRecord, SupplierRecord};
use crate::domain::types::SupplierId;
use std::collections::HashMap;
use tracing::instrument;

pub struct CatalogJoiner;

impl CatalogJoiner {
    /// 左关联产品与供应商
    #[instrument(skip_all, fields(products = products.len(), suppliers = suppliers.len()))]
    pub fn join(products: &[ProductRecord], suppliers: &[SupplierRecord]) -> Vec<EnrichedProduct> {
        let mut index: HashMap<&SupplierId, Option<&str>> = HashMap::with_capacity(suppliers.len());
        for supplier in suppliers {
            // 先到先得
            index
                .entry(&supplier.supplier_id)
                .or_insert(supplier.company_name.as_deref());
        }

        let enriched: Vec<EnrichedProduct> = products
            .iter()
            .map(|product| EnrichedProduct {
                product: product.clone(),
                company_name: index
                    .get(&product.supplier_id)
                    .copied()
                    .flatten()
                    .map(|s| s.to_string()),
            })
            .collect();

        let unmatched = enriched.iter().filter(|e| e.company_name.is_none()).count();
        if unmatched > 0 {
            tracing::debug!(unmatched, "部分产品未匹配到供应商公司名");
        }

        enriched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn product(name: &str, supplier: &str) -> ProductRecord {
        ProductRecord {
            product_id: None,
            product_name: name.to_string(),
            units_in_stock: 1.0,
            units_on_order: 0.0,
            reorder_level: 0.0,
            supplier_id: SupplierId::from_raw(supplier),
            row_number: 2,
        }
    }

    fn supplier(id: &str, name: Option<&str>) -> SupplierRecord {
        SupplierRecord {
            supplier_id: SupplierId::from_raw(id),
            company_name: name.map(|s| s.to_string()),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_join_preserves_every_product() {
        let products = vec![product("A", "1"), product("B", "2"), product("C", "1")];
        let suppliers = vec![supplier("1", Some("Acme"))];

        let enriched = CatalogJoiner::join(&products, &suppliers);

        assert_eq!(enriched.len(), 3);
        assert_eq!(enriched[0].company_name.as_deref(), Some("Acme"));
        assert_eq!(enriched[1].company_name, None);
        assert_eq!(enriched[2].company_name.as_deref(), Some("Acme"));
        let names: Vec<&str> = enriched.iter().map(|e| e.product_name()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_duplicate_supplier_first_wins() {
        let products = vec![product("A", "1")];
        let suppliers = vec![
            supplier("1", Some("First")),
            supplier("1", Some("Second")),
        ];

        let enriched = CatalogJoiner::join(&products, &suppliers);

        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].company_name.as_deref(), Some("First"));
    }

    #[test]
    fn test_duplicate_with_null_first_stays_null() {
        let products = vec![product("A", "1")];
        let suppliers = vec![supplier("1", None), supplier("1", Some("Later"))];

        let enriched = CatalogJoiner::join(&products, &suppliers);
        assert_eq!(enriched[0].company_name, None);
    }

    #[test]
    fn test_join_with_no_suppliers() {
        let products = vec![product("A", "1"), product("B", "2")];
        let enriched = CatalogJoiner::join(&products, &[]);
        assert_eq!(enriched.len(), 2);
        assert!(enriched.iter().all(|e| e.company_name.is_none()));
    }

    #[test]
    fn test_join_empty_products() {
        let suppliers = vec![supplier("1", Some("Acme"))];
        assert!(CatalogJoiner::join(&[], &suppliers).is_empty());
    }

    // 小键空间，保证重复键与未匹配键都会出现
    fn product_strategy() -> impl Strategy<Value = ProductRecord> {
        ("[A-Z]{1,4}", 0u8..8).prop_map(|(name, id)| product(&name, &id.to_string()))
    }

    fn supplier_strategy() -> impl Strategy<Value = SupplierRecord> {
        (0u8..8, prop::option::of("[a-z]{1,6}"))
            .prop_map(|(id, name)| supplier(&id.to_string(), name.as_deref()))
    }

    proptest! {
        #[test]
        fn prop_join_is_total_and_first_supplier_wins(
            products in prop::collection::vec(product_strategy(), 0..30),
            suppliers in prop::collection::vec(supplier_strategy(), 0..20),
        ) {
            let enriched = CatalogJoiner::join(&products, &suppliers);

            prop_assert_eq!(enriched.len(), products.len());
            for (out, input) in enriched.iter().zip(&products) {
                prop_assert_eq!(&out.product, input);

                let first = suppliers.iter().find(|s| s.supplier_id == input.supplier_id);
                let expected = first.and_then(|s| s.company_name.clone());
                prop_assert_eq!(&out.company_name, &expected);
            }
        }
    }
}
