// ==========================================
// 补货流水线集成测试
// ==========================================
// 测试目标: 数据源 → 导入 → 关联 → 补货规则 → 导出 全流程
// ==========================================


use reorder_dashboard::api::ApiError;
use reorder_dashboard::app::Session;
use reorder_dashboard::engine::{CatalogJoiner, ReorderRuleEngine, ReportExporter};
use reorder_dashboard::importer::{CatalogLoader, CatalogLoaderImpl, ImportError};
use reorder_dashboard::logging;
use test_helpers::*;

#[test]
fn test_widget_gadget_scenario() {
    logging::init_test();

    let fixture = standard_fixture().unwrap();
    let session = Session::open(fixture.config.clone()).unwrap();

    let report = session.report_api().reorder_report();
    assert_eq!(report.len(), 1);
    assert_eq!(report.rows[0].product_name, "Widget");
    assert_eq!(report.rows[0].company_name.as_deref(), Some("Acme"));

    let download = session.report_api().export_report().unwrap();
    assert_eq!(download.file_name, "reorder_report.csv");
    assert_eq!(download.mime_type, "text/csv");
    assert_eq!(download.content, EXPECTED_WIDGET_CSV);
}

#[test]
fn test_missing_reorder_level_prevents_session() {
    logging::init_test();

    let fixture = fixture_with(
        "ProductName,SupplierID,UnitsInStock,UnitsOnOrder\nWidget,1,5,2\n",
        SUPPLIERS_JSON,
    )
    .unwrap();

    match Session::open(fixture.config.clone()) {
        Err(ApiError::SchemaViolation { missing, .. }) => {
            assert_eq!(missing, vec!["ReorderLevel".to_string()]);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("session must not open without ReorderLevel"),
    }
}

#[test]
fn test_non_numeric_stock_is_type_error() {
    let fixture = fixture_with(
        "ProductName,SupplierID,UnitsInStock,UnitsOnOrder,ReorderLevel\nWidget,1,5,2,10\nGadget,2,lots,0,5\n",
        SUPPLIERS_JSON,
    )
    .unwrap();

    let err = CatalogLoaderImpl::default()
        .load(&fixture.config.products_path, &fixture.config.suppliers_path)
        .unwrap_err();

    match err {
        ImportError::TypeValidationError { row, field, value, .. } => {
            assert_eq!(row, 3);
            assert_eq!(field, "UnitsInStock");
            assert_eq!(value, "lots");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_join_is_total_and_first_supplier_wins() {
    let fixture = fixture_with(
        "ProductName,SupplierID,UnitsInStock,UnitsOnOrder,ReorderLevel\nA,1,0,0,1\nB,9,0,0,1\nC,1,50,0,1\n",
        r#"[{"SupplierID":1,"CompanyName":"First"},{"SupplierID":1,"CompanyName":"Second"}]"#,
    )
    .unwrap();

    let catalog = CatalogLoaderImpl::default()
        .load(&fixture.config.products_path, &fixture.config.suppliers_path)
        .unwrap();
    let joined = CatalogJoiner::join(&catalog.products, &catalog.suppliers);

    assert_eq!(joined.len(), catalog.products.len());
    assert_eq!(joined[0].company_name.as_deref(), Some("First"));
    assert_eq!(joined[1].company_name, None);
    assert_eq!(joined[2].company_name.as_deref(), Some("First"));

    // 未匹配供应商的产品仍参与补货判断，导出时公司名为空
    let report = ReorderRuleEngine::default().evaluate(&joined);
    let names: Vec<_> = report.iter().map(|r| r.product_name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);

    let csv = ReportExporter::to_csv_string(&report).unwrap();
    assert!(csv.ends_with("B,0.0,0.0,1.0,\n"));
}

#[test]
fn test_column_oriented_suppliers() {
    let fixture = fixture_with(
        PRODUCTS_CSV,
        r#"{"SupplierID":{"0":1,"1":2},"CompanyName":{"0":"Acme","1":"Globex"}}"#,
    )
    .unwrap();

    let session = Session::open(fixture.config.clone()).unwrap();
    let download = session.report_api().export_report().unwrap();
    assert_eq!(download.content, EXPECTED_WIDGET_CSV);
}

#[test]
fn test_export_is_deterministic() {
    let fixture = standard_fixture().unwrap();
    let session = Session::open(fixture.config.clone()).unwrap();

    let first = ReportExporter::to_csv_bytes(&session.report_api().reorder_report()).unwrap();
    let second = ReportExporter::to_csv_bytes(&session.report_api().reorder_report()).unwrap();
    assert_eq!(first, second);

    // 重新打开会话结果也相同
    let reopened = Session::open(fixture.config.clone()).unwrap();
    let third = ReportExporter::to_csv_bytes(&reopened.report_api().reorder_report()).unwrap();
    assert_eq!(first, third);
}

#[test]
fn test_tolerance_from_config() {
    let mut fixture = fixture_with(
        "ProductName,SupplierID,UnitsInStock,UnitsOnOrder,ReorderLevel\nEdge,1,10.05,0,10\n",
        SUPPLIERS_JSON,
    )
    .unwrap();

    let exact = Session::open(fixture.config.clone()).unwrap();
    assert!(exact.report_api().reorder_report().is_empty());

    fixture.config.reorder_tolerance = 0.1;
    let tolerant = Session::open(fixture.config.clone()).unwrap();
    assert_eq!(tolerant.report_api().reorder_report().len(), 1);
}

#[test]
fn test_null_supplier_key_is_skipped_not_fatal() {
    let fixture = fixture_with(
        PRODUCTS_CSV,
        r#"[{"SupplierID":1,"CompanyName":"Acme"},{"SupplierID":null,"CompanyName":"Ghost"}]"#,
    )
    .unwrap();

    let session = Session::open(fixture.config.clone()).unwrap();
    let download = session.report_api().export_report().unwrap();
    assert_eq!(download.content, EXPECTED_WIDGET_CSV);
}

#[test]
fn test_row_with_extra_fields_prevents_session() {
    let fixture = fixture_with(
        "ProductName,SupplierID,UnitsInStock,UnitsOnOrder,ReorderLevel\nWidget,1,5,2,10,999,junk\n",
        SUPPLIERS_JSON,
    )
    .unwrap();

    match Session::open(fixture.config.clone()) {
        Err(ApiError::MalformedSource(message)) => assert!(message.contains("row 2")),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("session must not open with a malformed row"),
    }
}
