//! Integration tests for confiar.

use std::sync::Arc;

use arrow::{
    array::{Float64Array, Int64Array, RecordBatch, StringArray},
    datatypes::{DataType, Field, Schema},
};

use confiar::{ArrowDataset, ColumnKind, Dataset, Error, TrustLabel, TrustScorer};

/// Builds a small sales-like dataset with an id column, a clean numeric
/// column, and a messy currency column.
fn create_sales_dataset() -> ArrowDataset {
    let schema = Arc::new(Schema::new(vec![
        Field::new("order_id", DataType::Int64, false),
        Field::new("quantity", DataType::Float64, true),
        Field::new("price", DataType::Utf8, true),
    ]));

    let order_ids: Vec<i64> = (1..=8).collect();
    let quantities: Vec<Option<f64>> = vec![
        Some(2.0),
        Some(3.0),
        Some(2.5),
        Some(4.0),
        Some(3.5),
        Some(2.0),
        Some(3.0),
        Some(2.5),
    ];
    let prices: Vec<Option<&str>> = vec![
        Some("$10.50"),
        Some("$12.00"),
        Some("$11.25"),
        Some("$10.75"),
        Some("$11.50"),
        Some("$12.25"),
        Some("$10.25"),
        Some("$11.00"),
    ];

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(order_ids)),
            Arc::new(Float64Array::from(quantities)),
            Arc::new(StringArray::from(prices)),
        ],
    )
    .expect("batch");

    ArrowDataset::from_batch(batch).expect("dataset")
}

#[test]
fn test_end_to_end_analysis() {
    let dataset = create_sales_dataset();
    let report = TrustScorer::new().analyze(&dataset).expect("report");

    assert_eq!(report.row_count, 8);
    assert_eq!(report.profiles.len(), 3);

    let id = report.profile("order_id").expect("order_id");
    assert_eq!(id.kind, ColumnKind::Identifier);
    assert_eq!(id.label, TrustLabel::Reliable);

    let quantity = report.profile("quantity").expect("quantity");
    assert_eq!(quantity.kind, ColumnKind::Numeric);

    let price = report.profile("price").expect("price");
    assert_eq!(price.kind, ColumnKind::Numeric);
    assert!(price.stats.mean.expect("mean") > 10.0);

    assert_eq!(report.verdict.column_count(), 3);
}

#[test]
fn test_csv_file_analysis() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("orders.csv");

    std::fs::write(
        &path,
        "customer,balance,notes\n\
         C001,$1200,ok\n\
         C002,$1150,\n\
         C003,$40000,late\n\
         C004,$1180,ok\n\
         C005,$1210,ok\n\
         C006,$1195,ok\n\
         C007,$1205,ok\n\
         C008,$1185,ok\n",
    )
    .expect("write csv");

    let dataset = ArrowDataset::from_csv(&path).expect("load");
    let report = TrustScorer::new().analyze(&dataset).expect("report");

    let customer = report.profile("customer").expect("customer");
    assert_eq!(customer.kind, ColumnKind::Identifier);

    // One wild balance among tight 1200s: flagged as an outlier and the
    // distribution is skewed hard enough to cross the high threshold
    let balance = report.profile("balance").expect("balance");
    assert_eq!(balance.kind, ColumnKind::Numeric);
    assert_eq!(balance.stats.outlier_count, 1);
    assert_eq!(balance.label, TrustLabel::HighRisk);
    assert_eq!(balance.reason, "severe-skew");

    // One blank note out of 8 (12.5% missing)
    let notes = report.profile("notes").expect("notes");
    assert_eq!(notes.kind, ColumnKind::Categorical);
    assert_eq!(notes.label, TrustLabel::NeedsCleaning);

    assert_eq!(report.verdict.label, TrustLabel::HighRisk);
}

#[test]
fn test_report_export_roundtrip() {
    let temp = tempfile::tempdir().expect("tempdir");
    let out = temp.path().join("report.csv");

    let dataset = create_sales_dataset();
    let report = TrustScorer::new().analyze(&dataset).expect("report");
    report.export_csv(&out).expect("export");

    let content = std::fs::read_to_string(&out).expect("read");
    let mut lines = content.lines();

    assert_eq!(
        lines.next(),
        Some("column,kind,missing_pct,mean,median,std_dev,iqr,skewness,outlier_pct,trust")
    );
    // One row per column plus the verdict trailer
    assert_eq!(content.lines().count(), 1 + report.profiles.len() + 1);
    assert!(content
        .lines()
        .last()
        .is_some_and(|l| l.starts_with("# dataset verdict:")));
}

#[test]
fn test_exported_report_loads_as_dataset() {
    let dataset = create_sales_dataset();
    let report = TrustScorer::new().analyze(&dataset).expect("report");

    let exported = report.to_dataset().expect("to_dataset");
    assert_eq!(exported.len(), report.profiles.len());

    let columns = exported.column_strings().expect("columns");
    assert_eq!(columns[0].0, "column");
    assert_eq!(
        columns[0].1,
        vec![
            Some("order_id".to_string()),
            Some("quantity".to_string()),
            Some("price".to_string())
        ]
    );
}

#[test]
fn test_empty_csv_fails_fast() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("empty.csv");
    std::fs::write(&path, "a,b\n").expect("write csv");

    // Header-only CSV yields no rows; loading (or analyzing) must fail
    // rather than produce a partial report
    match ArrowDataset::from_csv(&path) {
        Err(_) => {}
        Ok(dataset) => {
            let result = TrustScorer::new().analyze(&dataset);
            assert!(matches!(result, Err(Error::EmptyDataset)));
        }
    }
}

#[test]
fn test_parquet_analysis_matches_csv() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("sales.parquet");

    let dataset = create_sales_dataset();
    dataset.to_parquet(&path).expect("write parquet");

    let loaded = ArrowDataset::from_parquet(&path).expect("load parquet");
    assert_eq!(loaded.len(), dataset.len());

    let original = TrustScorer::new().analyze(&dataset).expect("report");
    let roundtripped = TrustScorer::new().analyze(&loaded).expect("report");

    assert_eq!(original.verdict, roundtripped.verdict);
    for (a, b) in original.profiles.iter().zip(roundtripped.profiles.iter()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.label, b.label);
    }
}

#[test]
fn test_single_bad_column_taints_wide_dataset() {
    let mut fields = Vec::new();
    let mut arrays: Vec<arrow::array::ArrayRef> = Vec::new();

    for i in 0..5 {
        fields.push(Field::new(format!("clean_{}", i), DataType::Float64, true));
        arrays.push(Arc::new(Float64Array::from(vec![
            Some(10.0),
            Some(11.0),
            Some(10.5),
            Some(11.5),
            Some(10.2),
            Some(11.3),
        ])));
    }
    fields.push(Field::new("broken", DataType::Float64, true));
    arrays.push(Arc::new(Float64Array::from(vec![
        Some(1.0),
        None,
        None,
        None,
        None,
        Some(2.0),
    ])));

    let batch =
        RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).expect("batch");
    let dataset = ArrowDataset::from_batch(batch).expect("dataset");

    let report = TrustScorer::new().analyze(&dataset).expect("report");

    assert_eq!(report.verdict.label, TrustLabel::HighRisk);
    assert_eq!(report.verdict.high_risk, 1);
    assert_eq!(report.verdict.reliable, 5);
    assert_eq!(report.high_risk_columns(), vec!["broken"]);
}
