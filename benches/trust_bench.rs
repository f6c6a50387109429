//! Benchmarks for the trust scorer.

use std::sync::Arc;

use arrow::{
    array::{Float64Array, RecordBatch, StringArray},
    datatypes::{DataType, Field, Schema},
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use confiar::{ArrowDataset, TrustScorer};

fn make_dataset(rows: usize) -> ArrowDataset {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("value", DataType::Float64, true),
        Field::new("category", DataType::Utf8, true),
    ]));

    let ids: Vec<String> = (0..rows).map(|i| format!("ID{:06}", i)).collect();
    let values: Vec<Option<f64>> = (0..rows)
        .map(|i| {
            if i % 20 == 0 {
                None
            } else {
                Some((i % 97) as f64 + (i % 7) as f64 * 0.5)
            }
        })
        .collect();
    let categories: Vec<&str> = (0..rows)
        .map(|i| match i % 3 {
            0 => "alpha",
            1 => "beta",
            _ => "gamma",
        })
        .collect();

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(
                ids.iter().map(String::as_str).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(values)),
            Arc::new(StringArray::from(categories)),
        ],
    )
    .expect("batch");

    ArrowDataset::from_batch(batch).expect("dataset")
}

fn bench_analyze(c: &mut Criterion) {
    let small = make_dataset(1_000);
    let large = make_dataset(50_000);
    let scorer = TrustScorer::new();

    c.bench_function("analyze_1k_rows", |b| {
        b.iter(|| scorer.analyze(black_box(&small)))
    });

    c.bench_function("analyze_50k_rows", |b| {
        b.iter(|| scorer.analyze(black_box(&large)))
    });
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
