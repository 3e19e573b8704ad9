//! Benchmark comparing pairwise vs matrix-based correlation computation
//!
//! Run with: cargo bench --bench correlation_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand::SeedableRng;

use featstat::pipeline::{
    compute_cross_correlation, correlation_matrix_blocked, correlation_matrix_pairwise,
    FeatureMatrix,
};

/// Generate synthetic features with controlled characteristics
fn generate_features(n_rows: usize, n_features: usize, seed: u64) -> FeatureMatrix {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(n_features);

    for i in 0..n_features {
        let values: Vec<f64> = match i % 3 {
            0 => (0..n_rows).map(|_| rng.gen::<f64>() * 100.0).collect(),
            1 => (0..n_rows)
                .map(|_| {
                    let v = rng.gen::<f64>();
                    (v * v * v) * 100.0
                })
                .collect(),
            _ => {
                // Correlated with an earlier feature
                columns[i - 2]
                    .iter()
                    .map(|v| v + rng.gen::<f64>() * 10.0 - 5.0)
                    .collect()
            }
        };
        columns.push(values);
    }

    FeatureMatrix {
        names: (0..n_features).map(|i| format!("feature_{}", i)).collect(),
        columns,
        rows: n_rows,
    }
}

/// Benchmark pairwise vs matrix correlation for varying column counts
fn benchmark_correlation_by_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_by_columns");
    group.sample_size(20);

    let n_rows = 5_000;
    for n_cols in [10, 25, 50, 100] {
        let features = generate_features(n_rows, n_cols, 42);
        let pairs = (n_cols * (n_cols - 1) / 2) as u64;
        group.throughput(Throughput::Elements(pairs));

        group.bench_with_input(BenchmarkId::new("pairwise", n_cols), &features, |b, f| {
            b.iter(|| correlation_matrix_pairwise(black_box(f)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("matrix", n_cols), &features, |b, f| {
            b.iter(|| correlation_matrix_blocked(black_box(f)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark the full cross-correlation ranking for varying row counts
fn benchmark_cross_correlation_by_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross_correlation_by_rows");
    group.sample_size(20);

    for n_rows in [1_000, 10_000, 50_000] {
        let features = generate_features(n_rows, 20, 7);
        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &features, |b, f| {
            b.iter(|| compute_cross_correlation(black_box(f)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_correlation_by_columns,
    benchmark_cross_correlation_by_rows
);
criterion_main!(benches);
