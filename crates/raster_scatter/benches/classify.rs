mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use raster_scatter::prelude::*;

const RANGE_COUNTS: [usize; 4] = [1, 4, 16, 64];

fn classify_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("density/classify");

    for &n in &RANGE_COUNTS {
        let ranges: Vec<DensityRange> = (0..n)
            .map(|i| DensityRange::new(i as f64, i as f64 + 1.0, 1.0))
            .collect();
        let values: Vec<f64> = (0..1024).map(|i| (i as f64 / 1024.0) * n as f64).collect();
        group.throughput(common::elements_throughput(values.len()));

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let hits = values
                    .iter()
                    .filter(|v| classify(**v, &ranges).is_some())
                    .count();
                black_box(hits);
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = classify_benches
}
criterion_main!(benches);
