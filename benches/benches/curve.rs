// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use hilmap_curve::{CurveLayout, HilbertCurve};

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("hilmap_curve");
    const SAMPLES: u64 = 4096;

    for order in [10_u32, 24, 31] {
        let curve = HilbertCurve::new(order).unwrap();
        // Spread the samples over the whole curve.
        let stride = (curve.len() / SAMPLES).max(1);
        let indices: Vec<u64> = (0..SAMPLES).map(|i| (i * stride) % curve.len()).collect();
        let cells: Vec<(u32, u32)> = indices
            .iter()
            .map(|&i| curve.index_to_xy(i).unwrap())
            .collect();

        group.throughput(Throughput::Elements(SAMPLES));
        group.bench_function(BenchmarkId::new("index_to_xy", order), |b| {
            b.iter(|| {
                for &i in &indices {
                    black_box(curve.index_to_xy(black_box(i)).unwrap());
                }
            });
        });
        group.bench_function(BenchmarkId::new("xy_to_index", order), |b| {
            b.iter(|| {
                for &(x, y) in &cells {
                    black_box(curve.xy_to_index(black_box(x), black_box(y)).unwrap());
                }
            });
        });
    }

    let stacked = CurveLayout::stacked(10).unwrap();
    group.throughput(Throughput::Elements(SAMPLES));
    group.bench_function("stacked_layout_index_to_xy(order=10)", |b| {
        let stride = stacked.len() / SAMPLES;
        b.iter(|| {
            for i in 0..SAMPLES {
                black_box(stacked.index_to_xy(black_box(i * stride)).unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
