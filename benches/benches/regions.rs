// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use hilmap_index::{AddressRange, InputFormat, Palette, RegionIndex, parse};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_u64(&mut self) -> u64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.0
    }
}

const CEILING: u64 = 1 << 48;

/// `n` ranges of random length scattered over the address space, some
/// overlapping.
fn gen_ranges(n: usize, seed: u64) -> Vec<AddressRange> {
    let mut rng = Lcg(seed);
    let mut palette = Palette::new();
    (0..n)
        .map(|i| {
            let start = rng.next_u64() % CEILING;
            let len = 1 + (rng.next_u64() >> 20) % (1 << 32);
            let label = format!("region-{}", i % 64);
            let color = palette.color_for(&label);
            AddressRange::clamped(start, start.saturating_add(len), label, color, CEILING).unwrap()
        })
        .collect()
}

fn gen_native_text(n: usize, seed: u64) -> String {
    gen_ranges(n, seed)
        .iter()
        .map(|r| format!("{:x} {:x} {}\n", r.start(), r.end(), r.label()))
        .collect()
}

fn bench_regions(c: &mut Criterion) {
    let mut group = c.benchmark_group("hilmap_index");

    for n in [100_usize, 1_000, 10_000] {
        let ranges = gen_ranges(n, 0x5eed);
        let index = RegionIndex::build(ranges.clone());
        let mut rng = Lcg(7);
        let probes: Vec<u64> = (0..1024).map(|_| rng.next_u64() % CEILING).collect();

        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(BenchmarkId::new("build", n), |b| {
            b.iter_batched(
                || ranges.clone(),
                |ranges| black_box(RegionIndex::build(ranges)),
                BatchSize::SmallInput,
            );
        });

        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_function(BenchmarkId::new("lookup", n), |b| {
            b.iter(|| {
                for &address in &probes {
                    black_box(index.lookup(black_box(address)));
                }
            });
        });
        group.bench_function(BenchmarkId::new("lookup_linear_scan", n), |b| {
            b.iter(|| {
                for &address in &probes {
                    black_box(index.iter().find(|r| r.contains(black_box(address))));
                }
            });
        });

        let text = gen_native_text(n, 0x5eed);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(BenchmarkId::new("parse_native", n), |b| {
            b.iter(|| {
                let mut palette = Palette::new();
                black_box(parse(black_box(&text), InputFormat::Native, CEILING, &mut palette))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_regions);
criterion_main!(benches);
