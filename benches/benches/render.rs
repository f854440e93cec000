// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hilmap_index::{AddressRange, Palette, RegionIndex};
use hilmap_raster::{RenderOptions, classify_grid, render, render_overview};
use hilmap_view::{AddressSpace, ZoomState};
use kurbo::Point;

/// A typical process layout: a handful of small mappings low and high in the
/// space plus a few large reservations.
fn process_layout() -> RegionIndex {
    let mut palette = Palette::new();
    let mut range = |start: u64, end: u64, label: &str| {
        let color = palette.color_for(label);
        AddressRange::new(start, end, label, color).unwrap()
    };
    RegionIndex::build([
        range(0x5555_5555_4000, 0x5555_5555_a000, "/usr/bin/true {r-x}"),
        range(0x5555_5556_0000, 0x5555_5558_1000, "[heap] {rw-}"),
        range(0x7f00_0000_0000, 0x7f40_0000_0000, "reserved {---}"),
        range(0x7fff_f7dd_3000, 0x7fff_f7df_c000, "ld.so {r-x}"),
        range(0x7fff_fffd_e000, 0x7fff_ffff_f000, "[stack] {rw-}"),
        range(0x1000, 0x1000_0000_0000, "low {r--}"),
    ])
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("hilmap_raster");
    group.sample_size(20);

    let space = AddressSpace::memory_map().unwrap();
    let index = process_layout();
    let options = RenderOptions::default();

    let mut state = ZoomState::root(&space);
    let target = Point::new(170.5, 341.5);
    loop {
        let level = state.level();
        group.bench_function(format!("render(level={level})"), |b| {
            b.iter(|| black_box(render(&index, black_box(&state), &space, &options)));
        });
        match state.zoom_in(&space, target) {
            Some(next) => state = next,
            None => break,
        }
    }

    let root = ZoomState::root(&space);
    group.bench_function("classify_grid(block=16)", |b| {
        b.iter(|| black_box(classify_grid(&root, &space, 16)));
    });
    group.bench_function("render_overview", |b| {
        b.iter(|| black_box(render_overview(&index, &space, &options)));
    });

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
