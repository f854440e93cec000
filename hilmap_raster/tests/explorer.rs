// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom sessions end to end: parse, render, zoom, hit test, persist.

use hilmap_index::{AddressRange, Palette, RegionIndex, parse_auto};
use hilmap_raster::{Explorer, ExplorerError, Shading, ZoomOutcome};
use hilmap_view::{AddressSpace, ZoomState};
use kurbo::Point;

const MAPS: &str = "\
555555554000-555555556000 r--p 00000000 08:01 1048602                    /usr/bin/true
555555556000-55555555a000 r-xp 00002000 08:01 1048602                    /usr/bin/true
555555560000-555555581000 rw-p 00000000 00:00 0                          [heap]
7ffff7dd3000-7ffff7dfc000 r-xp 00000000 08:01 1054721                    /usr/lib/ld-linux-x86-64.so.2
7ffffffde000-7ffffffff000 rw-p 00000000 00:00 0                          [stack]
ffffffffff600000-ffffffffff601000 --xp 00000000 00:00 0                  [vsyscall]
";

fn explorer() -> Explorer {
    let space = AddressSpace::memory_map().unwrap();
    let mut palette = Palette::new();
    let report = parse_auto(MAPS, space.ceiling(), &mut palette);
    assert_eq!(report.skipped.len(), 1);
    Explorer::new(space, report.into_index())
}

/// Pixel center of the pixel `address` lands on.
fn pixel_of(explorer: &Explorer, address: u64) -> Point {
    let (x, y) = explorer
        .state()
        .address_to_pixel(explorer.space(), address)
        .unwrap();
    Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5)
}

#[test]
fn zoom_to_the_deepest_level_and_back() {
    let mut explorer = explorer();
    let target = 0x5555_5556_0000_u64;
    for level in 1..=4 {
        let pixel = pixel_of(&explorer, target);
        let ZoomOutcome::Started(transition) = explorer.begin_zoom(pixel) else {
            panic!("zoom to level {level} did not start");
        };
        assert_eq!(transition.from.level(), level - 1);
        assert_eq!(transition.to.level(), level);
        assert_eq!(transition.to.width(), (1_u64 << 48) >> (6 * level));
        assert!(transition.to.contains_address(target));
        assert_ne!(transition.before, transition.after);
        assert!(explorer.finish_transition());
    }

    let deepest = explorer.state();
    assert!(matches!(
        explorer.begin_zoom(pixel_of(&explorer, target)),
        ZoomOutcome::Unchanged
    ));
    assert_eq!(explorer.state(), deepest);
    assert!(!explorer.is_busy());

    // At 16 addresses per pixel the heap is hit exactly.
    let heap = explorer.hit_test(pixel_of(&explorer, target)).unwrap();
    assert_eq!(heap.base_label(), "[heap]");

    explorer.reset().unwrap();
    assert!(explorer.state().is_root());
}

#[test]
fn busy_sessions_reject_every_change() {
    let mut explorer = explorer();
    let ZoomOutcome::Started(transition) = explorer.begin_zoom(Point::new(500.0, 500.0)) else {
        panic!("root zoom did not start");
    };
    assert!(explorer.is_busy());
    assert_eq!(explorer.state(), transition.to);

    assert!(matches!(
        explorer.begin_zoom(Point::new(10.0, 10.0)),
        ZoomOutcome::Busy
    ));
    assert!(!explorer.zoom_in(Point::new(10.0, 10.0)));
    assert_eq!(explorer.reset(), Err(ExplorerError::Busy));
    assert_eq!(
        explorer.replace_regions(RegionIndex::default()),
        Err(ExplorerError::Busy)
    );
    assert_eq!(explorer.state(), transition.to);

    assert!(explorer.finish_transition());
    assert!(!explorer.finish_transition());
    assert!(explorer.zoom_in(Point::new(10.0, 10.0)));
    assert_eq!(explorer.state().level(), 2);
}

#[test]
fn view_state_survives_a_round_trip() {
    let mut explorer = explorer();
    assert!(explorer.zoom_in(Point::new(700.0, 100.0)));
    assert!(explorer.zoom_in(Point::new(33.0, 900.0)));
    let query = explorer.state().to_query();
    let frame = explorer.render();

    let mut restored = self::explorer();
    let state = ZoomState::from_query(restored.space(), &query).unwrap();
    restored.restore_state(state).unwrap();
    assert_eq!(restored.state(), explorer.state());
    assert_eq!(restored.render(), frame);
}

#[test]
fn inconsistent_states_are_refused() {
    let mut explorer = explorer();
    let other = AddressSpace::ipv4().unwrap();
    let state = ZoomState::root(&other);
    assert!(matches!(
        explorer.restore_state(state),
        Err(ExplorerError::InvalidState(_))
    ));
    assert!(explorer.state().is_root());
}

#[test]
fn round_trip_stays_within_one_pixel_bucket() {
    let mut explorer = explorer();
    let target = 0x7fff_f7dd_3000_u64;
    loop {
        let state = explorer.state();
        let space = explorer.space();
        let pixel = pixel_of(&explorer, target);
        let address = state.pixel_to_address(space, pixel).unwrap();
        assert_eq!(
            state.address_to_pixel(space, address),
            state.address_to_pixel(space, target)
        );
        assert!(
            address.abs_diff(target) < state.bytes_per_pixel(space),
            "level {}",
            state.level()
        );
        if !explorer.zoom_in(pixel) {
            break;
        }
    }
    assert_eq!(explorer.state().level(), 4);
}

#[test]
fn highlight_can_be_undone() {
    let explorer = explorer();
    let region: &AddressRange = explorer.index().find_label("[stack]").unwrap();
    let mut frame = explorer.render();
    let before = frame.clone();
    let shading = Shading::apply(
        &mut frame,
        region,
        &explorer.state(),
        explorer.space(),
        explorer.options().highlight,
    );
    shading.restore(&mut frame);
    assert_eq!(frame, before);
}

#[test]
fn replacing_regions_keeps_the_view() {
    let mut explorer = explorer();
    assert!(explorer.zoom_in(Point::new(200.0, 200.0)));
    let state = explorer.state();
    let background = explorer.options().background;
    explorer.replace_regions(RegionIndex::default()).unwrap();
    assert_eq!(explorer.state(), state);
    assert_eq!(explorer.render().count(background), 1024 * 1024);
}
