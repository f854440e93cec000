// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hilmap_index::{AddressRange, RegionIndex};
use hilmap_view::{AddressSpace, ZoomState};
use kurbo::Point;

/// What lies under a pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitInfo<'a> {
    /// The address the pixel represents.
    pub address: u64,
    /// The first region containing `address`, if any.
    pub region: Option<&'a AddressRange>,
}

/// Resolves `pixel` to its address and the region holding it.
///
/// Returns `None` when `pixel` is outside the frame or does not map into the
/// visible address range. A pixel on empty space yields a [`HitInfo`] with no
/// region.
#[must_use]
pub fn probe<'a>(
    index: &'a RegionIndex,
    state: &ZoomState,
    space: &AddressSpace,
    pixel: Point,
) -> Option<HitInfo<'a>> {
    let resolution = f64::from(space.resolution());
    if !(0.0..resolution).contains(&pixel.x) || !(0.0..resolution).contains(&pixel.y) {
        return None;
    }
    let address = state
        .pixel_to_address(space, pixel)
        .filter(|&a| state.contains_address(a))?;
    Some(HitInfo {
        address,
        region: index.lookup(address),
    })
}

/// Returns the region under `pixel`, if any.
#[must_use]
pub fn hit_test<'a>(
    index: &'a RegionIndex,
    state: &ZoomState,
    space: &AddressSpace,
    pixel: Point,
) -> Option<&'a AddressRange> {
    probe(index, state, space, pixel)?.region
}
