// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region rasterization.
//!
//! Rendering is a *sampling* loop: every visible region is clipped to the
//! view and walked in steps of [`ZoomState::bytes_per_pixel`], and each
//! sampled address is placed with the forward transform. At shallow zoom a
//! step covers many addresses, so a region narrower than one step may be
//! missed entirely, and one that straddles a step boundary may light a
//! single pixel for far more than its share. That imprecision is inherent to
//! the approach and is not corrected here.
//!
//! The opposite case arises in spaces narrower than the canonical grid (IPv4
//! on the default 2^24 grid): deep enough in, one address spans a block of
//! several pixels. Each visible address then fills its whole block, so
//! regions stay solid and agree with hit testing.
//!
//! Regions are visited in ascending start order and later writes win, so
//! where two regions share a pixel the one starting higher is on top.

use hilmap_index::{AddressRange, RegionIndex};
use hilmap_view::{AddressSpace, ZoomState};
use peniko::color::Rgba8;

use crate::buffer::PixelBuffer;

/// Colors used by the grid overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridStyle {
    /// Side of a coarse block in pixels.
    pub coarse_block: u32,
    /// Side of a fine block in pixels.
    pub fine_block: u32,
    /// Line color for boundaries between blocks adjacent in address order.
    pub contiguous: Rgba8,
    /// Line color for boundaries where the address order jumps.
    pub discontinuous: Rgba8,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            coarse_block: 128,
            fine_block: 16,
            contiguous: Rgba8 {
                r: 160,
                g: 160,
                b: 160,
                a: 255,
            },
            discontinuous: Rgba8 {
                r: 255,
                g: 255,
                b: 255,
                a: 255,
            },
        }
    }
}

/// Presentation options shared by rendering and the overlays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    /// Color of pixels no region reaches.
    pub background: Rgba8,
    /// Grid overlay style.
    pub grid: GridStyle,
    /// Stripe color of the highlight overlay.
    pub highlight: Rgba8,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: Rgba8 {
                r: 24,
                g: 24,
                b: 24,
                a: 255,
            },
            grid: GridStyle::default(),
            highlight: Rgba8 {
                r: 255,
                g: 255,
                b: 255,
                a: 255,
            },
        }
    }
}

/// Renders the regions visible in `state` into an `R × R` buffer.
///
/// An empty index yields a background-only buffer. When the view holds fewer
/// addresses than the frame has pixels the step is one address.
#[must_use]
pub fn render(
    index: &RegionIndex,
    state: &ZoomState,
    space: &AddressSpace,
    options: &RenderOptions,
) -> PixelBuffer {
    let resolution = space.resolution();
    let mut buffer = PixelBuffer::new(resolution, resolution, options.background);
    let mut regions = 0_usize;
    let mut samples = 0_u64;
    for region in index.visible_ranges(state.min_addr(), state.max_addr()) {
        let color = region.color();
        samples += for_each_sample(region, state, space, |x, y| buffer.set(x, y, color));
        regions += 1;
    }
    tracing::debug!(
        level = state.level(),
        step = state.bytes_per_pixel(space),
        regions,
        samples,
        "rendered view"
    );
    buffer
}

/// Renders the whole address space on the space's overview layout.
///
/// Each layout cell stands for an equal share of the address space; a cell
/// takes the color of the last region sampled in it. The buffer is sized to
/// the layout's bounds, and cells not covered by any tile keep the
/// background.
#[must_use]
pub fn render_overview(
    index: &RegionIndex,
    space: &AddressSpace,
    options: &RenderOptions,
) -> PixelBuffer {
    let layout = space.overview_layout();
    let (width, height) = layout.bounds();
    let mut buffer = PixelBuffer::new(width, height, options.background);

    let cells = u128::from(layout.len());
    let bucket = u64::try_from((u128::from(space.ceiling()) / cells).max(1)).unwrap_or(u64::MAX);
    let mut samples = 0_u64;
    for region in index.visible_ranges(0, space.ceiling()) {
        let Some((start, end)) = region.clip(0, space.ceiling()) else {
            continue;
        };
        let color = region.color();
        let mut address = start;
        while address < end {
            if let Ok((x, y)) = layout.index_to_xy(address / bucket) {
                buffer.set(x, y, color);
            }
            samples += 1;
            let Some(next) = address.checked_add(bucket) else {
                break;
            };
            address = next;
        }
    }
    tracing::debug!(cells = layout.len(), bucket, samples, "rendered overview");
    buffer
}

/// Walks the part of `region` inside the view in steps of
/// [`ZoomState::bytes_per_pixel`], calling `visit` with each in-frame pixel.
///
/// When one address covers more than one pixel, every pixel of its block is
/// visited. Returns the number of addresses sampled.
pub(crate) fn for_each_sample(
    region: &AddressRange,
    state: &ZoomState,
    space: &AddressSpace,
    mut visit: impl FnMut(u32, u32),
) -> u64 {
    let Some((start, end)) = region.clip(state.min_addr(), state.max_addr()) else {
        return 0;
    };
    let Some(units_per_pixel) = space.units_per_pixel(state.level()) else {
        return 0;
    };
    // Canonical cells per pixel. An aligned run of that many curve indices is
    // one pixel-aligned square.
    let pixel_cells = units_per_pixel * units_per_pixel;
    let address_cells = space.units_per_address();
    let step = state.bytes_per_pixel(space);
    let mut samples = 0;
    let mut address = start;
    while address < end {
        if address_cells > pixel_cells {
            let Some(first) = space.address_to_canonical(address) else {
                break;
            };
            let mut cell = first;
            while cell < first + address_cells {
                if let Some((x, y)) = state.canonical_to_pixel(space, cell) {
                    visit(x, y);
                }
                cell += pixel_cells;
            }
        } else if let Some((x, y)) = state.address_to_pixel(space, address) {
            visit(x, y);
        }
        samples += 1;
        let Some(next) = address.checked_add(step) else {
            break;
        };
        address = next;
    }
    samples
}
