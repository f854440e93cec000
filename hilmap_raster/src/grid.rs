// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Locality grid overlay.
//!
//! The frame is cut into square blocks. For every pair of neighboring blocks
//! the address at each block's center is sampled and bucketed by the block's
//! address span; the shared edge is [`Boundary::Contiguous`] when the two
//! buckets are consecutive and [`Boundary::Discontinuous`] otherwise. The
//! Hilbert curve keeps most neighbors close, and the discontinuous edges show
//! exactly where it does not.

use alloc::vec::Vec;

use hilmap_view::{AddressSpace, ZoomState};
use kurbo::Point;

use crate::buffer::PixelBuffer;
use crate::render::GridStyle;

/// Relationship between two neighboring blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// The blocks hold consecutive address spans.
    Contiguous,
    /// The address order jumps across the edge.
    Discontinuous,
}

/// Direction of a grid segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// A vertical edge between horizontally neighboring blocks.
    Vertical,
    /// A horizontal edge between vertically neighboring blocks.
    Horizontal,
}

/// One classified edge between two blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSegment {
    /// Direction of the edge.
    pub orientation: Orientation,
    /// Pixel column (vertical) or row (horizontal) of the edge.
    pub position: u32,
    /// First pixel along the edge.
    pub start: u32,
    /// Exclusive last pixel along the edge.
    pub end: u32,
    /// Classification of the edge.
    pub boundary: Boundary,
}

/// Classifies every edge of a grid of `block`-pixel squares over the frame.
///
/// Returns nothing when `block` is zero or larger than the frame. Edges are
/// listed row by row, each block's right edge before its bottom edge.
#[must_use]
pub fn classify_grid(state: &ZoomState, space: &AddressSpace, block: u32) -> Vec<GridSegment> {
    let resolution = space.resolution();
    if block == 0 || block > resolution {
        return Vec::new();
    }
    let blocks = resolution / block;
    let pixels = u128::from(resolution) * u128::from(resolution);
    let span = u128::from(state.width()) * u128::from(block) * u128::from(block) / pixels;
    let span = u64::try_from(span.max(1)).unwrap_or(u64::MAX);

    let bucket = |bx: u32, by: u32| {
        let center = Point::new(
            f64::from(bx * block + block / 2),
            f64::from(by * block + block / 2),
        );
        state
            .pixel_to_address(space, center)
            .map(|address| address / span)
    };
    let classify = |a: Option<u64>, b: Option<u64>| match (a, b) {
        (Some(a), Some(b)) if a.abs_diff(b) == 1 => Boundary::Contiguous,
        _ => Boundary::Discontinuous,
    };

    let mut segments = Vec::new();
    for by in 0..blocks {
        for bx in 0..blocks {
            let here = bucket(bx, by);
            if bx + 1 < blocks {
                segments.push(GridSegment {
                    orientation: Orientation::Vertical,
                    position: (bx + 1) * block,
                    start: by * block,
                    end: (by + 1) * block,
                    boundary: classify(here, bucket(bx + 1, by)),
                });
            }
            if by + 1 < blocks {
                segments.push(GridSegment {
                    orientation: Orientation::Horizontal,
                    position: (by + 1) * block,
                    start: bx * block,
                    end: (bx + 1) * block,
                    boundary: classify(here, bucket(bx, by + 1)),
                });
            }
        }
    }
    segments
}

/// Draws `segments` into `buffer`.
///
/// Discontinuous edges are solid; contiguous edges are dotted, two pixels on
/// and two off.
pub fn paint_grid(buffer: &mut PixelBuffer, segments: &[GridSegment], style: &GridStyle) {
    for segment in segments {
        for t in segment.start..segment.end {
            let color = match segment.boundary {
                Boundary::Discontinuous => style.discontinuous,
                Boundary::Contiguous if t % 4 < 2 => style.contiguous,
                Boundary::Contiguous => continue,
            };
            match segment.orientation {
                Orientation::Vertical => buffer.set(segment.position, t, color),
                Orientation::Horizontal => buffer.set(t, segment.position, color),
            }
        }
    }
}

/// Classifies and draws the fine grid, then the coarse grid on top of it.
pub fn draw_grid(
    buffer: &mut PixelBuffer,
    state: &ZoomState,
    space: &AddressSpace,
    style: &GridStyle,
) {
    for block in [style.fine_block, style.coarse_block] {
        let segments = classify_grid(state, space, block);
        let jumps = segments
            .iter()
            .filter(|s| s.boundary == Boundary::Discontinuous)
            .count();
        tracing::debug!(block, segments = segments.len(), jumps, "classified grid");
        paint_grid(buffer, &segments, style);
    }
}
