// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Invalid argument passed to the curve codec or a layout constructor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveError {
    /// The curve order is zero or larger than [`crate::MAX_ORDER`].
    InvalidOrder(u32),
    /// The index does not address a cell of the curve.
    IndexOutOfRange {
        /// Offending index.
        index: u64,
        /// Number of cells on the curve.
        len: u64,
    },
    /// A coordinate lies outside the grid.
    CoordinateOutOfRange {
        /// Offending x coordinate.
        x: u32,
        /// Offending y coordinate.
        y: u32,
        /// Side length of the grid.
        side: u64,
    },
    /// A layout was declared without any tiles.
    EmptyLayout,
    /// A tile does not fit in the `u32` coordinate space.
    TileOutOfBounds(usize),
    /// Two tiles of a layout cover the same cell.
    OverlappingTiles(usize, usize),
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOrder(order) => {
                write!(f, "curve order {order} is outside 1..={}", crate::MAX_ORDER)
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "curve index {index} is out of range for a curve of {len} cells")
            }
            Self::CoordinateOutOfRange { x, y, side } => {
                write!(f, "coordinate ({x}, {y}) is outside a {side}x{side} grid")
            }
            Self::EmptyLayout => f.write_str("curve layout has no tiles"),
            Self::TileOutOfBounds(tile) => {
                write!(f, "tile {tile} does not fit in the coordinate space")
            }
            Self::OverlappingTiles(a, b) => write!(f, "tiles {a} and {b} overlap"),
        }
    }
}

impl core::error::Error for CurveError {}
