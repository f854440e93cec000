// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index/coordinate conversion on a single Hilbert curve.

use crate::error::CurveError;

/// Largest supported curve order.
///
/// At order 31 the grid side is `2^31` and the last index is `2^62 - 1`, so
/// coordinates fit in `u32` and indices (including intermediate products of
/// the encoder) fit in `u64`.
pub const MAX_ORDER: u32 = 31;

/// A Hilbert curve over a `2^order × 2^order` grid.
///
/// The curve starts at `(0, 0)` and ends at `(side - 1, 0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HilbertCurve {
    order: u32,
}

impl HilbertCurve {
    /// Creates a curve of the given order.
    ///
    /// Returns [`CurveError::InvalidOrder`] for order `0` or orders above
    /// [`MAX_ORDER`].
    pub fn new(order: u32) -> Result<Self, CurveError> {
        if order == 0 || order > MAX_ORDER {
            return Err(CurveError::InvalidOrder(order));
        }
        Ok(Self { order })
    }

    /// Returns the curve order (recursion depth).
    #[must_use]
    pub fn order(self) -> u32 {
        self.order
    }

    /// Returns the grid side length, `2^order`.
    #[must_use]
    pub fn side(self) -> u64 {
        1_u64 << self.order
    }

    /// Returns the number of cells on the curve, `4^order`.
    #[must_use]
    pub fn len(self) -> u64 {
        1_u64 << (2 * self.order)
    }

    /// Always `false`: a valid curve has at least four cells.
    #[must_use]
    pub fn is_empty(self) -> bool {
        false
    }

    /// Decodes a curve index into grid coordinates.
    pub fn index_to_xy(self, index: u64) -> Result<(u32, u32), CurveError> {
        if index >= self.len() {
            return Err(CurveError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(decode(index, self.order))
    }

    /// Encodes grid coordinates into a curve index.
    pub fn xy_to_index(self, x: u32, y: u32) -> Result<u64, CurveError> {
        let side = self.side();
        if u64::from(x) >= side || u64::from(y) >= side {
            return Err(CurveError::CoordinateOutOfRange { x, y, side });
        }
        Ok(encode(x, y, self.order))
    }
}

/// Decodes `index` into coordinates on a curve of the given `order`.
///
/// Shorthand for [`HilbertCurve::new`] followed by [`HilbertCurve::index_to_xy`].
pub fn index_to_xy(index: u64, order: u32) -> Result<(u32, u32), CurveError> {
    HilbertCurve::new(order)?.index_to_xy(index)
}

/// Encodes `(x, y)` into an index on a curve of the given `order`.
///
/// Shorthand for [`HilbertCurve::new`] followed by [`HilbertCurve::xy_to_index`].
pub fn xy_to_index(x: u32, y: u32, order: u32) -> Result<u64, CurveError> {
    HilbertCurve::new(order)?.xy_to_index(x, y)
}

/// Reflects and swaps a sub-square so the next scale sees it in canonical
/// orientation.
#[inline]
fn rotate(s: u64, rx: u64, ry: u64, x: &mut u64, y: &mut u64) {
    if ry == 0 {
        if rx == 1 {
            *x = s - 1 - *x;
            *y = s - 1 - *y;
        }
        core::mem::swap(x, y);
    }
}

// Callers guarantee `index < 4^order`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "coordinates are bounded by the grid side, at most 2^31"
)]
fn decode(index: u64, order: u32) -> (u32, u32) {
    let side = 1_u64 << order;
    let (mut x, mut y) = (0_u64, 0_u64);
    let mut t = index;
    let mut s = 1_u64;
    while s < side {
        let rx = 1 & (t >> 1);
        let ry = 1 & (t ^ rx);
        rotate(s, rx, ry, &mut x, &mut y);
        x += s * rx;
        y += s * ry;
        t >>= 2;
        s <<= 1;
    }
    (x as u32, y as u32)
}

// Callers guarantee both coordinates are below `2^order`.
fn encode(x: u32, y: u32, order: u32) -> u64 {
    let (mut x, mut y) = (u64::from(x), u64::from(y));
    let mut index = 0_u64;
    let mut s = (1_u64 << order) >> 1;
    while s > 0 {
        let rx = u64::from(x & s != 0);
        let ry = u64::from(y & s != 0);
        index += s * s * ((3 * rx) ^ ry);
        // Keep only the bits below `s` so the reflection stays inside the sub-square.
        x &= s - 1;
        y &= s - 1;
        rotate(s, rx, ry, &mut x, &mut y);
        s >>= 1;
    }
    index
}
