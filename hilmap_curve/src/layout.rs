// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layouts made of several equal-order curve tiles.
//!
//! Tile `k` covers indices `[k * 4^order, (k + 1) * 4^order)` of the layout.
//! Each tile is a plain [`HilbertCurve`] whose local coordinates are passed
//! through a [`TileTransform`] and then translated by the tile origin.

use alloc::vec::Vec;

use crate::error::CurveError;
use crate::hilbert::HilbertCurve;

/// Axis transform applied to a tile's local coordinates.
///
/// Every variant is its own inverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TileTransform {
    /// Local coordinates are used as-is.
    #[default]
    Identity,
    /// Mirror across the vertical axis: `x -> side - 1 - x`.
    ReflectX,
    /// Mirror across the horizontal axis: `y -> side - 1 - y`.
    ReflectY,
    /// Mirror across both axes.
    Rotate180,
    /// Swap `x` and `y`.
    Transpose,
}

impl TileTransform {
    #[inline]
    fn apply(self, side: u32, x: u32, y: u32) -> (u32, u32) {
        let last = side - 1;
        match self {
            Self::Identity => (x, y),
            Self::ReflectX => (last - x, y),
            Self::ReflectY => (x, last - y),
            Self::Rotate180 => (last - x, last - y),
            Self::Transpose => (y, x),
        }
    }
}

/// One curve tile of a [`CurveLayout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Tile {
    /// Top-left corner of the tile in layout coordinates.
    pub origin: (u32, u32),
    /// Transform applied to local curve coordinates before translation.
    pub transform: TileTransform,
}

impl Tile {
    /// Creates a tile at `origin` with the given transform.
    #[must_use]
    pub const fn new(origin: (u32, u32), transform: TileTransform) -> Self {
        Self { origin, transform }
    }
}

/// A sequence of non-overlapping curve tiles traversed in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveLayout {
    curve: HilbertCurve,
    tiles: Vec<Tile>,
    bounds: (u32, u32),
}

impl CurveLayout {
    /// Creates a layout of `order`-sized tiles.
    ///
    /// The tile side must fit in `u32` together with every tile origin, and
    /// no two tiles may overlap.
    pub fn new(order: u32, tiles: Vec<Tile>) -> Result<Self, CurveError> {
        let curve = HilbertCurve::new(order)?;
        if tiles.is_empty() {
            return Err(CurveError::EmptyLayout);
        }
        let side = u32::try_from(curve.side()).map_err(|_| CurveError::InvalidOrder(order))?;

        let mut bounds = (0_u32, 0_u32);
        for (i, tile) in tiles.iter().enumerate() {
            let max_x = tile
                .origin
                .0
                .checked_add(side)
                .ok_or(CurveError::TileOutOfBounds(i))?;
            let max_y = tile
                .origin
                .1
                .checked_add(side)
                .ok_or(CurveError::TileOutOfBounds(i))?;
            bounds = (bounds.0.max(max_x), bounds.1.max(max_y));

            for (j, other) in tiles[..i].iter().enumerate() {
                let apart_x = tile.origin.0.abs_diff(other.origin.0) >= side;
                let apart_y = tile.origin.1.abs_diff(other.origin.1) >= side;
                if !apart_x && !apart_y {
                    return Err(CurveError::OverlappingTiles(j, i));
                }
            }
        }

        Ok(Self {
            curve,
            tiles,
            bounds,
        })
    }

    /// A layout holding one untransformed curve at the origin.
    pub fn single(order: u32) -> Result<Self, CurveError> {
        Self::new(order, alloc::vec![Tile::default()])
    }

    /// Two curves stacked vertically and joined into one continuous path.
    ///
    /// Both tiles are transposed so the first ends in its bottom-left cell,
    /// directly above the cell where the second begins.
    pub fn stacked(order: u32) -> Result<Self, CurveError> {
        let side = u32::try_from(HilbertCurve::new(order)?.side())
            .map_err(|_| CurveError::InvalidOrder(order))?;
        Self::new(
            order,
            alloc::vec![
                Tile::new((0, 0), TileTransform::Transpose),
                Tile::new((0, side), TileTransform::Transpose),
            ],
        )
    }

    /// Returns the per-tile curve.
    #[must_use]
    pub fn curve(&self) -> HilbertCurve {
        self.curve
    }

    /// Returns the tiles in traversal order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Returns the `(width, height)` of the smallest origin-anchored
    /// rectangle covering every tile.
    #[must_use]
    pub fn bounds(&self) -> (u32, u32) {
        self.bounds
    }

    /// Returns the total number of cells across all tiles.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.tiles.len() as u64 * self.curve.len()
    }

    /// Always `false`: layouts hold at least one tile.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Decodes a layout index into layout coordinates.
    pub fn index_to_xy(&self, index: u64) -> Result<(u32, u32), CurveError> {
        let per_tile = self.curve.len();
        let tile = usize::try_from(index / per_tile)
            .ok()
            .and_then(|t| self.tiles.get(t))
            .ok_or(CurveError::IndexOutOfRange {
                index,
                len: self.len(),
            })?;
        let (lx, ly) = self.curve.index_to_xy(index % per_tile)?;
        let (tx, ty) = tile.transform.apply(self.tile_side(), lx, ly);
        Ok((tile.origin.0 + tx, tile.origin.1 + ty))
    }

    /// Encodes layout coordinates into a layout index.
    ///
    /// Returns `None` for cells not covered by any tile.
    #[must_use]
    pub fn xy_to_index(&self, x: u32, y: u32) -> Option<u64> {
        let side = self.tile_side();
        self.tiles.iter().enumerate().find_map(|(k, tile)| {
            let lx = x.checked_sub(tile.origin.0).filter(|&v| v < side)?;
            let ly = y.checked_sub(tile.origin.1).filter(|&v| v < side)?;
            let (cx, cy) = tile.transform.apply(side, lx, ly);
            let local = self.curve.xy_to_index(cx, cy).ok()?;
            Some(k as u64 * self.curve.len() + local)
        })
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "checked against u32 in the constructor"
    )]
    fn tile_side(&self) -> u32 {
        self.curve.side() as u32
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{CurveLayout, Tile, TileTransform};
    use crate::CurveError;

    fn assert_bijective(layout: &CurveLayout) {
        for i in 0..layout.len() {
            let (x, y) = layout.index_to_xy(i).unwrap();
            assert_eq!(layout.xy_to_index(x, y), Some(i), "index {i}");
        }
    }

    #[test]
    fn single_matches_plain_curve() {
        let layout = CurveLayout::single(3).unwrap();
        let curve = layout.curve();
        for i in 0..layout.len() {
            assert_eq!(layout.index_to_xy(i), curve.index_to_xy(i));
        }
        assert_eq!(layout.bounds(), (8, 8));
    }

    #[test]
    fn stacked_is_continuous_across_the_seam() {
        let layout = CurveLayout::stacked(4).unwrap();
        assert_eq!(layout.bounds(), (16, 32));
        assert_bijective(&layout);

        let mut prev = layout.index_to_xy(0).unwrap();
        for i in 1..layout.len() {
            let next = layout.index_to_xy(i).unwrap();
            let dist = prev.0.abs_diff(next.0) + prev.1.abs_diff(next.1);
            assert_eq!(dist, 1, "step {i}");
            prev = next;
        }
    }

    #[test]
    fn every_transform_is_bijective() {
        for transform in [
            TileTransform::Identity,
            TileTransform::ReflectX,
            TileTransform::ReflectY,
            TileTransform::Rotate180,
            TileTransform::Transpose,
        ] {
            let layout = CurveLayout::new(
                2,
                vec![
                    Tile::new((0, 0), TileTransform::Identity),
                    Tile::new((0, 4), transform),
                ],
            )
            .unwrap();
            assert_bijective(&layout);
        }
    }

    #[test]
    fn reflected_tile_mirrors_first_tile() {
        let layout = CurveLayout::new(
            2,
            vec![
                Tile::new((0, 0), TileTransform::Identity),
                Tile::new((0, 4), TileTransform::ReflectY),
            ],
        )
        .unwrap();
        // Index 0 of the second tile sits in its bottom-left cell.
        assert_eq!(layout.index_to_xy(16), Ok((0, 7)));
        assert_eq!(layout.index_to_xy(31), Ok((3, 7)));
    }

    #[test]
    fn gaps_and_out_of_range_indices() {
        let layout = CurveLayout::new(
            1,
            vec![
                Tile::new((0, 0), TileTransform::Identity),
                Tile::new((4, 0), TileTransform::Identity),
            ],
        )
        .unwrap();
        assert_eq!(layout.bounds(), (6, 2));
        assert_eq!(layout.xy_to_index(2, 0), None);
        assert_eq!(layout.xy_to_index(4, 0), Some(4));
        assert_eq!(
            layout.index_to_xy(8),
            Err(CurveError::IndexOutOfRange { index: 8, len: 8 })
        );
    }

    #[test]
    fn invalid_layouts_are_rejected() {
        assert_eq!(CurveLayout::new(2, vec![]), Err(CurveError::EmptyLayout));
        assert_eq!(
            CurveLayout::new(
                2,
                vec![
                    Tile::new((0, 0), TileTransform::Identity),
                    Tile::new((3, 3), TileTransform::Identity),
                ]
            ),
            Err(CurveError::OverlappingTiles(0, 1))
        );
        assert_eq!(
            CurveLayout::new(2, vec![Tile::new((u32::MAX - 1, 0), TileTransform::Identity)]),
            Err(CurveError::TileOutOfBounds(0))
        );
    }
}
