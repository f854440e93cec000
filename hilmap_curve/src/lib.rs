// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hilmap Curve: a Hilbert curve codec.
//!
//! This crate converts between a 1D ordinal on a Hilbert curve and integer
//! coordinates on a `2^order × 2^order` grid. It focuses on:
//! - Exact, allocation-free conversion in both directions for orders up to
//!   [`MAX_ORDER`].
//! - Rejecting invalid orders, indices and coordinates at the boundary instead
//!   of silently wrapping them.
//! - Composing several equal-order curves into a [`CurveLayout`], each tile
//!   placed by a translation and one of a few axis transforms.
//!
//! Consecutive indices always land on grid-adjacent cells, which is the
//! property the rest of Hilmap relies on to keep nearby addresses nearby on
//! screen.
//!
//! ## Minimal example
//!
//! ```rust
//! use hilmap_curve::HilbertCurve;
//!
//! let curve = HilbertCurve::new(2).unwrap();
//! assert_eq!(curve.side(), 4);
//! assert_eq!(curve.index_to_xy(0).unwrap(), (0, 0));
//! assert_eq!(curve.index_to_xy(15).unwrap(), (3, 0));
//! assert_eq!(curve.xy_to_index(3, 0).unwrap(), 15);
//! ```
//!
//! ## Layouts
//!
//! ```rust
//! use hilmap_curve::CurveLayout;
//!
//! // Two order-4 curves stacked vertically and joined into one path.
//! let layout = CurveLayout::stacked(4).unwrap();
//! assert_eq!(layout.len(), 2 * 256);
//! assert_eq!(layout.bounds(), (16, 32));
//!
//! let (x, y) = layout.index_to_xy(300).unwrap();
//! assert_eq!(layout.xy_to_index(x, y), Some(300));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod error;
mod hilbert;
mod layout;

pub use error::CurveError;
pub use hilbert::{HilbertCurve, MAX_ORDER, index_to_xy, xy_to_index};
pub use layout::{CurveLayout, Tile, TileTransform};
