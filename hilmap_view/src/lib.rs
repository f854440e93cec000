// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hilmap View: the address space model and the hierarchical zoom state.
//!
//! This crate relates three coordinate systems:
//! - **Addresses**: `u64` positions in `[0, 2^address_bits)`.
//! - **Canonical coordinates**: cells of a fixed high-order Hilbert grid
//!   (order 24 by default). Addresses map onto it with an exact,
//!   order-preserving shift.
//! - **Pixels**: cells of the rendered frame (1024×1024 by default).
//!
//! [`AddressSpace`] holds the fixed geometry. [`ZoomState`] is a small,
//! immutable view value: the zoom level, the visible address range and the
//! canonical offset of the frame's top-left corner. Zooming picks one cell
//! of an 8×8 grid over the frame, so every level narrows the visible range by
//! a factor of 64 and magnifies by 8 along each axis.
//!
//! It does **not** render anything. Callers are expected to:
//! - Own the single current [`ZoomState`] and thread it through rendering and
//!   hit testing.
//! - Serialize it with [`ZoomState::to_query`] when a session ends and restore
//!   it with [`ZoomState::from_query`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use hilmap_view::{AddressSpace, ZoomState};
//!
//! let space = AddressSpace::memory_map().unwrap();
//! let root = ZoomState::root(&space);
//!
//! // Which address does the pixel under the cursor represent?
//! let address = root.pixel_to_address(&space, Point::new(200.5, 310.5)).unwrap();
//! assert_eq!(root.address_to_pixel(&space, address), Some((200, 310)));
//!
//! // Zoom into the grid cell under the cursor.
//! let zoomed = root.zoom_in(&space, Point::new(200.5, 310.5)).unwrap();
//! assert_eq!(zoomed.level(), 1);
//! assert_eq!(zoomed.width(), space.ceiling() / 64);
//! assert!(zoomed.contains_address(address));
//!
//! // Persist and restore.
//! let query = zoomed.to_query();
//! assert_eq!(ZoomState::from_query(&space, &query), Ok(zoomed));
//! ```
//!
//! ## Precision
//!
//! Offsets are stored as `f64` but always hold integral canonical units well
//! below `2^53`, so the forward and inverse transforms are exact inverses of
//! each other at every level. Pixel positions passed to the inverse transform
//! may be fractional; they are floored onto the canonical grid.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod query;
mod space;
mod zoom;

pub use space::{AddressSpace, SUBDIVISION, SUBDIVISION_SIDE, SpaceConfig, SpaceError};
pub use zoom::{ViewStateError, ZoomState};

pub use hilmap_curve as curve;
