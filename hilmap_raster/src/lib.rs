// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hilmap Raster: turns a region index and a view into pixels.
//!
//! This crate provides:
//! - [`render`]: samples every visible region and places it with the
//!   forward transform into an `R × R` [`PixelBuffer`].
//! - [`render_overview`]: a zoomless image of the whole address space on the
//!   space's overview curve layout.
//! - A locality grid ([`classify_grid`], [`draw_grid`]) marking where
//!   neighboring blocks are, and are not, neighbors in address order.
//! - A reversible highlight ([`Shading`]).
//! - Hit testing ([`hit_test`], [`probe`]).
//! - [`Explorer`]: a session owning the current view that rejects new zooms
//!   while a transition is in flight.
//!
//! ## Minimal example
//!
//! ```rust
//! use hilmap_index::{InputFormat, Palette, parse};
//! use hilmap_raster::{Explorer, ZoomOutcome};
//! use hilmap_view::AddressSpace;
//! use kurbo::Point;
//!
//! let space = AddressSpace::memory_map().unwrap();
//! let mut palette = Palette::new();
//! let index = parse(
//!     "555555554000 555555556000 /bin/true\n7ffff7dd3000 7ffff7dfc000 ld.so\n",
//!     InputFormat::Native,
//!     space.ceiling(),
//!     &mut palette,
//! )
//! .into_index();
//!
//! let mut explorer = Explorer::new(space, index);
//! let frame = explorer.render();
//! assert_eq!(frame.width(), 1024);
//!
//! let ZoomOutcome::Started(transition) = explorer.begin_zoom(Point::new(300.0, 700.0)) else {
//!     unreachable!("the root view can always zoom");
//! };
//! assert_eq!(transition.to.level(), 1);
//! // The new view is already current; further zooms wait for the transition.
//! assert_eq!(explorer.state(), transition.to);
//! assert!(matches!(explorer.begin_zoom(Point::new(1.0, 1.0)), ZoomOutcome::Busy));
//! explorer.finish_transition();
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod buffer;
mod explorer;
mod grid;
mod hit;
mod render;
mod shade;

pub use buffer::PixelBuffer;
pub use explorer::{Explorer, ExplorerError, Transition, ZoomOutcome};
pub use grid::{Boundary, GridSegment, Orientation, classify_grid, draw_grid, paint_grid};
pub use hit::{HitInfo, hit_test, probe};
pub use render::{GridStyle, RenderOptions, render, render_overview};
pub use shade::Shading;
