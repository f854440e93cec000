// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hilmap Index: labeled address ranges and the ordered index over them.
//!
//! This crate provides:
//! - [`AddressRange`]: a half-open `[start, end)` range with a label and a
//!   display color, clamped to the address-space ceiling at construction.
//! - [`RegionIndex`]: ranges sorted by start with first-match point lookup
//!   and half-open window filtering.
//! - [`Palette`]: memoized, deterministic label colors. Labels sharing a base
//!   name share a hue; a trailing `{rwx}` annotation only changes saturation.
//! - [`parse`](crate::parse()): line-oriented readers for the native
//!   `<start> <end> <label>` format and `/proc/<pid>/maps`-style dumps.
//!
//! ## Minimal example
//!
//! ```rust
//! use hilmap_index::{InputFormat, Palette, parse};
//!
//! let text = "\
//! 1000 2000 a
//! 500 1500 b
//! zz 10 broken
//! ";
//! let mut palette = Palette::new();
//! let report = parse(text, InputFormat::Native, 1 << 48, &mut palette);
//! assert_eq!(report.skipped.len(), 1);
//!
//! let index = report.into_index();
//! // Sorted by start; the earlier-starting `b` wins where the two overlap.
//! assert_eq!(index.ranges()[0].label(), "b");
//! assert_eq!(index.lookup(0x1200).map(|r| r.label()), Some("b"));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod index;
mod palette;
mod parse;
mod range;

pub use index::RegionIndex;
pub use palette::{Palette, Swatch};
pub use parse::{InputFormat, ParseReport, SkipReason, SkippedLine, parse, parse_auto};
pub use range::{AddressRange, Permissions, split_label, unnamed_label};

pub use peniko::color::Rgba8;
