// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

use kurbo::{Point, Rect, Vec2};

use crate::space::{AddressSpace, SUBDIVISION, SUBDIVISION_SIDE};

/// Hierarchical view over an [`AddressSpace`].
///
/// A `ZoomState` is an immutable value: [`ZoomState::zoom_in`] and
/// [`ZoomState::reset`] return a new state and leave `self` untouched, so a
/// caller holding the current state either sees the old view or the new one,
/// never a mix.
///
/// Invariants (checked by [`ZoomState::validate`]):
/// - `level == 0` means the whole address space with a zero offset.
/// - `max_addr - min_addr == ceiling / 64^level`, and `min_addr` is a
///   multiple of that width.
/// - `offset` is the top-left corner of the visible canonical window. It is
///   integral, aligned to the window side, and the window it anchors holds
///   exactly the addresses `[min_addr, max_addr)`.
///
/// With the `serde` feature, deserialization checks what it can without an
/// [`AddressSpace`] (a non-empty aligned range, integral non-negative
/// offsets). Call [`ZoomState::validate`] before using a deserialized state;
/// until then the transforms may return `None` but never panic.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawZoomState")
)]
pub struct ZoomState {
    level: u32,
    min_addr: u64,
    max_addr: u64,
    offset: Vec2,
}

impl ZoomState {
    /// The root view: level 0 over the whole address space.
    #[must_use]
    pub fn root(space: &AddressSpace) -> Self {
        Self {
            level: 0,
            min_addr: 0,
            max_addr: space.ceiling(),
            offset: Vec2::ZERO,
        }
    }

    /// Builds a state from its parts, checking every invariant against `space`.
    pub fn from_parts(
        space: &AddressSpace,
        level: u32,
        min_addr: u64,
        max_addr: u64,
        offset: Vec2,
    ) -> Result<Self, ViewStateError> {
        let state = Self {
            level,
            min_addr,
            max_addr,
            offset,
        };
        state.validate(space)?;
        Ok(state)
    }

    /// Checks the invariants of this state against `space`.
    ///
    /// States produced by [`ZoomState::root`] and [`ZoomState::zoom_in`]
    /// always pass; this is meant for states restored from outside.
    pub fn validate(&self, space: &AddressSpace) -> Result<(), ViewStateError> {
        let Some(units) = space.units_per_pixel(self.level) else {
            return Err(ViewStateError::LevelOutOfRange {
                level: self.level,
                max_level: space.max_level(),
            });
        };

        let width = space.range_at_level(self.level);
        let range_ok = self.max_addr <= space.ceiling()
            && self.max_addr.checked_sub(self.min_addr) == Some(width)
            && self.min_addr % width == 0;
        if !range_ok {
            return Err(ViewStateError::RangeMismatch {
                level: self.level,
                min_addr: self.min_addr,
                max_addr: self.max_addr,
            });
        }

        let mismatch = || ViewStateError::OffsetMismatch {
            x: self.offset.x,
            y: self.offset.y,
        };
        let window = units * u64::from(space.resolution());
        let side = space.canonical_side();
        let to_unit = |v: f64| -> Option<u32> {
            // Rejects NaN, negatives, fractions and values past the grid.
            if !(v >= 0.0 && v < side as f64) {
                return None;
            }
            #[expect(
                clippy::cast_possible_truncation,
                reason = "bounded by the canonical side, at most 2^31"
            )]
            let unit = v as u32;
            (f64::from(unit) == v && u64::from(unit) % window == 0).then_some(unit)
        };
        let (Some(ox), Some(oy)) = (to_unit(self.offset.x), to_unit(self.offset.y)) else {
            return Err(mismatch());
        };
        // The window is an aligned Hilbert block, so any cell in it identifies
        // its address range.
        let anchor = space.canonical_xy_to_address(ox, oy).ok_or_else(mismatch)?;
        if anchor - anchor % width != self.min_addr {
            return Err(mismatch());
        }
        Ok(())
    }

    /// Returns the zoom level (number of 8×8 subdivisions since the root).
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Returns the first visible address.
    #[must_use]
    pub fn min_addr(&self) -> u64 {
        self.min_addr
    }

    /// Returns the exclusive end of the visible address range.
    #[must_use]
    pub fn max_addr(&self) -> u64 {
        self.max_addr
    }

    /// Returns the top-left corner of the visible window in canonical units.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Returns `true` for the root view.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    /// Returns the width of the visible address range.
    #[must_use]
    pub fn width(&self) -> u64 {
        self.max_addr - self.min_addr
    }

    /// Returns `true` if `address` lies in the visible range.
    #[must_use]
    pub fn contains_address(&self, address: u64) -> bool {
        (self.min_addr..self.max_addr).contains(&address)
    }

    /// Pixels per canonical unit at this level.
    ///
    /// Returns `None` when the level is deeper than `space` allows.
    #[must_use]
    pub fn zoom_factor(&self, space: &AddressSpace) -> Option<f64> {
        space.zoom_factor(self.level)
    }

    /// Addresses sampled per rendered pixel, never less than one.
    ///
    /// When the visible range has fewer addresses than the frame has pixels
    /// the true ratio is fractional; it is floored to `1` so sampling loops
    /// always advance.
    #[must_use]
    pub fn bytes_per_pixel(&self, space: &AddressSpace) -> u64 {
        let pixels = u64::from(space.resolution()) * u64::from(space.resolution());
        (self.width() / pixels).max(1)
    }

    /// Returns the canonical rectangle covered by the viewport.
    #[must_use]
    pub fn canonical_window(&self, space: &AddressSpace) -> Option<Rect> {
        let side = (space.units_per_pixel(self.level)? * u64::from(space.resolution())) as f64;
        Some(Rect::from_origin_size(self.offset.to_point(), (side, side)))
    }

    /// Maps an address to the pixel it lands on under this view.
    ///
    /// Returns `None` when the address is outside the address space or its
    /// pixel falls outside the frame.
    #[must_use]
    pub fn address_to_pixel(&self, space: &AddressSpace, address: u64) -> Option<(u32, u32)> {
        self.canonical_to_pixel(space, space.address_to_canonical(address)?)
    }

    /// Maps a canonical curve index to the pixel it lands on under this view.
    ///
    /// Returns `None` when the index is off the canonical curve or its pixel
    /// falls outside the frame.
    #[must_use]
    pub fn canonical_to_pixel(&self, space: &AddressSpace, index: u64) -> Option<(u32, u32)> {
        let (cx, cy) = space.canonical_curve().index_to_xy(index).ok()?;
        let (ox, oy) = self.offset_units();
        let shift = space.level_shift(self.level)?;
        let resolution = space.resolution();
        // Arithmetic shift floors negative distances, matching
        // `floor((x - offset) * zoom_factor)`.
        let to_pixel = |c: u32, o: i64| {
            u32::try_from(i64::from(c).checked_sub(o)? >> shift)
                .ok()
                .filter(|&p| p < resolution)
        };
        Some((to_pixel(cx, ox)?, to_pixel(cy, oy)?))
    }

    /// Maps a pixel position to canonical grid coordinates.
    ///
    /// This is the exact inverse of [`ZoomState::address_to_pixel`]; for
    /// integral pixel coordinates the result is the pixel's top-left canonical
    /// cell. Returns `None` when the position falls outside the canonical grid.
    #[must_use]
    pub fn pixel_to_canonical(&self, space: &AddressSpace, pixel: Point) -> Option<(u32, u32)> {
        let units = space.units_per_pixel(self.level)? as f64;
        let side = space.canonical_side() as f64;
        let to_unit = |o: f64, p: f64| {
            let c = o + p * units;
            // Truncation is a floor for non-negative values.
            #[expect(
                clippy::cast_possible_truncation,
                reason = "bounded by the canonical side, at most 2^31"
            )]
            let unit = c as u32;
            (c >= 0.0 && c < side).then_some(unit)
        };
        Some((to_unit(self.offset.x, pixel.x)?, to_unit(self.offset.y, pixel.y)?))
    }

    /// Maps a pixel position to the address it represents.
    #[must_use]
    pub fn pixel_to_address(&self, space: &AddressSpace, pixel: Point) -> Option<u64> {
        let (x, y) = self.pixel_to_canonical(space, pixel)?;
        space.canonical_xy_to_address(x, y)
    }

    /// Zooms into the 8×8 grid cell under `pixel`.
    ///
    /// Returns `None` (leaving the caller's state as it was) when the view is
    /// already at the deepest level or `pixel` is outside the frame.
    #[must_use]
    pub fn zoom_in(&self, space: &AddressSpace, pixel: Point) -> Option<Self> {
        if self.level >= space.max_level() {
            return None;
        }
        let resolution = f64::from(space.resolution());
        if !(0.0..resolution).contains(&pixel.x) || !(0.0..resolution).contains(&pixel.y) {
            return None;
        }
        let address = self.pixel_to_address(space, pixel)?;
        if !self.contains_address(address) {
            return None;
        }

        let sub_width = self.width() / SUBDIVISION;
        let min_addr = self.min_addr + (address - self.min_addr) / sub_width * sub_width;

        let cell_pixels = space.resolution() / SUBDIVISION_SIDE;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "pixel is inside the frame"
        )]
        let (col, row) = (pixel.x as u32 / cell_pixels, pixel.y as u32 / cell_pixels);
        // `cell_pixels / zoom_factor` canonical units per grid cell.
        let step = (u64::from(cell_pixels) * space.units_per_pixel(self.level)?) as f64;
        let offset = self.offset + Vec2::new(f64::from(col) * step, f64::from(row) * step);

        Some(Self {
            level: self.level + 1,
            min_addr,
            max_addr: min_addr + sub_width,
            offset,
        })
    }

    /// Returns the root view. Reset is the only way back up the hierarchy.
    #[must_use]
    pub fn reset(space: &AddressSpace) -> Self {
        Self::root(space)
    }

    /// Serializes the state into its compact query form, for example
    /// `level=1&min=0x0&max=0x40000000000&x=0&y=0`.
    #[must_use]
    pub fn to_query(&self) -> String {
        alloc::format!("{self}")
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "offsets are validated to be integral and inside the canonical grid"
    )]
    fn offset_units(&self) -> (i64, i64) {
        (self.offset.x as i64, self.offset.y as i64)
    }
}

/// Wire form of [`ZoomState`], checked on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawZoomState {
    level: u32,
    min_addr: u64,
    max_addr: u64,
    offset: Vec2,
}

#[cfg(feature = "serde")]
impl TryFrom<RawZoomState> for ZoomState {
    type Error = ViewStateError;

    fn try_from(raw: RawZoomState) -> Result<Self, Self::Error> {
        let width = raw.max_addr.saturating_sub(raw.min_addr);
        if !width.is_power_of_two() || raw.min_addr % width != 0 {
            return Err(ViewStateError::RangeMismatch {
                level: raw.level,
                min_addr: raw.min_addr,
                max_addr: raw.max_addr,
            });
        }
        let unit = |v: f64| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "out-of-range values saturate and fail the comparison"
            )]
            let truncated = v as u32;
            v >= 0.0 && f64::from(truncated) == v
        };
        if !(unit(raw.offset.x) && unit(raw.offset.y)) {
            return Err(ViewStateError::OffsetMismatch {
                x: raw.offset.x,
                y: raw.offset.y,
            });
        }
        Ok(Self {
            level: raw.level,
            min_addr: raw.min_addr,
            max_addr: raw.max_addr,
            offset: raw.offset,
        })
    }
}

impl fmt::Display for ZoomState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "level={}&min={:#x}&max={:#x}&x={}&y={}",
            self.level, self.min_addr, self.max_addr, self.offset.x, self.offset.y
        )
    }
}

/// Error restoring a [`ZoomState`] from outside.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewStateError {
    /// A required key is absent from the serialized form.
    MissingKey(&'static str),
    /// A value could not be parsed.
    InvalidValue {
        /// Key whose value is malformed.
        key: &'static str,
        /// The raw value.
        value: String,
    },
    /// The level exceeds the deepest level of the address space.
    LevelOutOfRange {
        /// Requested level.
        level: u32,
        /// Deepest supported level.
        max_level: u32,
    },
    /// The address range does not match the level's subdivision.
    RangeMismatch {
        /// Requested level.
        level: u32,
        /// Requested first address.
        min_addr: u64,
        /// Requested end address.
        max_addr: u64,
    },
    /// The offset is not an aligned window anchoring the address range.
    OffsetMismatch {
        /// Requested x offset.
        x: f64,
        /// Requested y offset.
        y: f64,
    },
}

impl fmt::Display for ViewStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey(key) => write!(f, "view state is missing `{key}`"),
            Self::InvalidValue { key, value } => {
                write!(f, "view state has an invalid `{key}`: {value:?}")
            }
            Self::LevelOutOfRange { level, max_level } => {
                write!(f, "zoom level {level} exceeds the maximum of {max_level}")
            }
            Self::RangeMismatch {
                level,
                min_addr,
                max_addr,
            } => write!(
                f,
                "range {min_addr:#x}..{max_addr:#x} is not a level {level} subdivision"
            ),
            Self::OffsetMismatch { x, y } => {
                write!(f, "offset ({x}, {y}) does not anchor the visible range")
            }
        }
    }
}

impl core::error::Error for ViewStateError {}
