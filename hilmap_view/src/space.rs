// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use hilmap_curve::{CurveError, CurveLayout, HilbertCurve};

/// Number of sub-cells along each axis chosen per zoom step.
pub const SUBDIVISION_SIDE: u32 = 8;

/// Number of equal sub-ranges the visible range is split into per zoom step.
pub const SUBDIVISION: u64 = (SUBDIVISION_SIDE as u64) * (SUBDIVISION_SIDE as u64);

/// Plain configuration of an [`AddressSpace`].
///
/// Use [`AddressSpace::new`] to validate it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpaceConfig {
    /// Width of an address in bits; the space covers `[0, 2^address_bits)`.
    pub address_bits: u32,
    /// Order of the rendered pixel grid; frames are `2^resolution_order` pixels square.
    pub resolution_order: u32,
    /// Order of the canonical Hilbert grid shared by every zoom level.
    pub canonical_order: u32,
    /// Deepest zoom level reachable from the root view.
    pub max_level: u32,
}

impl SpaceConfig {
    /// 48-bit process address maps on a 1024×1024 frame.
    pub const MEMORY_MAP: Self = Self {
        address_bits: 48,
        resolution_order: 10,
        canonical_order: 24,
        max_level: 4,
    };

    /// The IPv4 address space on a 1024×1024 frame.
    pub const IPV4: Self = Self {
        address_bits: 32,
        resolution_order: 10,
        canonical_order: 24,
        max_level: 4,
    };
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self::MEMORY_MAP
    }
}

/// Invalid [`SpaceConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpaceError {
    /// Address width outside `1..=62`.
    InvalidAddressBits(u32),
    /// Resolution order below 3 or above the canonical order.
    InvalidResolution {
        /// Requested resolution order.
        resolution_order: u32,
        /// Requested canonical order.
        canonical_order: u32,
    },
    /// More zoom levels than the canonical grid or the address width can resolve.
    TooManyLevels {
        /// Requested deepest level.
        max_level: u32,
        /// Deepest level the configuration supports.
        limit: u32,
    },
    /// The canonical curve or the overview layout is invalid.
    Curve(CurveError),
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddressBits(bits) => {
                write!(f, "address width of {bits} bits is outside 1..=62")
            }
            Self::InvalidResolution {
                resolution_order,
                canonical_order,
            } => write!(
                f,
                "resolution order {resolution_order} must be in 3..={canonical_order} (the canonical order)"
            ),
            Self::TooManyLevels { max_level, limit } => {
                write!(f, "{max_level} zoom levels requested but at most {limit} are resolvable")
            }
            Self::Curve(err) => write!(f, "invalid curve: {err}"),
        }
    }
}

impl core::error::Error for SpaceError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Curve(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CurveError> for SpaceError {
    fn from(err: CurveError) -> Self {
        Self::Curve(err)
    }
}

/// Fixed geometry relating addresses, canonical Hilbert coordinates and pixels.
///
/// Addresses map onto the canonical curve (order `C`) with an exact,
/// order-preserving shift. Pixels at level `L` cover `2^(C - R - 3L)`
/// canonical units per axis, so the root frame shows the whole canonical
/// grid and every zoom step magnifies by [`SUBDIVISION_SIDE`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressSpace {
    config: SpaceConfig,
    canonical: HilbertCurve,
    overview: CurveLayout,
}

impl AddressSpace {
    /// Validates `config` and builds the address space.
    ///
    /// The overview layout defaults to a single curve at the pixel resolution.
    pub fn new(config: SpaceConfig) -> Result<Self, SpaceError> {
        if config.address_bits == 0 || config.address_bits > 62 {
            return Err(SpaceError::InvalidAddressBits(config.address_bits));
        }
        let canonical = HilbertCurve::new(config.canonical_order)?;
        if config.resolution_order < 3 || config.resolution_order > config.canonical_order {
            return Err(SpaceError::InvalidResolution {
                resolution_order: config.resolution_order,
                canonical_order: config.canonical_order,
            });
        }
        // Each level needs three more bits of canonical resolution per pixel
        // and six more bits of address width.
        let limit = ((config.canonical_order - config.resolution_order) / 3)
            .min(config.address_bits / 6);
        if config.max_level > limit {
            return Err(SpaceError::TooManyLevels {
                max_level: config.max_level,
                limit,
            });
        }
        let overview = CurveLayout::single(config.resolution_order)?;
        Ok(Self {
            config,
            canonical,
            overview,
        })
    }

    /// The 48-bit memory map preset, see [`SpaceConfig::MEMORY_MAP`].
    pub fn memory_map() -> Result<Self, SpaceError> {
        Self::new(SpaceConfig::MEMORY_MAP)
    }

    /// The IPv4 preset, see [`SpaceConfig::IPV4`].
    pub fn ipv4() -> Result<Self, SpaceError> {
        Self::new(SpaceConfig::IPV4)
    }

    /// Replaces the layout used for flat overview images.
    #[must_use]
    pub fn with_overview_layout(mut self, layout: CurveLayout) -> Self {
        self.overview = layout;
        self
    }

    /// Returns the validated configuration.
    #[must_use]
    pub fn config(&self) -> SpaceConfig {
        self.config
    }

    /// Returns the layout used for flat overview images.
    #[must_use]
    pub fn overview_layout(&self) -> &CurveLayout {
        &self.overview
    }

    /// Returns the canonical curve.
    #[must_use]
    pub fn canonical_curve(&self) -> HilbertCurve {
        self.canonical
    }

    /// Returns the address width in bits.
    #[must_use]
    pub fn address_bits(&self) -> u32 {
        self.config.address_bits
    }

    /// Returns the exclusive upper bound of the address space, `2^address_bits`.
    #[must_use]
    pub fn ceiling(&self) -> u64 {
        1_u64 << self.config.address_bits
    }

    /// Returns the side of a rendered frame in pixels.
    #[must_use]
    pub fn resolution(&self) -> u32 {
        1_u32 << self.config.resolution_order
    }

    /// Returns the deepest reachable zoom level.
    #[must_use]
    pub fn max_level(&self) -> u32 {
        self.config.max_level
    }

    /// Returns the side of the canonical grid, `2^C`.
    #[must_use]
    pub fn canonical_side(&self) -> u64 {
        self.canonical.side()
    }

    /// Canonical units per pixel at the root view, `2^(C - R)`.
    #[must_use]
    pub fn base_scale(&self) -> f64 {
        (1_u64 << (self.config.canonical_order - self.config.resolution_order)) as f64
    }

    /// Canonical units per pixel along one axis at `level`.
    ///
    /// Returns `None` past [`AddressSpace::max_level`].
    #[must_use]
    pub fn units_per_pixel(&self, level: u32) -> Option<u64> {
        self.level_shift(level).map(|shift| 1_u64 << shift)
    }

    /// Pixels per canonical unit at `level`: `8^level / base_scale`.
    #[must_use]
    pub fn zoom_factor(&self, level: u32) -> Option<f64> {
        self.units_per_pixel(level).map(|units| 1.0 / units as f64)
    }

    /// Width of the visible address range at `level`: `ceiling / 64^level`.
    #[must_use]
    pub fn range_at_level(&self, level: u32) -> u64 {
        level
            .checked_mul(6)
            .and_then(|shift| self.ceiling().checked_shr(shift))
            .unwrap_or(0)
    }

    /// Canonical cells covered by a single address, `1` unless the canonical
    /// grid has more cells than the space has addresses.
    #[must_use]
    pub fn units_per_address(&self) -> u64 {
        let shift = self.unit_shift();
        if shift >= 0 { 1 } else { 1_u64 << -shift }
    }

    /// Addresses per canonical unit. Fractional when the canonical grid has
    /// more cells than the address space has addresses.
    #[must_use]
    pub fn bytes_per_canonical_unit(&self) -> f64 {
        let shift = self.unit_shift();
        if shift >= 0 {
            (1_u64 << shift) as f64
        } else {
            1.0 / (1_u64 << -shift) as f64
        }
    }

    /// Maps an address to its canonical curve index.
    ///
    /// Returns `None` when the address is at or beyond the ceiling.
    #[must_use]
    pub fn address_to_canonical(&self, address: u64) -> Option<u64> {
        if address >= self.ceiling() {
            return None;
        }
        let shift = self.unit_shift();
        Some(if shift >= 0 {
            address >> shift
        } else {
            address << -shift
        })
    }

    /// Maps a canonical curve index back to the first address it covers.
    #[must_use]
    pub fn canonical_to_address(&self, index: u64) -> u64 {
        let shift = self.unit_shift();
        if shift >= 0 {
            index << shift
        } else {
            index >> -shift
        }
    }

    /// Maps an address to canonical grid coordinates.
    #[must_use]
    pub fn address_to_canonical_xy(&self, address: u64) -> Option<(u32, u32)> {
        let index = self.address_to_canonical(address)?;
        self.canonical.index_to_xy(index).ok()
    }

    /// Maps canonical grid coordinates to the address they represent.
    #[must_use]
    pub fn canonical_xy_to_address(&self, x: u32, y: u32) -> Option<u64> {
        let index = self.canonical.xy_to_index(x, y).ok()?;
        Some(self.canonical_to_address(index))
    }

    /// Bits to shift right when going from canonical units to pixels.
    pub(crate) fn level_shift(&self, level: u32) -> Option<u32> {
        if level > self.config.max_level {
            return None;
        }
        Some(self.config.canonical_order - self.config.resolution_order - 3 * level)
    }

    // log2(addresses per canonical unit).
    #[expect(
        clippy::cast_possible_wrap,
        reason = "address bits and canonical order are both below 64"
    )]
    fn unit_shift(&self) -> i32 {
        self.config.address_bits as i32 - 2 * self.config.canonical_order as i32
    }
}
