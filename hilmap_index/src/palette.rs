// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic label colors.

use alloc::string::String;

use hashbrown::HashMap;
use peniko::color::{AlphaColor, Hsl, Rgba8, Srgb};

use crate::range::{Permissions, split_label};

/// Hue, saturation and lightness chosen for a label.
///
/// Saturation and lightness are percentages, matching CSS `hsl()`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Swatch {
    /// Hue in degrees, `[0, 360)`.
    pub hue: f32,
    /// Saturation in `[0, 100]`.
    pub saturation: f32,
    /// Lightness in `[0, 100]`.
    pub lightness: f32,
}

impl Swatch {
    /// Picks the swatch for `label`.
    ///
    /// The hue depends only on the base name, so `libc.so {r-x}` and
    /// `libc.so {rw-}` share a hue; the `{rwx}` annotation only moves the
    /// saturation.
    #[must_use]
    pub fn for_label(label: &str) -> Self {
        let (base, annotation) = split_label(label);
        let hue = (fnv1a(base.as_bytes()) % 360) as f32;
        let saturation = match annotation.and_then(Permissions::parse) {
            None => 70.0,
            Some(perms) => {
                let mut s = 35.0;
                if perms.contains(Permissions::READ) {
                    s += 10.0;
                }
                if perms.contains(Permissions::WRITE) {
                    s += 20.0;
                }
                if perms.contains(Permissions::EXEC) {
                    s += 30.0;
                }
                s
            }
        };
        Self {
            hue,
            saturation,
            lightness: 55.0,
        }
    }

    /// Converts to an opaque sRGB color.
    #[must_use]
    pub fn to_rgba8(self) -> Rgba8 {
        AlphaColor::<Hsl>::new([self.hue, self.saturation, self.lightness, 1.0])
            .convert::<Srgb>()
            .to_rgba8()
    }
}

/// Memoized mapping from labels to colors.
///
/// The cache only grows; its size is bounded by the number of distinct
/// labels in the input.
#[derive(Clone, Debug, Default)]
pub struct Palette {
    cache: HashMap<String, Rgba8>,
}

impl Palette {
    /// Creates an empty palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the color for `label`, computing it on first use.
    pub fn color_for(&mut self, label: &str) -> Rgba8 {
        if let Some(color) = self.cache.get(label) {
            return *color;
        }
        let color = Swatch::for_label(label).to_rgba8();
        self.cache.insert(label.into(), color);
        color
    }

    /// Returns the number of memoized labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if no label has been colored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

// 32-bit FNV-1a; stable across runs and platforms.
fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0x811c_9dc5_u32, |hash, &b| {
        (hash ^ u32::from(b)).wrapping_mul(0x0100_0193)
    })
}
