// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hilmap_index::AddressRange;
use hilmap_view::{AddressSpace, ZoomState};
use peniko::color::Rgba8;

use crate::buffer::PixelBuffer;
use crate::render::for_each_sample;

/// Diagonal stripe: pixels whose `(x + y) % 8` falls in `2..=4`.
fn on_stripe(x: u32, y: u32) -> bool {
    matches!((x + y) % 8, 2..=4)
}

/// A reversible highlight painted over a rendered buffer.
///
/// [`Shading::apply`] keeps a snapshot of the buffer as it was;
/// [`Shading::restore`] puts it back byte for byte.
#[derive(Clone, Debug)]
#[must_use = "dropping a Shading makes the highlight permanent"]
pub struct Shading {
    snapshot: PixelBuffer,
}

impl Shading {
    /// Stripes the pixels of `region` under `state` with `highlight`.
    ///
    /// Pixels are found with the same sampling walk as rendering, restricted
    /// to the part of the region inside the view.
    pub fn apply(
        buffer: &mut PixelBuffer,
        region: &AddressRange,
        state: &ZoomState,
        space: &AddressSpace,
        highlight: Rgba8,
    ) -> Self {
        let snapshot = buffer.clone();
        for_each_sample(region, state, space, |x, y| {
            if on_stripe(x, y) {
                buffer.set(x, y, highlight);
            }
        });
        Self { snapshot }
    }

    /// Returns the buffer as it was before shading.
    #[must_use]
    pub fn snapshot(&self) -> &PixelBuffer {
        &self.snapshot
    }

    /// Restores the unshaded buffer.
    pub fn restore(self, buffer: &mut PixelBuffer) {
        *buffer = self.snapshot;
    }
}
