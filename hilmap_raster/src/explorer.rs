// Copyright 2025 the Hilmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-flight exploration session.
//!
//! [`Explorer`] owns the current [`ZoomState`] together with the data it is
//! rendered from. Zooming is a two-step affair so a presentation layer can
//! animate between frames: [`Explorer::begin_zoom`] commits the new state and
//! hands back both frames, and [`Explorer::finish_transition`] ends the
//! animation. While a transition is in flight every other state change is
//! rejected rather than queued.

use alloc::boxed::Box;
use core::fmt;

use hilmap_index::{AddressRange, RegionIndex};
use hilmap_view::{AddressSpace, ViewStateError, ZoomState};
use kurbo::Point;

use crate::buffer::PixelBuffer;
use crate::hit::{HitInfo, hit_test, probe};
use crate::render::{RenderOptions, render};

/// A committed zoom step and the frames on either side of it.
#[derive(Clone, Debug)]
pub struct Transition {
    /// State before the zoom.
    pub from: ZoomState,
    /// State after the zoom, already current.
    pub to: ZoomState,
    /// Frame rendered under `from`.
    pub before: PixelBuffer,
    /// Frame rendered under `to`.
    pub after: PixelBuffer,
}

/// Result of [`Explorer::begin_zoom`].
#[derive(Clone, Debug)]
pub enum ZoomOutcome {
    /// The state changed; finish with [`Explorer::finish_transition`].
    Started(Box<Transition>),
    /// The view is at the deepest level or the pixel maps nowhere.
    Unchanged,
    /// Another transition is still in flight.
    Busy,
}

/// Error from a rejected state change.
#[derive(Clone, Debug, PartialEq)]
pub enum ExplorerError {
    /// A transition is in flight.
    Busy,
    /// The restored state does not fit the address space.
    InvalidState(ViewStateError),
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => f.write_str("a zoom transition is in flight"),
            Self::InvalidState(err) => write!(f, "cannot restore view: {err}"),
        }
    }
}

impl core::error::Error for ExplorerError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Busy => None,
            Self::InvalidState(err) => Some(err),
        }
    }
}

impl From<ViewStateError> for ExplorerError {
    fn from(err: ViewStateError) -> Self {
        Self::InvalidState(err)
    }
}

/// An address space, its regions and the current view.
#[derive(Clone, Debug)]
pub struct Explorer {
    space: AddressSpace,
    index: RegionIndex,
    state: ZoomState,
    options: RenderOptions,
    busy: bool,
}

impl Explorer {
    /// Starts a session at the root view.
    #[must_use]
    pub fn new(space: AddressSpace, index: RegionIndex) -> Self {
        let state = ZoomState::root(&space);
        Self {
            space,
            index,
            state,
            options: RenderOptions::default(),
            busy: false,
        }
    }

    /// Replaces the render options.
    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the address space.
    #[must_use]
    pub fn space(&self) -> &AddressSpace {
        &self.space
    }

    /// Returns the region index.
    #[must_use]
    pub fn index(&self) -> &RegionIndex {
        &self.index
    }

    /// Returns the current view.
    #[must_use]
    pub fn state(&self) -> ZoomState {
        self.state
    }

    /// Returns the render options.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Returns `true` while a transition is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Renders the current view.
    #[must_use]
    pub fn render(&self) -> PixelBuffer {
        render(&self.index, &self.state, &self.space, &self.options)
    }

    /// Returns the region under `pixel` in the current view.
    #[must_use]
    pub fn hit_test(&self, pixel: Point) -> Option<&AddressRange> {
        hit_test(&self.index, &self.state, &self.space, pixel)
    }

    /// Resolves `pixel` to its address and region in the current view.
    #[must_use]
    pub fn probe(&self, pixel: Point) -> Option<HitInfo<'_>> {
        probe(&self.index, &self.state, &self.space, pixel)
    }

    /// Zooms into the grid cell under `pixel` and starts a transition.
    ///
    /// The new state is current as soon as this returns
    /// [`ZoomOutcome::Started`]; the session stays busy until
    /// [`Explorer::finish_transition`].
    pub fn begin_zoom(&mut self, pixel: Point) -> ZoomOutcome {
        if self.busy {
            tracing::debug!(x = pixel.x, y = pixel.y, "zoom rejected: transition in flight");
            return ZoomOutcome::Busy;
        }
        let Some(to) = self.state.zoom_in(&self.space, pixel) else {
            tracing::debug!(
                level = self.state.level(),
                x = pixel.x,
                y = pixel.y,
                "zoom ignored"
            );
            return ZoomOutcome::Unchanged;
        };
        let before = self.render();
        let from = self.state;
        self.state = to;
        let after = self.render();
        self.busy = true;
        tracing::debug!(
            level = to.level(),
            min = to.min_addr(),
            max = to.max_addr(),
            "zoom started"
        );
        ZoomOutcome::Started(Box::new(Transition {
            from,
            to,
            before,
            after,
        }))
    }

    /// Ends the transition in flight. Returns `false` if there was none.
    pub fn finish_transition(&mut self) -> bool {
        core::mem::replace(&mut self.busy, false)
    }

    /// Zooms without a transition: [`Explorer::begin_zoom`] immediately
    /// followed by [`Explorer::finish_transition`].
    ///
    /// Returns `true` if the view changed.
    pub fn zoom_in(&mut self, pixel: Point) -> bool {
        match self.begin_zoom(pixel) {
            ZoomOutcome::Started(_) => {
                self.finish_transition();
                true
            }
            ZoomOutcome::Unchanged | ZoomOutcome::Busy => false,
        }
    }

    /// Returns to the root view.
    pub fn reset(&mut self) -> Result<(), ExplorerError> {
        self.ensure_idle()?;
        self.state = ZoomState::reset(&self.space);
        Ok(())
    }

    /// Replaces the current view with a state restored from outside.
    pub fn restore_state(&mut self, state: ZoomState) -> Result<(), ExplorerError> {
        self.ensure_idle()?;
        state.validate(&self.space)?;
        self.state = state;
        Ok(())
    }

    /// Replaces the region index wholesale, keeping the view.
    pub fn replace_regions(&mut self, index: RegionIndex) -> Result<(), ExplorerError> {
        self.ensure_idle()?;
        tracing::debug!(regions = index.len(), "regions replaced");
        self.index = index;
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), ExplorerError> {
        if self.busy {
            Err(ExplorerError::Busy)
        } else {
            Ok(())
        }
    }
}
