// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded accumulation of incremental drag deltas.
//!
//! ## Usage
//!
//! 1) Derive [`DragBounds`] from the card's rendered size (bounds may be
//!    recomputed per event if the card resizes mid-gesture).
//! 2) On each pan event, call [`DragTracker::apply_delta`] with the
//!    incremental delta; the accumulated offset is clamped per axis.
//! 3) On gesture end, call [`DragTracker::reset`] to return to rest.

use core::ops::Range;

use kurbo::{Size, Vec2};

use crate::range::DegenerateRange;

/// Per-axis half-extents bounding the accumulated drag offset.
///
/// The offset is confined to `[-x, +x]` horizontally and `[-y, +y]`
/// vertically. Construction rejects non-positive extents so that the
/// ranges handed to the tilt model are never degenerate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragBounds {
    half_extents: Vec2,
}

impl DragBounds {
    /// Creates bounds with the given half-extents.
    ///
    /// # Errors
    ///
    /// Returns [`DegenerateRange`] unless both extents are strictly
    /// positive and finite.
    pub fn new(half_x: f64, half_y: f64) -> Result<Self, DegenerateRange> {
        if half_x > 0.0 && half_y > 0.0 && half_x.is_finite() && half_y.is_finite() {
            Ok(Self {
                half_extents: Vec2::new(half_x, half_y),
            })
        } else {
            Err(DegenerateRange)
        }
    }

    /// Derives bounds from a card size and a divisor.
    ///
    /// The observed variants confine the drag to an eighth or a quarter of
    /// the card's rendered extent per axis; the divisor is a tunable
    /// constant, not a contract.
    ///
    /// # Errors
    ///
    /// Returns [`DegenerateRange`] when the card size or divisor would
    /// produce a non-positive extent.
    pub fn for_card_size(card_size: Size, divisor: f64) -> Result<Self, DegenerateRange> {
        if divisor <= 0.0 {
            return Err(DegenerateRange);
        }
        Self::new(card_size.width / divisor, card_size.height / divisor)
    }

    /// Returns the per-axis half-extents.
    #[must_use]
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    /// Returns the horizontal offset range `-x..x`.
    #[must_use]
    pub fn x_range(&self) -> Range<f64> {
        -self.half_extents.x..self.half_extents.x
    }

    /// Returns the vertical offset range `-y..y`.
    #[must_use]
    pub fn y_range(&self) -> Range<f64> {
        -self.half_extents.y..self.half_extents.y
    }

    /// Clamps an offset into these bounds, per axis.
    #[must_use]
    pub fn clamp(&self, offset: Vec2) -> Vec2 {
        Vec2::new(
            offset.x.clamp(-self.half_extents.x, self.half_extents.x),
            offset.y.clamp(-self.half_extents.y, self.half_extents.y),
        )
    }
}

/// Accumulates pointer drag deltas into a bounded offset from rest.
///
/// Every delta is consumed; clamping against the supplied [`DragBounds`]
/// is the only loss. Clamping is idempotent, so an offset that is already
/// inside the bounds is never disturbed.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DragTracker {
    offset: Vec2,
}

impl DragTracker {
    /// Creates a tracker at rest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an incremental drag delta, returning the new clamped offset.
    ///
    /// Bounds are passed per event so callers can recompute them from the
    /// card's current size.
    pub fn apply_delta(&mut self, delta: Vec2, bounds: DragBounds) -> Vec2 {
        self.offset = bounds.clamp(self.offset + delta);
        self.offset
    }

    /// Returns the current accumulated offset.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Returns the offset to rest.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
    }
}
