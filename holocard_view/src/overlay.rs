// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement and opacity of the holographic sheen.
//!
//! The sheen is an image larger than the card by a fixed jitter margin on
//! every side. As the card tilts, the sheen slides within that margin, so
//! different parts of it pass over the card face, and its
//! opacity rises from invisible at rest to fully opaque at the combined
//! tilt maximum. Blending it over the face with `Overlay` is the card
//! view's job; this module only decides where the sheen goes and how
//! strong it is.

use kurbo::{Point, Rect, Size};

use holocard_interaction::range::{DegenerateRange, remap, remap_clamped};
use holocard_interaction::tilt::TiltAngles;

use crate::metrics::CardConfig;

/// Where to draw the sheen for one frame, and at what opacity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayPlacement {
    /// Destination rectangle of the sheen image, in device coordinates.
    /// Always covers the card rectangle.
    pub dst: Rect,
    /// Sheen opacity in `[0, 1]`. Zero at rest.
    pub opacity: f32,
}

impl OverlayPlacement {
    /// Computes the sheen placement for a tilt pose.
    ///
    /// The destination is the card rectangle grown by the configured
    /// jitter on each side, then slid with the tilt: the x tilt carries
    /// the sheen horizontally and the y tilt vertically, each across the
    /// full `2 * jitter` margin. At the tilt bounds the slide exhausts
    /// the margin exactly, so the sheen never uncovers the card.
    ///
    /// Opacity maps the combined tilt onto `[0, 1]` and clamps, so poses
    /// beyond the configured bounds (mid-animation overshoot, oversized
    /// configs) saturate instead of escaping the valid range.
    ///
    /// # Errors
    ///
    /// Returns [`DegenerateRange`] when a tilt bound in `config` is zero,
    /// which leaves the slide without a source interval.
    pub fn compute(
        tilt: TiltAngles,
        config: &CardConfig,
        card_rect: Rect,
    ) -> Result<Self, DegenerateRange> {
        let jitter = config.overlay_jitter;
        let max_x = config.tilt.max_tilt_x;
        let max_y = config.tilt.max_tilt_y;

        let slide_x = remap(tilt.x, -max_x..max_x, -jitter..jitter)? - jitter;
        let slide_y = remap(tilt.y, -max_y..max_y, -jitter..jitter)? - jitter;
        let origin = Point::new(card_rect.x0 + slide_x, card_rect.y0 + slide_y);
        let size = Size::new(
            card_rect.width() + 2.0 * jitter,
            card_rect.height() + 2.0 * jitter,
        );

        let opacity =
            remap_clamped(tilt.combined_tilt(), 0.0..(max_x + max_y), 0.0..1.0)? as f32;

        Ok(Self {
            dst: Rect::from_origin_size(origin, size),
            opacity,
        })
    }
}
