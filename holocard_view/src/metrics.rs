// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card layout: fitting the fixed-aspect card into a screen.

use kurbo::{Point, Rect, Size};

use holocard_interaction::animate::AnimationConfig;
use holocard_interaction::drag::DragBounds;
use holocard_interaction::tilt::TiltConfig;

/// Error returned when a screen cannot hold the card.
///
/// Raised for screens whose padded interior has no area, and for
/// configurations whose aspect ratio or drag divisor is not positive. A
/// degenerate layout would otherwise surface later as zero-width remap
/// ranges deep inside the tilt model.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LayoutError;

impl core::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "screen size leaves no room for the card")
    }
}

impl core::error::Error for LayoutError {}

/// Tunable constants of the card widget.
///
/// The defaults are the values observed in the card this models; the
/// variants seen in the wild differ only in these numbers, so they are
/// configuration rather than separate code paths.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CardConfig {
    /// Tilt bounds in degrees.
    pub tilt: TiltConfig,
    /// Convergence parameters for the rendered tilt.
    pub animation: AnimationConfig,
    /// Divisor applied to the card size to obtain the drag half-extents
    /// (8 confines the drag to an eighth of the card per axis; 4 to a
    /// quarter).
    pub drag_divisor: f64,
    /// Maximum pixel displacement of the sheen relative to the card.
    pub overlay_jitter: f64,
    /// Width over height of the card face.
    pub aspect_ratio: f64,
    /// Corner radius of the card, in pixels.
    pub corner_radius: f64,
    /// Padding between the screen edge and the card, in pixels.
    pub padding: f64,
    /// Distance of the notional camera used for the tilt projection, in
    /// pixels. Non-positive values disable foreshortening.
    pub camera_distance: f64,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            tilt: TiltConfig::default(),
            animation: AnimationConfig::default(),
            drag_divisor: 8.0,
            overlay_jitter: 100.0,
            aspect_ratio: 2.5 / 3.5,
            corner_radius: 15.0,
            padding: 32.0,
            camera_distance: 1000.0,
        }
    }
}

/// The resolved geometry of one card on one screen.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CardMetrics {
    screen: Size,
    card_rect: Rect,
    corner_radius: f64,
    drag_bounds: DragBounds,
}

impl CardMetrics {
    /// Fits the card into `screen` under `config`.
    ///
    /// The card is the largest rectangle of the configured aspect ratio
    /// that fits the screen inset by the padding, centered. Drag bounds
    /// derive from the fitted card size and the drag divisor.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when the padded interior has no area or the
    /// aspect ratio or divisor is not positive.
    pub fn layout(screen: Size, config: &CardConfig) -> Result<Self, LayoutError> {
        let available = Size::new(
            screen.width - 2.0 * config.padding,
            screen.height - 2.0 * config.padding,
        );
        if available.width <= 0.0 || available.height <= 0.0 || config.aspect_ratio <= 0.0 {
            return Err(LayoutError);
        }

        let width = available.width.min(available.height * config.aspect_ratio);
        let card_size = Size::new(width, width / config.aspect_ratio);
        let origin = Point::new(
            (screen.width - card_size.width) / 2.0,
            (screen.height - card_size.height) / 2.0,
        );
        let drag_bounds = DragBounds::for_card_size(card_size, config.drag_divisor)
            .map_err(|_| LayoutError)?;

        Ok(Self {
            screen,
            card_rect: Rect::from_origin_size(origin, card_size),
            corner_radius: config.corner_radius,
            drag_bounds,
        })
    }

    /// The screen this layout was computed for.
    #[must_use]
    pub fn screen_size(&self) -> Size {
        self.screen
    }

    /// The card rectangle in device coordinates.
    #[must_use]
    pub fn card_rect(&self) -> Rect {
        self.card_rect
    }

    /// The card's corner radius.
    #[must_use]
    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Drag bounds derived from the fitted card size.
    #[must_use]
    pub fn drag_bounds(&self) -> DragBounds {
        self.drag_bounds
    }
}
