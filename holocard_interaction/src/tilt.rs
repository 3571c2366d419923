// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derivation of tilt and twist angles from the drag offset.
//!
//! Tilt is always a deterministic, continuous function of the offset; it is
//! never set independently. The vertical axis is inverted so that dragging
//! down tilts the top of the card away from the viewer.

use kurbo::Vec2;

use crate::drag::DragBounds;
use crate::range::{DegenerateRange, remap};

/// Card rotation in degrees.
///
/// `x` and `y` tilt the card around its in-plane horizontal and vertical
/// axes; `z` is the optional twist (roll) around the axis perpendicular to
/// the card face.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TiltAngles {
    /// Rotation around the in-plane horizontal axis.
    pub x: f64,
    /// Rotation around the in-plane vertical axis.
    pub y: f64,
    /// Roll around the axis perpendicular to the card face.
    pub z: f64,
}

impl TiltAngles {
    /// The rest pose.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Returns the combined magnitude of the two primary tilts.
    ///
    /// This drives the overlay sheen's opacity.
    #[must_use]
    pub fn combined_tilt(&self) -> f64 {
        self.x.abs() + self.y.abs()
    }
}

/// Tilt bounds in degrees.
///
/// The contract is "small-angle tilt"; the exact bounds are tunable. The
/// defaults are the values observed in the card this models: 5 degrees of
/// pitch, 10 degrees of yaw, and 2.5 degrees of twist.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TiltConfig {
    /// Maximum magnitude of the x tilt (pitch), in degrees.
    pub max_tilt_x: f64,
    /// Maximum magnitude of the y tilt (yaw), in degrees.
    pub max_tilt_y: f64,
    /// Maximum magnitude of the z twist (roll), in degrees, or `None` to
    /// disable twist entirely.
    pub max_twist: Option<f64>,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_tilt_x: 5.0,
            max_tilt_y: 10.0,
            max_twist: Some(2.5),
        }
    }
}

impl TiltConfig {
    /// Derives tilt angles from a drag offset.
    ///
    /// - `x` maps the vertical offset onto `[-max_tilt_x, +max_tilt_x]`,
    ///   negated: a downward drag pitches the top of the card away.
    /// - `y` maps the horizontal offset onto `[-max_tilt_y, +max_tilt_y]`:
    ///   a rightward drag yaws the card to the right.
    /// - `z`, when twist is enabled, remaps the clamped product `-x * y`
    ///   onto `[-max_twist, +max_twist]`. The twist vanishes when either
    ///   primary tilt is zero and peaks when both are large.
    ///
    /// # Errors
    ///
    /// Returns [`DegenerateRange`] when twist is enabled but
    /// `max_tilt_x * max_tilt_y` is zero, leaving the twist's source
    /// interval without width. The offset ranges themselves come from
    /// [`DragBounds`] and are always valid.
    pub fn tilt_for_offset(
        &self,
        offset: Vec2,
        bounds: DragBounds,
    ) -> Result<TiltAngles, DegenerateRange> {
        let x = -remap(
            offset.y,
            bounds.y_range(),
            -self.max_tilt_x..self.max_tilt_x,
        )?;
        let y = remap(
            offset.x,
            bounds.x_range(),
            -self.max_tilt_y..self.max_tilt_y,
        )?;

        let z = match self.max_twist {
            Some(max_twist) => {
                let extent = self.max_tilt_x * self.max_tilt_y;
                let product = (-x * y).clamp(-extent.abs(), extent.abs());
                remap(product, -extent..extent, -max_twist..max_twist)?
            }
            None => 0.0,
        };

        Ok(TiltAngles { x, y, z })
    }
}
