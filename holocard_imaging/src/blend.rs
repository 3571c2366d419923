// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Separable blend functions on normalized color channels.
//!
//! These implement the W3C compositing-and-blending definitions for the
//! separable modes the compositor supports. Inputs and outputs are single
//! channels in `[0, 1]`; `cb` is the backdrop channel and `cs` the source
//! channel.

use peniko::Mix;

/// `multiply`: darkens; white is the identity.
#[must_use]
pub fn multiply(cb: f32, cs: f32) -> f32 {
    cb * cs
}

/// `screen`: lightens; black is the identity.
#[must_use]
pub fn screen(cb: f32, cs: f32) -> f32 {
    cb + cs - cb * cs
}

/// `hard-light`: multiplies or screens depending on the *source* channel.
#[must_use]
pub fn hard_light(cb: f32, cs: f32) -> f32 {
    if cs <= 0.5 {
        multiply(cb, 2.0 * cs)
    } else {
        screen(cb, 2.0 * cs - 1.0)
    }
}

/// `overlay`: multiplies or screens depending on the *backdrop* channel.
///
/// This is [`hard_light`] with the operands swapped: dark backdrops darken
/// further, light backdrops lighten further, and a mid-gray backdrop
/// passes the source through. It is what gives the holographic sheen its
/// luminosity-keyed look.
#[must_use]
pub fn overlay(cb: f32, cs: f32) -> f32 {
    hard_light(cs, cb)
}

/// Applies the separable blend function for `mix`, or returns `None` for
/// modes the compositor does not support.
#[must_use]
pub fn separable(mix: Mix, cb: f32, cs: f32) -> Option<f32> {
    match mix {
        Mix::Normal | Mix::Clip => Some(cs),
        Mix::Multiply => Some(multiply(cb, cs)),
        Mix::Screen => Some(screen(cb, cs)),
        Mix::Overlay => Some(overlay(cb, cs)),
        Mix::HardLight => Some(hard_light(cb, cs)),
        _ => None,
    }
}
