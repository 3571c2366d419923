// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affine remapping of a value between two numeric intervals.

use core::ops::Range;

/// Error returned when the source interval of a remap has zero width.
///
/// Remapping divides by the source width, so a degenerate source has no
/// meaningful answer. Callers that construct ranges from measured geometry
/// (for example a card width that computed to zero) should treat this as a
/// layout fault rather than propagate NaN into rendering.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DegenerateRange;

impl core::fmt::Display for DegenerateRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "source range has zero width")
    }
}

impl core::error::Error for DegenerateRange {}

/// Remaps `value` from `source` to `target` by linear interpolation.
///
/// The map is affine: `source.start` maps exactly to `target.start`,
/// `source.end` maps exactly to `target.end`, and values in between scale
/// proportionally. Values outside `source` extrapolate; use
/// [`remap_clamped`] when the result must stay inside `target`.
///
/// Either range may be reversed (`start > end`).
///
/// # Errors
///
/// Returns [`DegenerateRange`] when `source` has zero width.
///
/// ```
/// use holocard_interaction::range::remap;
///
/// assert_eq!(remap(5.0, 0.0..10.0, 0.0..1.0), Ok(0.5));
/// assert_eq!(remap(-50.0, -50.0..50.0, -10.0..10.0), Ok(-10.0));
/// ```
pub fn remap(value: f64, source: Range<f64>, target: Range<f64>) -> Result<f64, DegenerateRange> {
    let source_width = source.end - source.start;
    if source_width == 0.0 {
        return Err(DegenerateRange);
    }
    Ok(target.start + (value - source.start) * (target.end - target.start) / source_width)
}

/// Like [`remap`], but clamps the result into `target`.
///
/// The clamp respects reversed targets: the result always lies between the
/// two endpoints regardless of their order.
///
/// # Errors
///
/// Returns [`DegenerateRange`] when `source` has zero width.
pub fn remap_clamped(
    value: f64,
    source: Range<f64>,
    target: Range<f64>,
) -> Result<f64, DegenerateRange> {
    let (lo, hi) = if target.start <= target.end {
        (target.start, target.end)
    } else {
        (target.end, target.start)
    };
    remap(value, source, target).map(|v| v.clamp(lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_map_exactly() {
        assert_eq!(remap(2.0, 2.0..8.0, -1.0..1.0), Ok(-1.0));
        assert_eq!(remap(8.0, 2.0..8.0, -1.0..1.0), Ok(1.0));
    }

    #[test]
    fn midpoint_maps_to_midpoint() {
        assert_eq!(remap(5.0, 2.0..8.0, -1.0..1.0), Ok(0.0));
    }

    #[test]
    fn map_is_affine() {
        // f(a + t*(b-a)) == c + t*(d-c) for a handful of t values.
        let (a, b, c, d) = (-50.0, 50.0, -5.0, 5.0);
        for t in [0.0, 0.1, 0.25, 0.5, 0.75, 1.0] {
            let v = a + t * (b - a);
            let mapped = remap(v, a..b, c..d).unwrap();
            let expected = c + t * (d - c);
            assert!(
                (mapped - expected).abs() < 1e-12,
                "t={t}: {mapped} != {expected}"
            );
        }
    }

    #[test]
    fn values_outside_source_extrapolate() {
        assert_eq!(remap(20.0, 0.0..10.0, 0.0..1.0), Ok(2.0));
        assert_eq!(remap(-10.0, 0.0..10.0, 0.0..1.0), Ok(-1.0));
    }

    #[test]
    fn reversed_ranges_are_supported() {
        assert_eq!(remap(2.5, 10.0..0.0, 0.0..1.0), Ok(0.75));
        assert_eq!(remap(0.25, 0.0..1.0, 10.0..0.0), Ok(7.5));
    }

    #[test]
    fn zero_width_source_is_an_error() {
        assert_eq!(remap(1.0, 3.0..3.0, 0.0..1.0), Err(DegenerateRange));
        assert_eq!(remap_clamped(1.0, 0.0..0.0, 0.0..1.0), Err(DegenerateRange));
    }

    #[test]
    fn zero_width_target_collapses_to_a_point() {
        assert_eq!(remap(7.0, 0.0..10.0, 4.0..4.0), Ok(4.0));
    }

    #[test]
    fn clamped_variant_pins_overshoot() {
        assert_eq!(remap_clamped(20.0, 0.0..10.0, 0.0..1.0), Ok(1.0));
        assert_eq!(remap_clamped(-5.0, 0.0..10.0, 0.0..1.0), Ok(0.0));
        // In-range values are untouched.
        assert_eq!(remap_clamped(5.0, 0.0..10.0, 0.0..1.0), Ok(0.5));
    }

    #[test]
    fn clamped_variant_respects_reversed_targets() {
        assert_eq!(remap_clamped(20.0, 0.0..10.0, 1.0..0.0), Ok(0.0));
        assert_eq!(remap_clamped(-5.0, 0.0..10.0, 1.0..0.0), Ok(1.0));
    }
}
