// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tilt pose to planar projection.
//!
//! The card is a plane rotated in 3D about its own center and viewed by a
//! camera on the axis through that center. Rotating a plane and projecting
//! it back to the screen induces a 2D homography, so the whole pose
//! collapses into one [`Projection`] the compositor can invert and sample
//! through. No 3D pipeline is involved.

use kurbo::{Affine, Rect, Vec2};

use holocard_imaging::project::Projection;
use holocard_interaction::tilt::TiltAngles;

/// `(cos, sin)` of an angle given in degrees.
fn cos_sin(degrees: f64) -> (f64, f64) {
    let v = Vec2::from_angle(degrees.to_radians());
    (v.x, v.y)
}

/// Multiplies two row-major 3×3 matrices.
fn mat_mul(a: [[f64; 3]; 3], b: [[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }
    out
}

/// The rotation `Rx · Ry · Rz` for a tilt pose, in row-major form.
///
/// Axes follow device coordinates: x grows rightward, y downward, z out of
/// the screen toward the viewer. `tilt.x` pitches about the horizontal
/// axis, `tilt.y` yaws about the vertical axis, and `tilt.z` twists in the
/// screen plane.
fn rotation(tilt: TiltAngles) -> [[f64; 3]; 3] {
    let (cx, sx) = cos_sin(tilt.x);
    let (cy, sy) = cos_sin(tilt.y);
    let (cz, sz) = cos_sin(tilt.z);

    let rx = [[1.0, 0.0, 0.0], [0.0, cx, -sx], [0.0, sx, cx]];
    let ry = [[cy, 0.0, sy], [0.0, 1.0, 0.0], [-sy, 0.0, cy]];
    let rz = [[cz, -sz, 0.0], [sz, cz, 0.0], [0.0, 0.0, 1.0]];

    mat_mul(rx, mat_mul(ry, rz))
}

/// Builds the projection that renders `rect` under `tilt`.
///
/// The rotation pivots on the rect's center, so the center is a fixed
/// point of the returned projection for every pose. `camera_distance` is
/// the viewer's distance from the card plane in pixels; smaller distances
/// exaggerate the foreshortening, and a non-positive distance drops the
/// perspective term entirely, leaving the affine part of the rotation.
///
/// Zero tilt yields the exact identity.
#[must_use]
pub fn card_projection(rect: Rect, tilt: TiltAngles, camera_distance: f64) -> Projection {
    let r = rotation(tilt);

    // A point (x, y) on the card plane lands at depth z = r20·x + r21·y
    // after rotation. Dividing by (1 - z/d) projects it back to the
    // screen: positive z is toward the viewer and enlarges.
    let perspective = if camera_distance > 0.0 {
        [-r[2][0] / camera_distance, -r[2][1] / camera_distance]
    } else {
        [0.0, 0.0]
    };
    let homography = Projection {
        rows: [
            [r[0][0], r[0][1], 0.0],
            [r[1][0], r[1][1], 0.0],
            [perspective[0], perspective[1], 1.0],
        ],
    };

    let center = rect.center().to_vec2();
    let to_center = Projection::from_affine(Affine::translate(center));
    let from_center = Projection::from_affine(Affine::translate(-center));
    to_center * homography * from_center
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    const CARD: Rect = Rect::new(32.0, 64.0, 432.0, 624.0);

    fn assert_point_close(a: Point, b: Point) {
        assert!((a - b).hypot() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn zero_tilt_is_the_exact_identity() {
        let projection = card_projection(CARD, TiltAngles::ZERO, 1000.0);
        assert!(projection.is_identity());
    }

    #[test]
    fn center_is_a_fixed_point_for_every_pose() {
        let poses = [
            TiltAngles { x: 5.0, y: 0.0, z: 0.0 },
            TiltAngles { x: 0.0, y: -10.0, z: 0.0 },
            TiltAngles { x: -5.0, y: 10.0, z: 2.5 },
            TiltAngles { x: 3.2, y: -7.7, z: -1.1 },
        ];
        for tilt in poses {
            let projection = card_projection(CARD, tilt, 1000.0);
            assert_point_close(projection.project(CARD.center()), CARD.center());
        }
    }

    #[test]
    fn pure_twist_rotates_in_the_screen_plane() {
        let tilt = TiltAngles { x: 0.0, y: 0.0, z: 90.0 };
        let projection = card_projection(CARD, tilt, 1000.0);

        // A twist never leaves the plane, so no perspective row.
        assert_eq!(projection.rows[2], [0.0, 0.0, 1.0]);

        // In y-down coordinates a positive twist carries +x toward +y.
        let center = CARD.center();
        let mapped = projection.project(center + Vec2::new(100.0, 0.0));
        assert_point_close(mapped, center + Vec2::new(0.0, 100.0));
    }

    #[test]
    fn yaw_foreshortens_one_side_and_enlarges_the_other() {
        let tilt = TiltAngles { x: 0.0, y: 10.0, z: 0.0 };
        let projection = card_projection(CARD, tilt, 1000.0);
        let center = CARD.center();

        let right = projection.project(center + Vec2::new(200.0, 0.0));
        let left = projection.project(center + Vec2::new(-200.0, 0.0));

        // Positive yaw turns the right edge away from the viewer.
        let right_span = right.x - center.x;
        let left_span = center.x - left.x;
        assert!(right_span < 200.0, "right edge must recede: {right_span}");
        assert!(left_span > right_span, "left edge must appear wider");
    }

    #[test]
    fn pitch_foreshortens_vertically() {
        let tilt = TiltAngles { x: 5.0, y: 0.0, z: 0.0 };
        let projection = card_projection(CARD, tilt, 1000.0);
        let center = CARD.center();

        let top = projection.project(center + Vec2::new(0.0, -200.0));
        let bottom = projection.project(center + Vec2::new(0.0, 200.0));
        let top_span = center.y - top.y;
        let bottom_span = bottom.y - center.y;
        assert!(
            (top_span - bottom_span).abs() > 1e-6,
            "a pitched card cannot stay vertically symmetric"
        );
    }

    #[test]
    fn non_positive_camera_distance_disables_perspective() {
        let tilt = TiltAngles { x: -5.0, y: 10.0, z: 2.5 };
        for d in [0.0, -100.0] {
            let projection = card_projection(CARD, tilt, d);
            assert_eq!(projection.rows[2], [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn projection_is_invertible_at_full_tilt() {
        let tilt = TiltAngles { x: 5.0, y: 10.0, z: 2.5 };
        let projection = card_projection(CARD, tilt, 1000.0);
        let inverse = projection.inverse().expect("card poses stay invertible");

        for p in [
            Point::new(CARD.x0, CARD.y0),
            Point::new(CARD.x1, CARD.y1),
            CARD.center(),
        ] {
            assert_point_close(inverse.project(projection.project(p)), p);
        }
    }
}
