// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planar projective transforms.
//!
//! A 3D rotation of the card plane followed by a perspective divide
//! induces a 2D homography on that plane. [`Projection`] is that
//! homography: a 3×3 matrix applied to homogeneous points, with the affine
//! transforms as the special case where the bottom row is `[0, 0, 1]`.
//! The compositor samples images through [`Projection::inverse`].

use kurbo::{Affine, Point};

/// A row-major 3×3 planar projective transform.
///
/// Maps `[x, y, 1]` to `[x', y', w']` and returns `(x'/w', y'/w')`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    /// Matrix rows.
    pub rows: [[f64; 3]; 3],
}

impl Projection {
    /// The identity projection.
    pub const IDENTITY: Self = Self {
        rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Embeds an affine transform as a projection.
    #[must_use]
    pub fn from_affine(affine: Affine) -> Self {
        // kurbo::Affine stores [a, b, c, d, e, f] corresponding to:
        // [ a c e ]
        // [ b d f ]
        let [a, b, c, d, e, f] = affine.as_coeffs();
        Self {
            rows: [[a, c, e], [b, d, f], [0.0, 0.0, 1.0]],
        }
    }

    /// Applies the projection to a point.
    ///
    /// Points on the line at infinity (`w' == 0`) are returned undivided;
    /// callers keep on-screen geometry away from that line.
    #[must_use]
    pub fn project(&self, p: Point) -> Point {
        let m = &self.rows;
        let x = m[0][0] * p.x + m[0][1] * p.y + m[0][2];
        let y = m[1][0] * p.x + m[1][1] * p.y + m[1][2];
        let w = m[2][0] * p.x + m[2][1] * p.y + m[2][2];
        if w == 0.0 {
            return Point::new(x, y);
        }
        Point::new(x / w, y / w)
    }

    /// Returns the inverse projection, or `None` if the matrix is
    /// singular.
    ///
    /// Computed from the adjugate and determinant.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let m = &self.rows;
        let c00 = m[1][1] * m[2][2] - m[1][2] * m[2][1];
        let c01 = m[1][2] * m[2][0] - m[1][0] * m[2][2];
        let c02 = m[1][0] * m[2][1] - m[1][1] * m[2][0];
        let det = m[0][0] * c00 + m[0][1] * c01 + m[0][2] * c02;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv_det = 1.0 / det;
        let c10 = m[0][2] * m[2][1] - m[0][1] * m[2][2];
        let c11 = m[0][0] * m[2][2] - m[0][2] * m[2][0];
        let c12 = m[0][1] * m[2][0] - m[0][0] * m[2][1];
        let c20 = m[0][1] * m[1][2] - m[0][2] * m[1][1];
        let c21 = m[0][2] * m[1][0] - m[0][0] * m[1][2];
        let c22 = m[0][0] * m[1][1] - m[0][1] * m[1][0];
        Some(Self {
            rows: [
                [c00 * inv_det, c10 * inv_det, c20 * inv_det],
                [c01 * inv_det, c11 * inv_det, c21 * inv_det],
                [c02 * inv_det, c12 * inv_det, c22 * inv_det],
            ],
        })
    }

    /// Returns `true` for the exact identity.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl core::ops::Mul for Projection {
    type Output = Self;

    /// Composes projections: `(a * b).project(p) == a.project(b.project(p))`
    /// up to the shared homogeneous scale.
    fn mul(self, rhs: Self) -> Self {
        let a = &self.rows;
        let b = &rhs.rows;
        let mut rows = [[0.0; 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
            }
        }
        Self { rows }
    }
}
