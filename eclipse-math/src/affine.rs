//! 2D affine transforms over pixel coordinates.
//!
//! An [`AffineTransform`] holds the six coefficients of the map
//!
//! ```text
//! | x' |   | a  b  c |   | x |
//! | y' | = | d  e  f | * | y |
//!                         | 1 |
//! ```
//!
//! Builder methods right-multiply onto the receiver, so a chain reads
//! back to front: the last operation named is the first one applied to a
//! raw coordinate.

use std::ops::Mul;

use nalgebra::{Matrix2x3, Matrix3};

/// A 2x3 affine transform over `f64` pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform(Matrix2x3<f64>);

impl AffineTransform {
    /// The no-op transform.
    pub fn identity() -> Self {
        Self(Matrix2x3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0))
    }

    /// Build from row-major coefficients `[a, b, c, d, e, f]`.
    pub fn from_coefficients(c: [f64; 6]) -> Self {
        Self(Matrix2x3::new(c[0], c[1], c[2], c[3], c[4], c[5]))
    }

    /// Row-major coefficients `[a, b, c, d, e, f]`.
    pub fn coefficients(&self) -> [f64; 6] {
        let m = &self.0;
        [
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 2)],
        ]
    }

    /// The underlying 2x3 matrix.
    pub fn matrix(&self) -> Matrix2x3<f64> {
        self.0
    }

    /// Compose `self * q`: `q` is applied to coordinates first, then `self`.
    pub fn mat_mult(&self, q: &AffineTransform) -> AffineTransform {
        let product = self.to_homogeneous() * q.to_homogeneous();
        Self::from_homogeneous(&product)
    }

    /// Compose a translation by `(tx, ty)` underneath this transform.
    pub fn translate(&self, tx: f64, ty: f64) -> AffineTransform {
        self.mat_mult(&Self::from_coefficients([1.0, 0.0, tx, 0.0, 1.0, ty]))
    }

    /// Compose a rotation of `theta_deg` degrees underneath this transform.
    ///
    /// Positive angles rotate from the +x axis towards the +y axis.
    pub fn rotate(&self, theta_deg: f64) -> AffineTransform {
        let (sin_theta, cos_theta) = theta_deg.to_radians().sin_cos();
        self.mat_mult(&Self::from_coefficients([
            cos_theta, -sin_theta, 0.0, sin_theta, cos_theta, 0.0,
        ]))
    }

    /// Rotation by `theta_deg` degrees about the pivot `(x, y)`.
    ///
    /// Moves the pivot to the origin, rotates, then moves it back.
    pub fn rotate_about(theta_deg: f64, x: f64, y: f64) -> AffineTransform {
        Self::identity()
            .translate(x, y)
            .rotate(theta_deg)
            .translate(-x, -y)
    }

    /// Map a coordinate through the transform.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let m = &self.0;
        (
            m[(0, 0)] * x + m[(0, 1)] * y + m[(0, 2)],
            m[(1, 0)] * x + m[(1, 1)] * y + m[(1, 2)],
        )
    }

    fn to_homogeneous(&self) -> Matrix3<f64> {
        let [a, b, c, d, e, f] = self.coefficients();
        Matrix3::new(a, b, c, d, e, f, 0.0, 0.0, 1.0)
    }

    fn from_homogeneous(h: &Matrix3<f64>) -> Self {
        Self(Matrix2x3::new(
            h[(0, 0)],
            h[(0, 1)],
            h[(0, 2)],
            h[(1, 0)],
            h[(1, 1)],
            h[(1, 2)],
        ))
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for AffineTransform {
    type Output = AffineTransform;

    fn mul(self, rhs: AffineTransform) -> AffineTransform {
        self.mat_mult(&rhs)
    }
}
