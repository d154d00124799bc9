//! 3x3 colour matrices and 3-component colour vectors.
//!
//! Channels are ordered R, G, B. These types are used to build per-channel
//! normalisation matrices, e.g. scaling one frame's white balance so it
//! matches a reference frame.

use std::fmt;
use std::ops::Mul;

use nalgebra::{Matrix3, Vector3};

use crate::{MathError, Result};

/// A 3x3 matrix acting on [`ColorVector`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(Matrix3<f64>);

/// A 3-component colour value (R, G, B).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorVector(Vector3<f64>);

impl ColorMatrix {
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Build from nine row-major entries.
    pub fn from_row_major(m: [f64; 9]) -> Self {
        Self(Matrix3::new(
            m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8],
        ))
    }

    /// The underlying 3x3 matrix.
    pub fn matrix(&self) -> Matrix3<f64> {
        self.0
    }

    /// Standard matrix product `self * b`.
    pub fn mat_mult(&self, b: &ColorMatrix) -> ColorMatrix {
        Self(self.0 * b.0)
    }

    /// Matrix-vector product.
    pub fn apply(&self, v: &ColorVector) -> ColorVector {
        ColorVector(self.0 * v.0)
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for ColorMatrix {
    type Output = ColorMatrix;

    fn mul(self, rhs: ColorMatrix) -> ColorMatrix {
        self.mat_mult(&rhs)
    }
}

impl Mul<ColorVector> for ColorMatrix {
    type Output = ColorVector;

    fn mul(self, rhs: ColorVector) -> ColorVector {
        self.apply(&rhs)
    }
}

impl fmt::Display for ColorMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..3 {
            writeln!(
                f,
                "[{:10.6}, {:10.6}, {:10.6}]",
                self.0[(row, 0)],
                self.0[(row, 1)],
                self.0[(row, 2)]
            )?;
        }
        Ok(())
    }
}

impl ColorVector {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self(Vector3::new(r, g, b))
    }

    pub fn components(&self) -> [f64; 3] {
        [self.0.x, self.0.y, self.0.z]
    }

    /// Place the vector on a diagonal and invert it.
    ///
    /// The result scales each channel by the reciprocal of the matching
    /// component, so applying it to `self` yields `(1, 1, 1)`.
    ///
    /// # Errors
    /// * `MathError::SingularDiagonal` - if any component is zero or its
    ///   reciprocal is not finite
    pub fn diagonal_invert(&self) -> Result<ColorMatrix> {
        let mut diagonal = Vector3::zeros();
        for (i, &c) in self.0.iter().enumerate() {
            let reciprocal = 1.0 / c;
            if c == 0.0 || !reciprocal.is_finite() {
                return Err(MathError::SingularDiagonal { component: i });
            }
            diagonal[i] = reciprocal;
        }
        Ok(ColorMatrix(Matrix3::from_diagonal(&diagonal)))
    }

    /// Raise every component below `min` up to `min`.
    pub fn floor_at(&mut self, min: f64) {
        for c in self.0.iter_mut() {
            if *c < min {
                *c = min;
            }
        }
    }

    /// Lower every component above `max` down to `max`.
    pub fn ceiling_at(&mut self, max: f64) {
        for c in self.0.iter_mut() {
            if *c > max {
                *c = max;
            }
        }
    }
}

impl From<[f64; 3]> for ColorVector {
    fn from(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl fmt::Display for ColorVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{:12.10}, {:12.10}, {:12.10}]",
            self.0.x, self.0.y, self.0.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mat_mult() {
        let a = ColorMatrix::from_row_major([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let b = ColorMatrix::from_row_major([9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
        let expected = ColorMatrix::from_row_major([
            30.0, 24.0, 18.0, 84.0, 69.0, 54.0, 138.0, 114.0, 90.0,
        ]);
        assert_eq!(a.mat_mult(&b), expected);
        assert_eq!(a * b, expected);
        assert_eq!(a * ColorMatrix::identity(), a);
    }

    #[test]
    fn test_apply() {
        let m = ColorMatrix::from_row_major([1.0, 0.0, 0.0, 0.5, 0.5, 0.0, 0.0, 0.0, 2.0]);
        let v = m.apply(&ColorVector::new(2.0, 4.0, 8.0));
        assert_eq!(v.components(), [2.0, 3.0, 16.0]);
        assert_eq!(m * ColorVector::new(2.0, 4.0, 8.0), v);
    }

    #[test]
    fn test_diagonal_invert_round_trip() {
        let v = ColorVector::new(0.8, 1.25, 3.0);
        let inv = v.diagonal_invert().unwrap();
        let ones = inv.apply(&v);
        for c in ones.components() {
            assert_relative_eq!(c, 1.0, epsilon = 1e-12);
        }

        // Off-diagonal entries stay zero
        let m = inv.matrix();
        assert_eq!(m[(0, 1)], 0.0);
        assert_eq!(m[(2, 0)], 0.0);
    }

    #[test]
    fn test_diagonal_invert_rejects_zero() {
        let v = ColorVector::new(1.0, 0.0, 2.0);
        assert_eq!(
            v.diagonal_invert(),
            Err(MathError::SingularDiagonal { component: 1 })
        );

        let v = ColorVector::new(1.0, 2.0, -0.0);
        assert_eq!(
            v.diagonal_invert(),
            Err(MathError::SingularDiagonal { component: 2 })
        );
    }

    #[test]
    fn test_diagonal_invert_rejects_subnormal_overflow() {
        let v = ColorVector::new(f64::MIN_POSITIVE / 1e10, 1.0, 1.0);
        assert!(v.diagonal_invert().is_err());
    }

    #[test]
    fn test_floor_and_ceiling_clamp_independently() {
        let mut v = ColorVector::new(-0.5, 0.3, 1.7);
        v.floor_at(0.0);
        assert_eq!(v.components(), [0.0, 0.3, 1.7]);
        v.ceiling_at(1.0);
        assert_eq!(v.components(), [0.0, 0.3, 1.0]);
    }

    #[test]
    fn test_display() {
        let v = ColorVector::new(1.0, 0.5, 0.25);
        assert_eq!(v.to_string(), "[1.0000000000, 0.5000000000, 0.2500000000]");

        let text = ColorMatrix::identity().to_string();
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("[  1.000000,   0.000000,   0.000000]"));
    }
}
