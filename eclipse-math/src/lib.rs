//! Transform algebra for eclipse frame registration.
//!
//! Two families of small fixed-size matrices live here:
//!
//! - [`AffineTransform`]: a 2x3 affine map over pixel coordinates. Chains
//!   compose right-to-left, so in `t.translate(..).rotate(..)` the rotation
//!   acts on raw coordinates first and the translation is applied after.
//! - [`ColorMatrix`] / [`ColorVector`]: 3x3 per-channel linear transforms
//!   used to normalise the colour balance of one frame against another.
//!
//! # Examples
//!
//! ```rust
//! use eclipse_math::AffineTransform;
//!
//! // Rotating about a pivot leaves the pivot where it was.
//! let t = AffineTransform::rotate_about(30.0, 120.0, 80.0);
//! let (x, y) = t.apply(120.0, 80.0);
//! assert!((x - 120.0).abs() < 1e-9);
//! assert!((y - 80.0).abs() < 1e-9);
//! ```

pub mod affine;
pub mod color;

use thiserror::Error;

pub use affine::AffineTransform;
pub use color::{ColorMatrix, ColorVector};

/// Errors that can occur in transform construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("cannot invert diagonal: component {component} is zero or not finite")]
    SingularDiagonal { component: usize },
}

/// Result alias for transform algebra operations.
pub type Result<T> = std::result::Result<T, MathError>;
