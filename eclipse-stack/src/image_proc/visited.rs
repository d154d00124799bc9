//! Dense visited-pixel bitset for region growing.

use super::geometry::{Point, Rectangle};
use crate::limb::LimbError;

const WORD_BITS: usize = u64::BITS as usize;

/// One bit per pixel of a rectangle, packed into `u64` words.
///
/// Pixels are addressed by their linear offset from `bounds.min` in row-major
/// order. Points outside the bounds are never considered visited.
#[derive(Debug, Clone)]
pub struct VisitedGrid {
    bounds: Rectangle,
    stride: usize,
    words: Vec<u64>,
    count: usize,
}

impl VisitedGrid {
    /// Allocate a grid covering exactly `bounds`.
    ///
    /// # Errors
    /// * `LimbError::EmptyImage` - `bounds` covers no pixels
    /// * `LimbError::ImageTooLarge` - more than `max_pixels` pixels
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eclipse_stack::image_proc::VisitedGrid;
    /// use eclipse_stack::{LimbError, Point, Rectangle};
    ///
    /// let bounds = Rectangle::from_coords(100, 200, 109, 209);
    /// let mut grid = VisitedGrid::new(bounds, 100).unwrap();
    /// assert!(grid.insert(Point::new(105, 205)));
    /// assert!(!grid.insert(Point::new(105, 205)));
    /// assert!(!grid.insert(Point::new(0, 0)));
    /// assert_eq!(grid.len(), 1);
    ///
    /// let too_big = VisitedGrid::new(bounds, 99);
    /// assert!(matches!(too_big, Err(LimbError::ImageTooLarge { .. })));
    /// ```
    pub fn new(bounds: Rectangle, max_pixels: usize) -> Result<Self, LimbError> {
        if !bounds.is_valid() {
            return Err(LimbError::EmptyImage);
        }

        let width = bounds.width();
        let height = bounds.height();
        let pixels = width
            .checked_mul(height)
            .and_then(|n| usize::try_from(n).ok())
            .filter(|&n| n <= max_pixels)
            .ok_or(LimbError::ImageTooLarge {
                width,
                height,
                max_pixels,
            })?;

        Ok(Self {
            bounds,
            stride: width as usize,
            words: vec![0; pixels.div_ceil(WORD_BITS)],
            count: 0,
        })
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains_point(p) {
            return None;
        }
        let col = (p.x - self.bounds.min.x) as usize;
        let row = (p.y - self.bounds.min.y) as usize;
        Some(row * self.stride + col)
    }

    /// Mark `p` visited. Returns true if it was not visited before.
    ///
    /// Out-of-bounds points are ignored and return false.
    pub fn insert(&mut self, p: Point) -> bool {
        let Some(i) = self.index(p) else {
            return false;
        };
        let word = &mut self.words[i / WORD_BITS];
        let mask = 1u64 << (i % WORD_BITS);
        if *word & mask != 0 {
            return false;
        }
        *word |= mask;
        self.count += 1;
        true
    }

    pub fn contains(&self, p: Point) -> bool {
        self.index(p)
            .is_some_and(|i| self.words[i / WORD_BITS] & (1u64 << (i % WORD_BITS)) != 0)
    }

    /// Number of visited pixels.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
