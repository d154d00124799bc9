//! Pixel points and inclusive bounding rectangles.
//!
//! [`Rectangle`] is the accumulator the limb detector grows as it accepts
//! pixels. It starts out empty (invalid bounds) and becomes a single point on
//! the first call to [`Rectangle::grow`]; every later call only widens it.
//! Growth is a per-axis min/max, so the final rectangle does not depend on the
//! order in which points were submitted.
//!
//! # Examples
//!
//! ```rust
//! use eclipse_stack::image_proc::geometry::{Point, Rectangle};
//!
//! let mut bounds = Rectangle::empty();
//! assert!(!bounds.is_valid());
//!
//! bounds.grow(Point::new(50, 100));
//! assert_eq!(bounds, Rectangle::from_point(Point::new(50, 100)));
//!
//! bounds.grow(Point::new(40, 120));
//! assert_eq!(bounds.dx(), 10);
//! assert_eq!(bounds.dy(), 20);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer pixel coordinate. `x` grows rightward, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    pub fn offset(&self, dx: i64, dy: i64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four axis-aligned neighbours: left, up, right, down.
    pub fn neighbors4(&self) -> [Point; 4] {
        [
            self.offset(-1, 0),
            self.offset(0, -1),
            self.offset(1, 0),
            self.offset(0, 1),
        ]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Axis-aligned rectangle with inclusive `min` and `max` corners.
///
/// An empty rectangle has `min > max` on both axes and reports zero spans
/// until it has been grown at least once.
///
/// # Examples
///
/// ```rust
/// use eclipse_stack::{Point, Rectangle};
///
/// let mut bounds = Rectangle::empty();
/// assert!(!bounds.is_valid());
/// assert_eq!(bounds.dx(), 0);
///
/// bounds.grow(Point::new(10, 4));
/// bounds.grow(Point::new(2, 8));
/// assert_eq!(bounds, Rectangle::from_coords(2, 4, 10, 8));
/// assert_eq!((bounds.dx(), bounds.dy()), (8, 4));
/// assert_eq!((bounds.width(), bounds.height()), (9, 5));
/// assert_eq!(bounds.center(), Point::new(6, 6));
/// assert!(bounds.contains_point(Point::new(10, 8)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    /// Top-left corner (inclusive)
    pub min: Point,
    /// Bottom-right corner (inclusive)
    pub max: Point,
}

impl Rectangle {
    /// A rectangle containing no pixels.
    ///
    /// The first [`grow`](Self::grow) turns it into a single-point rectangle.
    pub fn empty() -> Self {
        Self {
            min: Point::new(i64::MAX, i64::MAX),
            max: Point::new(i64::MIN, i64::MIN),
        }
    }

    /// A zero-area rectangle covering exactly `p`.
    pub fn from_point(p: Point) -> Self {
        Self { min: p, max: p }
    }

    /// Rectangle from explicit inclusive corner coordinates.
    pub fn from_coords(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Self {
        Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        }
    }

    /// Inclusive pixel bounds of a `width` x `height` image whose top-left
    /// pixel is `origin`. Zero-sized images give an empty rectangle.
    pub fn from_origin_size(origin: Point, width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::empty();
        }
        Self {
            min: origin,
            max: origin.offset(width as i64 - 1, height as i64 - 1),
        }
    }

    /// Expand independently per axis so that `p` lies inside.
    ///
    /// Points already inside leave the rectangle unchanged.
    pub fn grow(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Copying form of [`grow`](Self::grow).
    pub fn grown(mut self, p: Point) -> Self {
        self.grow(p);
        self
    }

    /// True once at least one point has been included.
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Horizontal span `max.x - min.x`; zero for an empty rectangle.
    pub fn dx(&self) -> i64 {
        if self.is_valid() {
            self.max.x - self.min.x
        } else {
            0
        }
    }

    /// Vertical span `max.y - min.y`; zero for an empty rectangle.
    pub fn dy(&self) -> i64 {
        if self.is_valid() {
            self.max.y - self.min.y
        } else {
            0
        }
    }

    /// Number of pixel columns covered.
    pub fn width(&self) -> u64 {
        if self.is_valid() {
            (self.dx() + 1) as u64
        } else {
            0
        }
    }

    /// Number of pixel rows covered.
    pub fn height(&self) -> u64 {
        if self.is_valid() {
            (self.dy() + 1) as u64
        } else {
            0
        }
    }

    /// Number of pixels covered.
    pub fn area(&self) -> u64 {
        self.width() * self.height()
    }

    /// Integer midpoint of the corners (rounds toward zero).
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2,
            (self.min.y + self.max.y) / 2,
        )
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}-{}", self.min, self.max)
        } else {
            write!(f, "(empty)")
        }
    }
}
