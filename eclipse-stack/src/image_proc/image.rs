//! Minimal pixel access for the limb detector.
//!
//! The detector never decodes files. It reads pixels through [`PixelSource`],
//! which any in-memory frame can implement: 16-bit `image` buffers (RGB, RGBA
//! or luma) and monochrome sensor frames held as `ndarray` arrays.

use std::ops::Deref;

use image::{ImageBuffer, Pixel};
use ndarray::{ArrayBase, Data, Ix2};

use super::geometry::{Point, Rectangle};

/// Read access to a rectangle of 16-bit RGB pixels.
pub trait PixelSource {
    /// Inclusive bounds of the addressable pixels. The origin need not be (0, 0).
    fn bounds(&self) -> Rectangle;

    /// Red, green and blue values of the pixel at `p`.
    ///
    /// Callers must only ask for points inside [`bounds`](Self::bounds);
    /// implementations may panic otherwise.
    fn rgb16(&self, p: Point) -> [u16; 3];

    fn contains(&self, p: Point) -> bool {
        self.bounds().contains_point(p)
    }
}

impl<S: PixelSource + ?Sized> PixelSource for &S {
    fn bounds(&self) -> Rectangle {
        (**self).bounds()
    }

    fn rgb16(&self, p: Point) -> [u16; 3] {
        (**self).rgb16(p)
    }
}

impl<P, C> PixelSource for ImageBuffer<P, C>
where
    P: Pixel<Subpixel = u16>,
    C: Deref<Target = [u16]>,
{
    fn bounds(&self) -> Rectangle {
        Rectangle::from_origin_size(Point::default(), self.width(), self.height())
    }

    fn rgb16(&self, p: Point) -> [u16; 3] {
        self.get_pixel(p.x as u32, p.y as u32).to_rgb().0
    }
}

/// Monochrome frames: every channel reads the same sample.
impl<S> PixelSource for ArrayBase<S, Ix2>
where
    S: Data<Elem = u16>,
{
    fn bounds(&self) -> Rectangle {
        let (rows, cols) = self.dim();
        Rectangle::from_origin_size(Point::default(), cols as u32, rows as u32)
    }

    fn rgb16(&self, p: Point) -> [u16; 3] {
        let v = self[[p.y as usize, p.x as usize]];
        [v, v, v]
    }
}

/// Presents an inner source with its top-left pixel moved to `origin`.
///
/// Useful for frames cropped out of a larger sensor readout that must keep
/// their readout coordinates.
#[derive(Debug, Clone)]
pub struct Offset<S> {
    inner: S,
    origin: Point,
}

impl<S: PixelSource> Offset<S> {
    pub fn new(inner: S, origin: Point) -> Self {
        Self { inner, origin }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn shift(&self) -> Point {
        let inner_min = self.inner.bounds().min;
        Point::new(self.origin.x - inner_min.x, self.origin.y - inner_min.y)
    }
}

impl<S: PixelSource> PixelSource for Offset<S> {
    fn bounds(&self) -> Rectangle {
        let b = self.inner.bounds();
        if !b.is_valid() {
            return b;
        }
        let shift = self.shift();
        Rectangle {
            min: b.min.offset(shift.x, shift.y),
            max: b.max.offset(shift.x, shift.y),
        }
    }

    fn rgb16(&self, p: Point) -> [u16; 3] {
        let shift = self.shift();
        self.inner.rgb16(p.offset(-shift.x, -shift.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, Rgba};
    use ndarray::Array2;

    #[test]
    fn test_rgb_buffer() {
        let mut img: ImageBuffer<Rgb<u16>, Vec<u16>> = ImageBuffer::new(4, 3);
        img.put_pixel(2, 1, Rgb([1, 2, 3]));

        assert_eq!(img.bounds(), Rectangle::from_coords(0, 0, 3, 2));
        assert_eq!(img.rgb16(Point::new(2, 1)), [1, 2, 3]);
        assert!(img.contains(Point::new(3, 2)));
        assert!(!img.contains(Point::new(4, 2)));
        assert!(!img.contains(Point::new(-1, 0)));
    }

    #[test]
    fn test_rgba_and_luma_buffers() {
        let mut rgba: ImageBuffer<Rgba<u16>, Vec<u16>> = ImageBuffer::new(2, 2);
        rgba.put_pixel(1, 1, Rgba([10, 20, 30, 0]));
        assert_eq!(rgba.rgb16(Point::new(1, 1)), [10, 20, 30]);

        let mut luma: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(2, 2);
        luma.put_pixel(0, 1, Luma([500]));
        assert_eq!(luma.rgb16(Point::new(0, 1)), [500, 500, 500]);
    }

    #[test]
    fn test_array_frame_is_row_major() {
        let mut frame = Array2::<u16>::zeros((3, 5));
        frame[[2, 4]] = 77;

        assert_eq!(frame.bounds(), Rectangle::from_coords(0, 0, 4, 2));
        assert_eq!(frame.rgb16(Point::new(4, 2)), [77, 77, 77]);
        assert_eq!(frame.view().rgb16(Point::new(4, 2)), [77, 77, 77]);
    }

    #[test]
    fn test_offset_source() {
        let mut frame = Array2::<u16>::zeros((2, 2));
        frame[[1, 0]] = 9;

        let shifted = Offset::new(&frame, Point::new(100, -50));
        assert_eq!(shifted.bounds(), Rectangle::from_coords(100, -50, 101, -49));
        assert_eq!(shifted.rgb16(Point::new(100, -49)), [9, 9, 9]);
        assert_eq!(shifted.origin(), Point::new(100, -50));
    }
}
