//! Multi-frame overlay of limb detections.
//!
//! Successive frames are drawn on one canvas in different colours. To keep
//! the fills from hiding each other, frame `k` only paints the pixels whose
//! angular 12° segment (measured around the first frame's seed) satisfies
//! `segment % max_frames == k % max_frames`, producing a pinwheel where each
//! frame owns its own spokes. Seeds get a triple-square marker and each
//! frame's final bounds are outlined.

use std::path::Path;

use image::{Rgba, RgbaImage};

use super::{LimbPlotter, Result, VizError};
use crate::image_proc::{Point, Rectangle};

const SEGMENT_DEGREES: f64 = 12.0;

const PALETTE: [Rgba<u8>; 7] = [
    Rgba([0xa0, 0x00, 0x00, 0xff]),
    Rgba([0x00, 0xa0, 0x00, 0xff]),
    Rgba([0x00, 0x00, 0xa0, 0xff]),
    Rgba([0x70, 0x70, 0x00, 0xff]),
    Rgba([0x70, 0x00, 0x70, 0xff]),
    Rgba([0x00, 0x70, 0x70, 0xff]),
    Rgba([0xb0, 0x30, 0x70, 0xff]),
];

/// RGBA canvas accumulating the detections of several frames.
///
/// The canvas is sized to the first frame's bounds. Later frames draw in the
/// same coordinate system; anything outside the canvas is dropped.
#[derive(Debug, Clone)]
pub struct DebugComposite {
    canvas: Option<RgbaImage>,
    origin: Point,
    center: Point,
    frames: usize,
    max_frames: usize,
}

impl Default for DebugComposite {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugComposite {
    pub fn new() -> Self {
        Self::with_max_frames(5)
    }

    /// Number of frames sharing the angular segments. Values below 1 act as 1.
    pub fn with_max_frames(max_frames: usize) -> Self {
        Self {
            canvas: None,
            origin: Point::default(),
            center: Point::default(),
            frames: 0,
            max_frames: max_frames.max(1),
        }
    }

    /// Frames started so far.
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn canvas(&self) -> Option<&RgbaImage> {
        self.canvas.as_ref()
    }

    /// Colour of the current frame.
    pub fn color(&self) -> Rgba<u8> {
        PALETTE[self.current_frame() % PALETTE.len()]
    }

    /// Colour at `p` in frame coordinates, if it lies on the canvas.
    pub fn pixel(&self, p: Point) -> Option<Rgba<u8>> {
        let canvas = self.canvas.as_ref()?;
        let (x, y) = canvas_coords(canvas, self.origin, p)?;
        Some(*canvas.get_pixel(x, y))
    }

    /// Write the canvas as an image; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let canvas = self.canvas.as_ref().ok_or(VizError::NoFrames)?;
        canvas.save(path)?;
        Ok(())
    }

    fn current_frame(&self) -> usize {
        self.frames.saturating_sub(1)
    }

    fn set(&mut self, p: Point, color: Rgba<u8>) {
        let origin = self.origin;
        if let Some(canvas) = self.canvas.as_mut() {
            if let Some((x, y)) = canvas_coords(canvas, origin, p) {
                canvas.put_pixel(x, y, color);
            }
        }
    }

    fn segment(&self, p: Point) -> usize {
        let dy = (p.y - self.center.y) as f64;
        let dx = (p.x - self.center.x) as f64;
        let degrees = 180.0 + dy.atan2(dx).to_degrees();
        (degrees / SEGMENT_DEGREES) as usize
    }

    fn plot_marker(&mut self, p: Point) {
        for r in [2, 4, 6] {
            self.plot_rectangle(Rectangle::from_coords(p.x - r, p.y - r, p.x + r, p.y + r));
        }
    }
}

fn canvas_coords(canvas: &RgbaImage, origin: Point, p: Point) -> Option<(u32, u32)> {
    let x = u32::try_from(p.x - origin.x).ok()?;
    let y = u32::try_from(p.y - origin.y).ok()?;
    (x < canvas.width() && y < canvas.height()).then_some((x, y))
}

impl LimbPlotter for DebugComposite {
    fn start_frame(&mut self, bounds: Rectangle, center: Point) {
        if self.canvas.is_none() {
            let width = u32::try_from(bounds.width()).unwrap_or(u32::MAX);
            let height = u32::try_from(bounds.height()).unwrap_or(u32::MAX);
            self.canvas = Some(RgbaImage::new(width, height));
            self.origin = bounds.min;
            self.center = center;
        }
        self.frames += 1;
        self.plot_marker(center);
    }

    fn plot(&mut self, p: Point) {
        if self.segment(p) % self.max_frames != self.current_frame() % self.max_frames {
            return;
        }
        let color = self.color();
        self.set(p, color);
    }

    fn plot_rectangle(&mut self, r: Rectangle) {
        if !r.is_valid() {
            return;
        }
        let color = self.color();
        for x in r.min.x..=r.max.x {
            self.set(Point::new(x, r.min.y), color);
            self.set(Point::new(x, r.max.y), color);
        }
        for y in r.min.y..=r.max.y {
            self.set(Point::new(r.min.x, y), color);
            self.set(Point::new(r.max.x, y), color);
        }
    }
}
