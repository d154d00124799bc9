use std::collections::VecDeque;

use log::{debug, info, warn};

use super::{LimbDetectorConfig, LimbError, LunarLimb};
use crate::image_proc::{to_gray, LuminanceBand, PixelSource, Point, Rectangle, VisitedGrid};
use crate::viz::{LimbPlotter, NullPlotter};

/// Luminance-weighted center of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Centroid {
    /// Mean coordinate of the admitted pixels (integer division).
    /// The origin when `samples` is zero.
    pub point: Point,
    /// Number of pixels admitted by the luminance band.
    pub samples: usize,
}

/// Mean position of every pixel whose red channel lies strictly inside `band`.
///
/// Dim pixels (sensor noise) and near-saturated pixels (bright corona core,
/// prominences) are ignored; what remains is mostly the corona, which
/// surrounds the lunar disk. Only the red channel is consulted.
///
/// With no admitted pixel the centroid is left at the origin and `samples`
/// is zero.
pub fn luminal_centroid<S>(image: &S, band: LuminanceBand) -> Centroid
where
    S: PixelSource + ?Sized,
{
    let bounds = image.bounds();
    let mut sum_x: i64 = 0;
    let mut sum_y: i64 = 0;
    let mut n: usize = 0;

    if bounds.is_valid() {
        for y in bounds.min.y..=bounds.max.y {
            for x in bounds.min.x..=bounds.max.x {
                let [red, _, _] = image.rgb16(Point::new(x, y));
                if band.admits(red) {
                    sum_x += x;
                    sum_y += y;
                    n += 1;
                }
            }
        }
    }

    if n == 0 {
        return Centroid {
            point: Point::default(),
            samples: 0,
        };
    }

    Centroid {
        point: Point::new(sum_x / n as i64, sum_y / n as i64),
        samples: n,
    }
}

/// Average gray value over the horizontal window `[x - half_window, x + half_window)`
/// on the row of `center`.
///
/// The average is always taken over the full `2 * half_window` pixels; window
/// pixels outside the image count as black. Only columns inside the image are
/// read, so the cost is bounded by the image width whatever the window size.
/// A zero-width window gives 0.
pub fn brightness_sample<S>(image: &S, center: Point, half_window: u16) -> u16
where
    S: PixelSource + ?Sized,
{
    let window = 2 * half_window as u64;
    if window == 0 {
        return 0;
    }

    let bounds = image.bounds();
    let mut sum: u64 = 0;
    if bounds.is_valid() && (bounds.min.y..=bounds.max.y).contains(&center.y) {
        let half = half_window as i64;
        let first = center.x.saturating_sub(half).max(bounds.min.x);
        let last = center.x.saturating_add(half - 1).min(bounds.max.x);
        for x in first..=last {
            sum += to_gray(image.rgb16(Point::new(x, center.y))) as u64;
        }
    }

    (sum / window) as u16
}

/// Finds the lunar limb in a single eclipse frame.
///
/// The detector is stateless between calls: each invocation owns its visited
/// grid and talks only to the plotter it is handed, so one detector can be
/// shared across frames and threads.
///
/// # Algorithm
/// 1. [`luminal_centroid`] picks a seed that should sit inside the disk.
/// 2. [`brightness_sample`] around the seed chooses the fill threshold via
///    [`LimbDetectorConfig::threshold_for`].
/// 3. A FIFO flood fill visits 4-connected pixels from the seed. A pixel whose
///    gray value exceeds the threshold is outside the limb: it is neither
///    recorded nor expanded through. Every other pixel grows the bounds and
///    queues its in-bounds, unvisited neighbours.
/// 4. A zero radius means no limb was found and is reported as an error.
#[derive(Debug, Clone, Default)]
pub struct LimbDetector {
    config: LimbDetectorConfig,
}

impl LimbDetector {
    pub fn new(config: LimbDetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LimbDetectorConfig {
        &self.config
    }

    /// Locate the limb without diagnostic output.
    pub fn detect<S>(&self, image: &S) -> Result<LunarLimb, LimbError>
    where
        S: PixelSource + ?Sized,
    {
        self.detect_with_plotter(image, &mut NullPlotter)
    }

    /// Locate the limb, reporting the seed, every accepted pixel and the
    /// final bounds to `plotter`.
    ///
    /// # Errors
    /// * `LimbError::EmptyImage` - the image has no pixels
    /// * `LimbError::ImageTooLarge` - the image exceeds `max_pixels`
    /// * `LimbError::DegenerateCentroid` - nothing fell inside the luminance band
    /// * `LimbError::LimbNotFound` - the fill produced a zero radius
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eclipse_stack::viz::LimbPlotter;
    /// use eclipse_stack::{LimbDetector, Point, Rectangle};
    /// use image::{ImageBuffer, Rgb};
    ///
    /// #[derive(Default)]
    /// struct Count(usize);
    ///
    /// impl LimbPlotter for Count {
    ///     fn start_frame(&mut self, _bounds: Rectangle, _center: Point) {}
    ///     fn plot(&mut self, _p: Point) {
    ///         self.0 += 1;
    ///     }
    ///     fn plot_rectangle(&mut self, _r: Rectangle) {}
    /// }
    ///
    /// // Dark 9x9 square on a bright frame
    /// let frame = ImageBuffer::from_fn(40, 40, |x, y| {
    ///     let v: u16 = if (16..25).contains(&x) && (16..25).contains(&y) { 0x0010 } else { 0x2000 };
    ///     Rgb([v, v, v])
    /// });
    ///
    /// let mut count = Count::default();
    /// let limb = LimbDetector::default()
    ///     .detect_with_plotter(&frame, &mut count)
    ///     .unwrap();
    /// assert_eq!(limb.bounds, Rectangle::from_coords(16, 16, 24, 24));
    /// assert_eq!(limb.radius(), 4);
    /// assert_eq!(count.0, 81);
    /// ```
    pub fn detect_with_plotter<S>(
        &self,
        image: &S,
        plotter: &mut dyn LimbPlotter,
    ) -> Result<LunarLimb, LimbError>
    where
        S: PixelSource + ?Sized,
    {
        let image_bounds = image.bounds();
        let mut visited = VisitedGrid::new(image_bounds, self.config.max_pixels)?;

        let centroid = luminal_centroid(image, self.config.luminance_band);
        if centroid.samples == 0 {
            warn!("No pixels inside luminance band, cannot seed limb search");
            return Err(LimbError::DegenerateCentroid);
        }
        let seed = centroid.point;

        let brightness = brightness_sample(image, seed, self.config.brightness_half_window);
        let threshold = self.config.threshold_for(brightness);
        debug!(
            "Luminal center {} from {} samples, brightness 0x{:04x}, threshold 0x{:04x}",
            seed, centroid.samples, brightness, threshold
        );

        plotter.start_frame(image_bounds, seed);

        let mut bounds = Rectangle::empty();
        let mut accepted = 0;
        let mut to_visit = VecDeque::from([seed]);

        while let Some(p) = to_visit.pop_front() {
            if !visited.insert(p) {
                continue;
            }

            // A bit of luminance marks the edge of the limb
            if to_gray(image.rgb16(p)) > threshold {
                continue;
            }

            bounds.grow(p);
            accepted += 1;
            plotter.plot(p);

            for n in p.neighbors4() {
                if image_bounds.contains_point(n) && !visited.contains(n) {
                    to_visit.push_back(n);
                }
            }
        }

        let limb = LunarLimb {
            luminal_center: seed,
            brightness,
            threshold,
            bounds,
            accepted,
        };
        info!("{limb}");

        if bounds.is_valid() {
            plotter.plot_rectangle(bounds);
        }

        if limb.radius() == 0 {
            warn!("Could not locate lunar limb ({accepted} pixels accepted)");
            return Err(LimbError::LimbNotFound { seed, threshold });
        }

        Ok(limb)
    }
}
