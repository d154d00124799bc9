//! Limb detection on synthetic eclipse frames
//!
//! Each frame is a dark lunar disk on a brighter corona-like background,
//! optionally with a ring of faint inner corona around the disk.

use eclipse_math::AffineTransform;
use eclipse_stack::image_proc::Offset;
use eclipse_stack::viz::DebugComposite;
use eclipse_stack::{LimbDetector, LimbError, Point};
use image::{ImageBuffer, Rgb};
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

type Frame = ImageBuffer<Rgb<u16>, Vec<u16>>;

const CORONA: u16 = 0x2000;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn in_disk(x: i64, y: i64, center: (i64, i64), radius: i64) -> bool {
    let dx = x - center.0;
    let dy = y - center.1;
    dx * dx + dy * dy <= radius * radius
}

/// Disk of `disk_value` inside an optional ring of `ring_value` out to
/// `ring_radius`, on a uniform corona background.
fn eclipse_frame(
    width: u32,
    height: u32,
    center: (i64, i64),
    radius: i64,
    disk_value: u16,
    ring: Option<(i64, u16)>,
) -> Frame {
    ImageBuffer::from_fn(width, height, |x, y| {
        let (x, y) = (x as i64, y as i64);
        let v = if in_disk(x, y, center, radius) {
            disk_value
        } else {
            match ring {
                Some((ring_radius, ring_value)) if in_disk(x, y, center, ring_radius) => {
                    ring_value
                }
                _ => CORONA,
            }
        };
        Rgb([v, v, v])
    })
}

fn disk_pixel_count(width: u32, height: u32, center: (i64, i64), radius: i64) -> usize {
    (0..height as i64)
        .flat_map(|y| (0..width as i64).map(move |x| (x, y)))
        .filter(|&(x, y)| in_disk(x, y, center, radius))
        .count()
}

#[test]
fn test_dark_disk_on_corona() {
    init_logging();
    let frame = eclipse_frame(200, 200, (100, 100), 50, 0x0010, None);

    let limb = LimbDetector::default().detect(&frame).unwrap();

    // Corona is symmetric about (99.5, 99.5) minus the disk, so the seed
    // lands just up-left of the true center
    assert_eq!(limb.luminal_center, Point::new(99, 99));
    assert_eq!(limb.brightness, 15);
    assert_eq!(limb.threshold, 0x0040);
    assert_eq!(limb.center(), Point::new(100, 100));
    assert_eq!(limb.radius(), 50);
    assert_eq!(limb.bounds.min, Point::new(50, 50));
    assert_eq!(limb.bounds.max, Point::new(150, 150));
    assert_eq!(limb.accepted, disk_pixel_count(200, 200, (100, 100), 50));
}

#[test]
fn test_dim_frame_excludes_faint_inner_corona() {
    init_logging();
    // Very dark disk: brightness 15 < 0x15, so the strict threshold applies
    // and the 0x0800 ring stops the fill
    let frame = eclipse_frame(200, 200, (100, 100), 20, 0x0010, Some((30, 0x0800)));
    let limb = LimbDetector::default().detect(&frame).unwrap();

    assert_eq!(limb.threshold, 0x0040);
    assert_eq!(limb.radius(), 20);
    assert_eq!(limb.accepted, disk_pixel_count(200, 200, (100, 100), 20));
}

#[test]
fn test_brighter_frame_absorbs_faint_inner_corona() {
    init_logging();
    // Brightness 47 >= 0x15, so the default threshold applies and the
    // 0x0800 ring is treated as part of the limb
    let frame = eclipse_frame(200, 200, (100, 100), 20, 0x0030, Some((30, 0x0800)));
    let limb = LimbDetector::default().detect(&frame).unwrap();

    assert_eq!(limb.brightness, 47);
    assert_eq!(limb.threshold, 0x1000);
    assert_eq!(limb.radius(), 30);
    assert_eq!(limb.center(), Point::new(100, 100));
    assert_eq!(limb.accepted, disk_pixel_count(200, 200, (100, 100), 30));
}

#[test]
fn test_all_bright_frame_has_no_limb() {
    init_logging();
    let frame: Frame = ImageBuffer::from_pixel(200, 200, Rgb([CORONA, CORONA, CORONA]));

    let err = LimbDetector::default().detect(&frame).unwrap_err();
    match err {
        LimbError::LimbNotFound { seed, threshold } => {
            assert_eq!(seed, Point::new(99, 99));
            assert_eq!(threshold, 0x1000);
        }
        other => panic!("expected LimbNotFound, got {other:?}"),
    }
}

#[test]
fn test_frame_without_in_band_pixels() {
    init_logging();
    // Left half black, right half saturated: nothing inside the band
    let frame: Frame = ImageBuffer::from_fn(64, 64, |x, _| {
        let v = if x < 32 { 0 } else { 0xffff };
        Rgb([v, v, v])
    });

    let err = LimbDetector::default().detect(&frame).unwrap_err();
    assert!(matches!(err, LimbError::DegenerateCentroid));
}

#[test]
fn test_noisy_frame() {
    init_logging();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let clean = eclipse_frame(240, 240, (120, 120), 60, 0x0008, None);
    let frame: Frame = ImageBuffer::from_fn(240, 240, |x, y| {
        let [v, _, _] = clean.get_pixel(x, y).0;
        let noisy = if v == CORONA {
            v - 0x0200 + rng.random_range(0..0x0400)
        } else {
            v + rng.random_range(0..8)
        };
        Rgb([noisy, noisy, noisy])
    });

    let limb = LimbDetector::default().detect(&frame).unwrap();
    assert_eq!(limb.center(), Point::new(120, 120));
    assert_eq!(limb.radius(), 60);
}

#[test]
fn test_frame_with_readout_origin() {
    init_logging();
    let frame = eclipse_frame(200, 200, (100, 100), 50, 0x0010, None);
    let cropped = Offset::new(&frame, Point::new(1000, -500));

    let limb = LimbDetector::default().detect(&cropped).unwrap();
    assert_eq!(limb.center(), Point::new(1100, -400));
    assert_eq!(limb.radius(), 50);
    // Integer division truncates toward zero on the negative rows
    assert_eq!(limb.luminal_center, Point::new(1099, -400));
}

#[test]
fn test_monochrome_array_frame() {
    init_logging();
    let frame = Array2::from_shape_fn((120, 160), |(row, col)| {
        if in_disk(col as i64, row as i64, (80, 60), 30) {
            0x0010u16
        } else {
            CORONA
        }
    });

    let limb = LimbDetector::default().detect(&frame).unwrap();
    assert_eq!(limb.center(), Point::new(80, 60));
    assert_eq!(limb.radius(), 30);
}

#[test]
fn test_registration_moves_limb_onto_reference() {
    init_logging();
    let detector = LimbDetector::default();
    let reference = detector
        .detect(&eclipse_frame(200, 200, (100, 100), 50, 0x0010, None))
        .unwrap();
    let drifted = detector
        .detect(&eclipse_frame(200, 200, (108, 95), 50, 0x0010, None))
        .unwrap();
    assert_eq!(drifted.center(), Point::new(108, 95));

    let target = reference.center();
    let center = drifted.center();
    let registration = AffineTransform::identity().translate(
        (target.x - center.x) as f64,
        (target.y - center.y) as f64,
    );

    assert_eq!(
        registration.apply(center.x as f64, center.y as f64),
        (target.x as f64, target.y as f64)
    );
}

#[test]
fn test_composite_of_drifting_frames() {
    init_logging();
    let detector = LimbDetector::default();
    let mut composite = DebugComposite::new();

    for (i, center) in [(100, 100), (104, 98), (96, 103)].into_iter().enumerate() {
        let frame = eclipse_frame(200, 200, center, 50, 0x0010, None);
        let limb = detector.detect_with_plotter(&frame, &mut composite).unwrap();
        assert_eq!(limb.center(), Point::new(center.0, center.1));
        assert_eq!(composite.frame_count(), i + 1);
    }

    let path = test_helpers::output_path("eclipse_stack/limb_composite.png");
    composite.save(&path).unwrap();

    let saved = image::open(&path).unwrap();
    assert_eq!((saved.width(), saved.height()), (200, 200));
}
