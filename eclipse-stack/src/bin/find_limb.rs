//! Locate the lunar limb in a set of eclipse frames
//!
//! Prints, for every frame where a limb was found, the translation that moves
//! its limb center onto the reference frame's limb center.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --bin find_limb -- frames/*.tif
//! cargo run --release --bin find_limb -- --reference-index 3 --composite overlay.png frames/*.tif
//! RUST_LOG=debug cargo run --release --bin find_limb -- --config limb.json IMG_0042.tif
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use eclipse_math::AffineTransform;
use eclipse_stack::viz::{DebugComposite, NullPlotter};
use eclipse_stack::{LimbDetector, LimbDetectorConfig, LimbError, LunarLimb, PixelSource};
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Frames to analyse, in stacking order
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// JSON detector configuration; omitted fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the multi-frame diagnostic overlay to this PNG
    #[arg(long)]
    composite: Option<PathBuf>,

    /// Frame whose limb anchors the registration
    #[arg(short, long, default_value_t = 0)]
    reference_index: usize,
}

/// Run the detector, drawing into `composite` only when one was requested.
fn locate<S>(
    detector: &LimbDetector,
    frame: &S,
    composite: Option<&mut DebugComposite>,
) -> std::result::Result<LunarLimb, LimbError>
where
    S: PixelSource + ?Sized,
{
    match composite {
        Some(composite) => detector.detect_with_plotter(frame, composite),
        None => detector.detect_with_plotter(frame, &mut NullPlotter),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => LimbDetectorConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LimbDetectorConfig::default(),
    };
    let detector = LimbDetector::new(config);
    let mut composite = args.composite.as_ref().map(|_| DebugComposite::new());

    let mut limbs: Vec<(usize, LunarLimb)> = Vec::new();
    for (index, path) in args.images.iter().enumerate() {
        let frame = match image::open(path) {
            Ok(img) => img.into_rgb16(),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        match locate(&detector, &frame, composite.as_mut()) {
            Ok(limb) => {
                info!("{}: {}", path.display(), limb);
                limbs.push((index, limb));
            }
            Err(e @ (LimbError::LimbNotFound { .. } | LimbError::DegenerateCentroid)) => {
                warn!("Skipping {}: {}", path.display(), e);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("detecting limb in {}", path.display()));
            }
        }
    }

    let Some(reference) = limbs
        .iter()
        .find(|(index, _)| *index == args.reference_index)
        .map(|(_, limb)| limb.center())
    else {
        bail!("no limb found in reference frame {}", args.reference_index);
    };

    for (index, limb) in &limbs {
        let center = limb.center();
        let registration = AffineTransform::identity().translate(
            (reference.x - center.x) as f64,
            (reference.y - center.y) as f64,
        );
        let [a, b, c, d, e, f] = registration.coefficients();
        println!(
            "{}\tcenter {}\tradius {}\t[{a} {b} {c}; {d} {e} {f}]",
            args.images[*index].display(),
            center,
            limb.radius(),
        );
    }

    if let (Some(path), Some(composite)) = (&args.composite, &composite) {
        composite
            .save(path)
            .with_context(|| format!("writing composite {}", path.display()))?;
        info!("Wrote composite to {}", path.display());
    }

    Ok(())
}
