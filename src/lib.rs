#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod estimator;
pub mod image;
pub mod types;

// “Expert” modules – still public, but considered unstable internals.
pub mod blur;
pub mod gradient;
pub mod score;
pub mod search;

// --- High-level re-exports -------------------------------------------------

// Main entry points: estimator + results.
pub use crate::estimator::{
    estimate_center, estimate_center_with_params, EstimatorParams, EyeCenterEstimator,
};
pub use crate::types::{CenterResult, EyeCenter};

// High-level diagnostics returned by the estimator.
pub use crate::diagnostics::CenterReport;

// Objective tuning knobs; generally useful when experimenting.
pub use crate::score::ScorePolicy;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use eye_center_detector::prelude::*;
///
/// # fn main() {
/// let (w, h) = (128usize, 96usize);
/// let crop = ImageF32::new(w, h);
///
/// let mut estimator = EyeCenterEstimator::new(h, w, EstimatorParams::default());
/// let center = estimator.estimate(&crop);
/// println!("center=({}, {}) valid={}", center.x, center.y, center.is_valid());
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageF32;
    pub use crate::{estimate_center, EstimatorParams, EyeCenter, EyeCenterEstimator, ScorePolicy};
}
