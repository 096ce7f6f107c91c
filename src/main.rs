use eye_center_detector::image::ImageF32;
use eye_center_detector::{EstimatorParams, EyeCenterEstimator};

fn main() {
    // Demo stub: creates a fake grayscale crop and runs the estimator
    let w = 128usize;
    let h = 96usize;
    let crop = ImageF32::new(w, h);

    let mut estimator = EyeCenterEstimator::new(h, w, EstimatorParams::default());
    let report = estimator.estimate_with_diagnostics(&crop);
    println!(
        "center=({}, {}) score={:.6} latency_ms={:.3}",
        report.result.center.x, report.result.center.y, report.result.score, report.result.latency_ms
    );
}
