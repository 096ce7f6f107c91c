mod common;

use common::synthetic_image::{dark_disk, uniform};
use eye_center_detector::image::ImageF32;
use eye_center_detector::{
    estimate_center, EstimatorParams, EyeCenter, EyeCenterEstimator, ScorePolicy,
};

fn center_distance(center: EyeCenter, cx: usize, cy: usize) -> f32 {
    let dx = center.x as f32 - cx as f32;
    let dy = center.y as f32 - cy as f32;
    (dx * dx + dy * dy).sqrt()
}

#[test]
fn tiny_images_return_the_sentinel() {
    for (w, h) in [(1, 1), (3, 3), (2, 3), (3, 1)] {
        let img = uniform(w, h, 128.0);
        let center = estimate_center(&img);
        assert_eq!(center, EyeCenter::INVALID, "{w}x{h} should be degenerate");
        assert!(!center.is_valid());
    }
}

#[test]
fn narrow_images_are_not_degenerate() {
    // The guard requires BOTH dimensions below 4; a 3-row strip with enough
    // columns still gets analysed.
    let img = uniform(32, 3, 128.0);
    let center = estimate_center(&img);
    assert!(center.is_valid());
}

#[test]
fn flat_image_yields_the_pinned_origin() {
    // Nothing survives the gradient threshold, the score map stays all-zero,
    // and the arg-max tie-break is defined to be (0, 0).
    let img = uniform(64, 48, 200.0);
    let center = estimate_center(&img);
    assert_eq!(center, EyeCenter::new(0, 0));
}

#[test]
fn estimated_center_stays_in_bounds() {
    let cases = [
        (64usize, 64usize, 32usize, 32usize, 10usize),
        (96, 80, 40, 44, 12),
        (259, 155, 129, 77, 20),
        (32, 100, 16, 50, 8),
    ];
    for (w, h, cx, cy, radius) in cases {
        let img = dark_disk(w, h, cx, cy, radius);
        let center = estimate_center(&img);
        assert!(center.is_valid(), "{w}x{h} disk produced the sentinel");
        assert!(
            (center.x as usize) < w && (center.y as usize) < h,
            "center ({}, {}) out of {w}x{h}",
            center.x,
            center.y
        );
    }
}

#[test]
fn centered_disk_is_located_accurately() {
    let _ = env_logger::builder().is_test(true).try_init();
    let img = dark_disk(64, 64, 32, 32, 10);
    let center = estimate_center(&img);
    let dist = center_distance(center, 32, 32);
    assert!(
        dist <= 2.0,
        "estimated ({}, {}) is {dist:.2}px from the true centroid",
        center.x,
        center.y
    );
}

#[test]
fn slightly_off_center_disk_is_located_accurately() {
    let img = dark_disk(96, 96, 47, 49, 12);
    let center = estimate_center(&img);
    let dist = center_distance(center, 47, 49);
    assert!(
        dist <= 2.0,
        "estimated ({}, {}) is {dist:.2}px from the true centroid",
        center.x,
        center.y
    );
}

#[test]
fn weighted_and_squared_policies_still_locate_the_disk() {
    let img = dark_disk(64, 64, 32, 32, 10);
    for score in [
        ScorePolicy {
            square_dot: true,
            ..Default::default()
        },
        ScorePolicy {
            use_weights: true,
            ..Default::default()
        },
        ScorePolicy {
            square_dot: true,
            use_weights: true,
            gate_weights: true,
        },
    ] {
        let params = EstimatorParams {
            score,
            ..Default::default()
        };
        let mut estimator = EyeCenterEstimator::new(64, 64, params);
        let center = estimator.estimate(&img);
        let dist = center_distance(center, 32, 32);
        assert!(dist <= 3.0, "policy {score:?}: estimated {dist:.2}px off");
    }
}

#[test]
fn repeated_estimates_are_deterministic() {
    let img = dark_disk(64, 64, 30, 34, 9);
    let mut estimator = EyeCenterEstimator::new(64, 64, EstimatorParams::default());
    let first = estimator.estimate(&img);
    let second = estimator.estimate(&img);
    assert_eq!(first, second);

    let report = estimator.estimate_with_diagnostics(&img);
    assert_eq!(report.result.center, first);
    assert!(report.search.evaluations > 0);
    assert!(report.search.evaluations < 64 * 64);
}

#[test]
fn one_shot_and_reusable_paths_agree() {
    let img = dark_disk(80, 60, 40, 30, 9);
    let one_shot = estimate_center(&img);
    let mut estimator = EyeCenterEstimator::new(60, 80, EstimatorParams::default());
    assert_eq!(estimator.estimate(&img), one_shot);
}

#[test]
fn caller_image_is_not_modified() {
    let img = dark_disk(64, 64, 32, 32, 10);
    let before = img.data.clone();
    let mut estimator = EyeCenterEstimator::new(64, 64, EstimatorParams::default());
    let _ = estimator.estimate(&img);
    assert_eq!(img.data, before);
}

#[test]
#[should_panic(expected = "estimator built for")]
fn wrong_size_image_panics() {
    let mut estimator = EyeCenterEstimator::new(64, 64, EstimatorParams::default());
    let wrong = ImageF32::new(32, 32);
    let _ = estimator.estimate(&wrong);
}
