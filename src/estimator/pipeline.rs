//! Estimation pipeline driving blur, gradients and the hierarchical search.
//!
//! [`EyeCenterEstimator`] is the stateful, zero-allocation-per-call entry
//! point: construct it once for a fixed crop size and feed it frames. For
//! one-off calls, [`estimate_center`] allocates scratch for a single frame.
//!
//! Typical usage:
//! ```no_run
//! use eye_center_detector::image::ImageF32;
//! use eye_center_detector::{EstimatorParams, EyeCenterEstimator};
//!
//! # fn example(frame: &ImageF32) {
//! let mut estimator = EyeCenterEstimator::new(frame.h, frame.w, EstimatorParams::default());
//! let center = estimator.estimate(frame);
//! if center.is_valid() {
//!     println!("pupil at ({}, {})", center.x, center.y);
//! }
//! # }
//! ```
use super::params::EstimatorParams;
use super::workspace::EstimatorWorkspace;
use crate::blur::gaussian_blur_approx;
use crate::diagnostics::{CenterReport, InputDescriptor, SearchStage, TimingBreakdown};
use crate::gradient::{gradient_x, gradient_y, magnitude};
use crate::image::ImageF32;
use crate::score::{score, weight_map};
use crate::search::{hierarchical_search, SearchStats};
use crate::types::{CenterResult, EyeCenter};
use log::debug;
use std::time::Instant;

/// Reusable eye-centre estimator for one fixed `(rows, cols)` crop size.
///
/// All scratch buffers are allocated at construction; `estimate` performs no
/// heap allocation. The estimator is **not reentrant**: one call mutates
/// every internal buffer, so concurrent use of a single instance corrupts
/// state. Use one instance per camera stream; no locking is provided and
/// none is needed under that discipline.
pub struct EyeCenterEstimator {
    rows: usize,
    cols: usize,
    params: EstimatorParams,
    workspace: EstimatorWorkspace,
}

impl EyeCenterEstimator {
    /// Create an estimator for `rows × cols` images.
    pub fn new(rows: usize, cols: usize, params: EstimatorParams) -> Self {
        Self {
            rows,
            cols,
            params,
            workspace: EstimatorWorkspace::new(rows, cols),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn params(&self) -> &EstimatorParams {
        &self.params
    }

    /// Score map populated by the most recent `estimate` call. Entries the
    /// search never evaluated are 0.
    pub fn score_map(&self) -> &ImageF32 {
        &self.workspace.scores
    }

    /// Estimate the eye centre in `image`.
    ///
    /// The image must match the `(rows, cols)` this estimator was built for;
    /// anything else is a caller contract violation and panics rather than
    /// silently misindexing. Images smaller than 4×4 (or empty) cannot be
    /// analysed and return [`EyeCenter::INVALID`].
    pub fn estimate(&mut self, image: &ImageF32) -> EyeCenter {
        self.check_dimensions(image);
        if self.is_degenerate() {
            return EyeCenter::INVALID;
        }

        self.workspace.reset();
        self.blur_stage(image);
        self.gradient_stage();
        let ((best_r, best_c), _) = self.search_stage();
        EyeCenter::new(best_c as i32, best_r as i32)
    }

    /// Estimate with per-stage timings and search counters. Same semantics
    /// as [`estimate`](Self::estimate), slower by the cost of the clock calls
    /// and the report allocation.
    pub fn estimate_with_diagnostics(&mut self, image: &ImageF32) -> CenterReport {
        self.check_dimensions(image);
        let input = InputDescriptor {
            rows: self.rows,
            cols: self.cols,
        };
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();

        if self.is_degenerate() {
            return CenterReport {
                result: CenterResult {
                    center: EyeCenter::INVALID,
                    score: 0.0,
                    latency_ms: 0.0,
                },
                input,
                search: SearchStage::default(),
                timing,
            };
        }

        self.workspace.reset();

        let start = Instant::now();
        self.blur_stage(image);
        timing.push("blur", start.elapsed().as_secs_f64() * 1000.0);

        let start = Instant::now();
        let gradient_threshold = self.gradient_stage();
        timing.push("gradients", start.elapsed().as_secs_f64() * 1000.0);

        let start = Instant::now();
        let ((best_r, best_c), stats) = self.search_stage();
        timing.push("search", start.elapsed().as_secs_f64() * 1000.0);

        timing.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "estimate done: center=({best_c}, {best_r}) evaluations={} total_ms={:.3}",
            stats.evaluations, timing.total_ms
        );

        let best_score = self.workspace.scores.get(best_c, best_r);
        CenterReport {
            result: CenterResult {
                center: EyeCenter::new(best_c as i32, best_r as i32),
                score: best_score,
                latency_ms: timing.total_ms,
            },
            input,
            search: SearchStage {
                evaluations: stats.evaluations,
                rounds: stats.rounds,
                gradient_threshold,
            },
            timing,
        }
    }

    fn check_dimensions(&self, image: &ImageF32) {
        assert!(
            image.h == self.rows && image.w == self.cols,
            "estimator built for {}x{} images, got {}x{}",
            self.rows,
            self.cols,
            image.h,
            image.w
        );
    }

    // Too small to carry a resolvable iris boundary.
    fn is_degenerate(&self) -> bool {
        (self.rows < 4 && self.cols < 4) || self.rows == 0 || self.cols == 0
    }

    /// Copy the frame into scratch and box-blur it into the owned buffer.
    /// The caller's image is never written.
    fn blur_stage(&mut self, image: &ImageF32) {
        let ws = &mut self.workspace;
        ws.scratch.data.copy_from_slice(&image.data);
        let radius = self.params.blur_radius_for(self.rows, self.cols);
        gaussian_blur_approx(&mut ws.scratch, &mut ws.blurred, radius);
    }

    /// Gradients, magnitude statistics, thresholded unit field, and the
    /// weight map when the policy asks for it. Returns the applied magnitude
    /// threshold.
    fn gradient_stage(&mut self) -> f32 {
        let ws = &mut self.workspace;
        gradient_x(&ws.blurred, &mut ws.grad_x);
        gradient_y(&ws.blurred, &mut ws.grad_y);
        magnitude(&ws.grad_x, &ws.grad_y, &mut ws.grad_mag);
        let threshold = ws.field.assign_thresholded(
            &ws.grad_x,
            &ws.grad_y,
            &ws.grad_mag,
            self.params.gradient_threshold_coeff,
        );
        if self.params.score.use_weights {
            weight_map(&ws.blurred, &mut ws.weights, self.params.score.gate_weights);
        }
        threshold
    }

    /// Hierarchical coarse-to-fine search over the objective.
    fn search_stage(&mut self) -> ((usize, usize), SearchStats) {
        let ws = &mut self.workspace;
        let policy = self.params.score;
        let field = &ws.field;
        let weights = policy.use_weights.then_some(&ws.weights);
        hierarchical_search(&mut ws.scores, |r, c| {
            score(field, weights, &policy, r, c)
        })
    }
}

/// One-shot estimation: allocates scratch buffers for this call only.
///
/// Prefer [`EyeCenterEstimator`] when processing a stream of frames at a
/// fixed resolution.
pub fn estimate_center(image: &ImageF32) -> EyeCenter {
    estimate_center_with_params(image, EstimatorParams::default())
}

/// One-shot estimation with explicit parameters.
pub fn estimate_center_with_params(image: &ImageF32, params: EstimatorParams) -> EyeCenter {
    EyeCenterEstimator::new(image.h, image.w, params).estimate(image)
}
