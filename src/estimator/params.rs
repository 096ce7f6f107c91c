//! Parameter types configuring the estimator.
//!
//! The defaults follow the last-known tuning of the reference algorithm, but
//! none of these knobs is settled: the gradient threshold coefficient in
//! particular went through several undocumented revisions (0.3, 0.6, 0.9),
//! and the objective form is an open question — see [`ScorePolicy`].
use crate::score::ScorePolicy;
use serde::{Deserialize, Serialize};

/// Estimator-wide parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EstimatorParams {
    /// Coefficient `k` in the gradient magnitude threshold `mean + k·std`.
    /// Pixels below the threshold contribute no gradient direction.
    pub gradient_threshold_coeff: f32,
    /// Blur sigma override. `None` derives the radius from the image as
    /// `sqrt(min(rows, cols)) / 2`, the experimentally chosen default.
    pub blur_radius: Option<usize>,
    /// Objective tuning switches.
    pub score: ScorePolicy,
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self {
            gradient_threshold_coeff: 0.9,
            blur_radius: None,
            score: ScorePolicy::default(),
        }
    }
}

impl EstimatorParams {
    /// Blur radius for a given image size, honoring the override.
    pub fn blur_radius_for(&self, rows: usize, cols: usize) -> usize {
        match self.blur_radius {
            Some(r) => r,
            None => (rows.min(cols) as f64).sqrt() as usize / 2,
        }
    }
}
