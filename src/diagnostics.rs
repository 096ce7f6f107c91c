//! Diagnostics data model exposed by the estimator and the demo driver.
//!
//! [`CenterReport`] is returned by
//! [`EyeCenterEstimator::estimate_with_diagnostics`](crate::EyeCenterEstimator::estimate_with_diagnostics)
//! and bundles the compact [`CenterResult`] with per-stage timings and search
//! counters. The plain `estimate` path never touches any of this, keeping the
//! hot loop observation-free.
use crate::types::CenterResult;
use serde::{Deserialize, Serialize};

/// Timing entry for a single stage of the estimation pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one estimation call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

/// Shape of the analysed crop.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub rows: usize,
    pub cols: usize,
}

/// How the hierarchical search behaved on this frame.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStage {
    /// Objective evaluations actually performed.
    pub evaluations: usize,
    /// Refinement rounds after the initial coarse grid.
    pub rounds: usize,
    /// Gradient magnitude threshold applied before normalization.
    pub gradient_threshold: f32,
}

/// Full per-frame report: result plus stage-level evidence.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterReport {
    pub result: CenterResult,
    pub input: InputDescriptor,
    pub search: SearchStage,
    pub timing: TimingBreakdown,
}
