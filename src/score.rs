//! Gradient-alignment objective for candidate eye centres.
//!
//! For a candidate centre `c`, every surviving gradient pixel `p` contributes
//! the dot product of the unit displacement `p − c` with the unit gradient at
//! `p`. The central-difference gradient points towards lighter regions, so at
//! the iris boundary it points outward into the sclera; at the true centre
//! that direction agrees with the displacement, and the sum peaks.
//!
//! Negative dot products are clamped to zero. The textbook form squares the
//! dot product instead, which lets strongly misaligned edges dominate the sum
//! and regularly drags the maximum off-centre; clamping is the standard fix.
//! Whether to additionally square the clamped product, and whether to weight
//! contributions by pixel darkness, was never settled empirically (darkness
//! weighting suffers under specular reflections on the iris) — both choices
//! are policy switches rather than constants here. See [`ScorePolicy`].
use crate::gradient::{mean, sample_std, GradientField};
use crate::image::ImageF32;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Tuning switches for the objective function.
///
/// Defaults match the last known revision of the reference tuning: clamped
/// plain dot products, no darkness weighting. The "correct" combination is an
/// open question; treat these as experiment knobs, not settled constants.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScorePolicy {
    /// Square the clamped dot product. Reduces noise sensitivity at a small
    /// accuracy cost.
    pub square_dot: bool,
    /// Multiply each contribution by the darkness weight map.
    pub use_weights: bool,
    /// Zero weight-map entries below their own mean + σ before use.
    pub gate_weights: bool,
}

/// Fill `dst` with the darkness weight map `255 − blurred`.
///
/// With `gate` set, entries below the map's own `mean + std` are zeroed so
/// only decidedly dark pixels (pupil, iris) contribute weight.
pub fn weight_map(blurred: &ImageF32, dst: &mut ImageF32, gate: bool) {
    assert_eq!((blurred.w, blurred.h), (dst.w, dst.h), "weight buffers must match");
    for (w, &v) in dst.data.iter_mut().zip(&blurred.data) {
        *w = 255.0 - v;
    }
    if gate {
        let m = mean(&dst.data);
        let s = sample_std(&dst.data, m);
        let threshold = m + s;
        for w in dst.data.iter_mut() {
            if *w < threshold {
                *w = 0.0;
            }
        }
    }
}

/// Objective value for the candidate centre `(center_c, center_r)`.
///
/// `weights` is consulted only when `policy.use_weights` is set. The sum is
/// normalized by the pixel count so scores stay comparable across window
/// sizes. O(W·H) per call — this is the cost driver the hierarchical search
/// exists to amortise.
pub fn score(
    field: &GradientField,
    weights: Option<&ImageF32>,
    policy: &ScorePolicy,
    center_r: usize,
    center_c: usize,
) -> f32 {
    let mut sum = 0.0f32;
    for (x, y, g) in field.iter_nonzero() {
        let dx = x as f32 - center_c as f32;
        let dy = y as f32 - center_r as f32;
        if dx == 0.0 && dy == 0.0 {
            continue;
        }
        let d = Vector2::new(dx, dy) / (dx * dx + dy * dy).sqrt();
        let dg = d.dot(&g).max(0.0);
        let aligned = if policy.square_dot { dg * dg } else { dg };
        let contribution = match weights {
            Some(w) if policy.use_weights => w.get(x, y) * aligned,
            _ => aligned,
        };
        sum += contribution;
    }
    sum / (field.w * field.h) as f32
}
