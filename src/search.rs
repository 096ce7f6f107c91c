//! Coarse-to-fine search for the objective's arg-max pixel.
//!
//! A full scan would evaluate the O(W·H) objective at every pixel, which is
//! quadratic overall and hopeless for live video. Instead, candidates are
//! scored on a sparse grid with spacing `floor(sqrt(rows·cols))`, then the
//! grid is repeatedly refined to spacing `floor(sqrt(lastStep))`, evaluating
//! a refined candidate only when its nearest already-scored coarse point is
//! tied (within a factor of 0.999999) with the best score so far. Unevaluated
//! score-map entries stay 0 and never win. The loop stops once the spacing
//! reaches 2, trading the last pixel of accuracy for a large speedup.
//!
//! The pruning is greedy: a maximum hiding far from every promising coarse
//! point can be missed. That is the accepted trade of the design.
//!
//! Ties in the arg-max resolve to the first pixel in row-major scan order, so
//! an all-zero score map (flat image, nothing survives the gradient
//! threshold) yields the defined coordinate (0, 0).
use crate::image::ImageF32;
use log::debug;

/// Near-equality factor for "tied with the current best".
const APPROX_TIE: f32 = 0.999_999;

/// Counters describing how much work the search actually did.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    /// Objective evaluations performed (re-evaluations of the same pixel on
    /// finer grids included, matching the reference behaviour).
    pub evaluations: usize,
    /// Refinement rounds after the initial coarse pass.
    pub rounds: usize,
}

/// Row-major arg-max with first-scan tie-breaking.
///
/// Returns `(row, col)` of the maximum entry; for an all-zero (or all-equal)
/// map this is (0, 0). An empty map also yields (0, 0) — the coordinate is
/// meaningless there, but a defined answer beats a panic for a public helper.
pub fn argmax2d(scores: &ImageF32) -> (usize, usize) {
    if scores.data.is_empty() {
        return (0, 0);
    }
    let mut best = scores.data[0];
    let mut best_r = 0usize;
    let mut best_c = 0usize;
    for (i, &v) in scores.data.iter().enumerate() {
        if v > best {
            best = v;
            best_r = i / scores.w;
            best_c = i % scores.w;
        }
    }
    (best_r, best_c)
}

#[inline]
fn nearest_coarse(i: usize, coarse_step: usize, limit: usize) -> usize {
    // Ties round to even multiples, matching the reference implementation's
    // midpoint behaviour; the exact choice decides which coarse cell gates a
    // candidate halfway between two grid points.
    let snapped = (i as f32 / coarse_step as f32).round_ties_even() * coarse_step as f32;
    (snapped as usize).min(limit - 1)
}

/// Run the hierarchical search over `scores` (cleared by the caller), using
/// `objective(row, col)` to evaluate candidates lazily.
///
/// Returns the arg-max `(row, col)` and the work counters.
pub fn hierarchical_search<F>(scores: &mut ImageF32, mut objective: F) -> ((usize, usize), SearchStats)
where
    F: FnMut(usize, usize) -> f32,
{
    let rows = scores.h;
    let cols = scores.w;
    let mut stats = SearchStats::default();

    let initial_step = ((rows * cols) as f64).sqrt() as usize;
    let initial_step = initial_step.max(1);

    for r in (0..rows).step_by(initial_step) {
        for c in (0..cols).step_by(initial_step) {
            let s = objective(r, c);
            scores.set(c, r, s);
            stats.evaluations += 1;
        }
    }

    let mut last_step = initial_step;
    while last_step > 2 {
        let (local_r, local_c) = argmax2d(scores);
        let local_max = scores.get(local_c, local_r);
        let approx_threshold = local_max * APPROX_TIE;
        let step = (last_step as f64).sqrt() as usize;

        for r in (0..rows).step_by(step) {
            let gate_r = nearest_coarse(r, last_step, rows);
            for c in (0..cols).step_by(step) {
                let gate_c = nearest_coarse(c, last_step, cols);
                if scores.get(gate_c, gate_r) > approx_threshold {
                    let s = objective(r, c);
                    scores.set(c, r, s);
                    stats.evaluations += 1;
                }
            }
        }

        stats.rounds += 1;
        last_step = step;
    }

    let best = argmax2d(scores);
    debug!(
        "hierarchical_search done: best=({}, {}) evaluations={} rounds={}",
        best.0, best.1, stats.evaluations, stats.rounds
    );
    (best, stats)
}
