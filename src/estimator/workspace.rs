//! Preallocated scratch buffers for one fixed image size.
//!
//! Every intermediate grid the pipeline touches lives here, allocated once at
//! estimator construction so repeated `estimate` calls stay allocation-free.
//! Buffers are mutated in place across a call; nothing in here is safe to
//! share between concurrent calls.
use crate::gradient::GradientField;
use crate::image::ImageF32;

/// Scratch grids sized for `rows × cols` images.
pub struct EstimatorWorkspace {
    /// Working copy of the caller's image; clobbered by the blur ping-pong.
    pub scratch: ImageF32,
    /// Blurred image, input to gradients and weights.
    pub blurred: ImageF32,
    /// Horizontal central-difference gradient.
    pub grad_x: ImageF32,
    /// Vertical central-difference gradient.
    pub grad_y: ImageF32,
    /// Gradient magnitudes.
    pub grad_mag: ImageF32,
    /// Darkness weight map (filled only when the score policy uses it).
    pub weights: ImageF32,
    /// Thresholded unit-gradient field.
    pub field: GradientField,
    /// Lazily populated score map; 0 means "not evaluated".
    pub scores: ImageF32,
}

impl EstimatorWorkspace {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            scratch: ImageF32::new(cols, rows),
            blurred: ImageF32::new(cols, rows),
            grad_x: ImageF32::new(cols, rows),
            grad_y: ImageF32::new(cols, rows),
            grad_mag: ImageF32::new(cols, rows),
            weights: ImageF32::new(cols, rows),
            field: GradientField::new(cols, rows),
            scores: ImageF32::new(cols, rows),
        }
    }

    /// Clear the score map ahead of a new search. The other buffers are
    /// fully overwritten by their producing stages and need no reset.
    pub fn reset(&mut self) {
        self.scores.fill(0.0);
    }
}
