//! Eye-centre estimator orchestrating the full pipeline.
//!
//! Overview
//! - Smooths the crop with a three-pass box blur approximating a Gaussian
//!   whose sigma is derived from the image size (`sqrt(min(rows, cols)) / 2`).
//! - Computes central-difference gradients, keeps only magnitudes above
//!   `mean + k·std`, and normalizes the survivors to unit direction vectors.
//! - Optionally builds a darkness weight map (`255 − blurred`).
//! - Runs the coarse-to-fine search for the pixel maximizing the
//!   gradient-alignment objective.
//!
//! Modules
//! - [`params`] – configuration types used by the estimator and demo drivers.
//! - `pipeline` – the main [`EyeCenterEstimator`] implementation.
//! - `workspace` – reusable buffers that amortise allocations across frames.

pub mod params;
mod pipeline;
mod workspace;

pub use params::EstimatorParams;
pub use pipeline::{estimate_center, estimate_center_with_params, EyeCenterEstimator};
pub use workspace::EstimatorWorkspace;
