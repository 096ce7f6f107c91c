//! Central-difference gradients with statistical thresholding.
//!
//! The estimator does not need Sobel-style smoothing here because the image
//! is already blurred; a plain central difference keeps the gradient field
//! crisp at the iris boundary. Interior pixels use `(f(x+1) − f(x−1)) / 2`;
//! the first and last row/column fall back to one-sided differences — no
//! wraparound, no reflection.
//!
//! [`GradientField`] stores one unit vector per pixel where the gradient
//! magnitude clears `mean + k·std` (population mean, sample std with
//! Bessel's correction), and the zero vector elsewhere. This suppresses the
//! near-flat sclera while keeping iris-boundary and eyelid edges as pure
//! directions, independent of local contrast.
use crate::image::{ImageF32, ImageView, ImageViewMut};
use nalgebra::Vector2;

/// Horizontal central-difference gradient of `src` into `dst`.
pub fn gradient_x(src: &ImageF32, dst: &mut ImageF32) {
    assert_eq!((src.w, src.h), (dst.w, dst.h), "gradient buffers must match");
    let w = src.w;
    if w < 2 {
        dst.fill(0.0);
        return;
    }
    for y in 0..src.h {
        let row = src.row(y);
        let out = dst.row_mut(y);
        out[0] = row[1] - row[0];
        for x in 1..w - 1 {
            out[x] = (row[x + 1] - row[x - 1]) / 2.0;
        }
        out[w - 1] = row[w - 1] - row[w - 2];
    }
}

/// Vertical central-difference gradient of `src` into `dst`.
pub fn gradient_y(src: &ImageF32, dst: &mut ImageF32) {
    assert_eq!((src.w, src.h), (dst.w, dst.h), "gradient buffers must match");
    let h = src.h;
    if h < 2 {
        dst.fill(0.0);
        return;
    }
    for x in 0..src.w {
        dst.set(x, 0, src.get(x, 1) - src.get(x, 0));
    }
    for y in 1..h - 1 {
        let above = src.row(y - 1);
        let below = src.row(y + 1);
        let out = dst.row_mut(y);
        for x in 0..src.w {
            out[x] = (below[x] - above[x]) / 2.0;
        }
    }
    for x in 0..src.w {
        dst.set(x, h - 1, src.get(x, h - 1) - src.get(x, h - 2));
    }
}

/// Per-pixel Euclidean magnitude `sqrt(gx² + gy²)` into `dst`.
pub fn magnitude(gx: &ImageF32, gy: &ImageF32, dst: &mut ImageF32) {
    for ((m, &x), &y) in dst.data.iter_mut().zip(&gx.data).zip(&gy.data) {
        *m = (x * x + y * y).sqrt();
    }
}

/// Population mean over all values.
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// Sample standard deviation with Bessel's correction (divide by N − 1).
pub fn sample_std(values: &[f32], mean: f32) -> f32 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq: f32 = values.iter().map(|&v| (v - mean) * (v - mean)).sum();
    (sum_sq / (values.len() - 1) as f32).sqrt()
}

/// Thresholded unit-gradient field.
///
/// Invariant: every stored vector has magnitude exactly 0 or 1.
#[derive(Clone, Debug)]
pub struct GradientField {
    pub w: usize,
    pub h: usize,
    vecs: Vec<Vector2<f32>>,
}

impl GradientField {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            vecs: vec![Vector2::zeros(); w * h],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Vector2<f32> {
        self.vecs[y * self.w + x]
    }

    /// Iterate over `(x, y, unit_gradient)` for pixels that survived the
    /// threshold.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (usize, usize, Vector2<f32>)> + '_ {
        let w = self.w;
        self.vecs
            .iter()
            .enumerate()
            .filter(|(_, v)| v.x != 0.0 || v.y != 0.0)
            .map(move |(i, v)| (i % w, i / w, *v))
    }

    /// Rebuild the field from raw gradients: keep pixels whose magnitude
    /// clears `mag_mean + coeff · mag_std`, rescaled to unit length; zero the
    /// rest. Returns the threshold that was applied.
    pub fn assign_thresholded(
        &mut self,
        gx: &ImageF32,
        gy: &ImageF32,
        mags: &ImageF32,
        coeff: f32,
    ) -> f32 {
        assert_eq!((self.w, self.h), (gx.w, gx.h), "gradient field size mismatch");
        let mag_mean = mean(&mags.data);
        let mag_std = sample_std(&mags.data, mag_mean);
        let threshold = coeff * mag_std + mag_mean;
        for (((v, &m), &x), &y) in self
            .vecs
            .iter_mut()
            .zip(&mags.data)
            .zip(&gx.data)
            .zip(&gy.data)
        {
            // The zero-threshold degenerate case (flat image) keeps every
            // vector at zero since the magnitudes themselves are zero.
            if m >= threshold && m > 0.0 {
                *v = Vector2::new(x / m, y / m);
            } else {
                *v = Vector2::zeros();
            }
        }
        threshold
    }
}
