//! I/O helpers for grayscale images and JSON.
//!
//! - `load_grayscale_image`: read a PNG/JPEG/etc. into an owned 8-bit gray buffer.
//! - `grayscale_to_f32` / `rgb_to_grayscale_f32`: convert to the 0..255 float
//!   grid the estimator consumes.
//! - `save_grayscale_f32` / `save_score_map`: write float buffers to PNG for
//!   debugging.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageF32, ImageU8, ImageView, ImageViewMut};
use image::{GrayImage, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned 8-bit grayscale buffer with stride and borrowed view conversion.
#[derive(Clone, Debug)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given raw bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        let stride = width;
        Self {
            width,
            height,
            stride,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.stride,
            data: &self.data,
        }
    }
}

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Ok(GrayImageU8::new(width, height, img.into_raw()))
}

/// Convert an 8-bit grayscale view to the 0..255 float grid used by the
/// estimator. No normalization is applied.
pub fn grayscale_to_f32(gray: ImageU8) -> ImageF32 {
    let mut out = ImageF32::new(gray.w, gray.h);
    for y in 0..gray.h {
        let src = gray.row(y);
        let dst = out.row_mut(y);
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = s as f32;
        }
    }
    out
}

/// Convert an RGB image to a 0..255 grayscale float grid using the Rec. 709
/// luminance weights `0.2126 R + 0.7152 G + 0.0722 B`.
pub fn rgb_to_grayscale_f32(rgb: &RgbImage) -> ImageF32 {
    let w = rgb.width() as usize;
    let h = rgb.height() as usize;
    let mut out = ImageF32::new(w, h);
    for (x, y, px) in rgb.enumerate_pixels() {
        let [r, g, b] = px.0;
        let luma = r as f32 * 0.2126 + g as f32 * 0.7152 + b as f32 * 0.0722;
        out.set(x as usize, y as usize, luma);
    }
    out
}

/// Write an `ImageF32` with 0..255 intensities to a grayscale PNG.
pub fn save_grayscale_f32(img: &ImageF32, path: &Path) -> Result<(), String> {
    let mut buf = Vec::with_capacity(img.w * img.h);
    for y in 0..img.h {
        for &v in img.row(y) {
            buf.push(v.clamp(0.0, 255.0).round() as u8);
        }
    }
    let gray = GrayImage::from_raw(img.w as u32, img.h as u32, buf)
        .ok_or_else(|| "grayscale buffer size mismatch".to_string())?;
    gray.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Write a score map to PNG, rescaling so the maximum score maps to white.
/// Useful for inspecting which candidates the hierarchical search evaluated.
pub fn save_score_map(scores: &ImageF32, path: &Path) -> Result<(), String> {
    let max = scores.data.iter().cloned().fold(0.0f32, f32::max);
    let scale = if max > 0.0 { 255.0 / max } else { 0.0 };
    let mut rescaled = ImageF32::new(scores.w, scores.h);
    for (d, &s) in rescaled.data.iter_mut().zip(&scores.data) {
        *d = s * scale;
    }
    save_grayscale_f32(&rescaled, path)
}

/// Serialize a value as pretty JSON to the given path.
pub fn write_json_file<T: Serialize>(value: &T, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
    fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_view_converts_to_unnormalized_floats() {
        let gray = GrayImageU8::new(3, 2, vec![0, 128, 255, 10, 20, 30]);
        let img = grayscale_to_f32(gray.as_view());
        assert_eq!((img.w, img.h), (3, 2));
        assert_eq!(img.get(0, 0), 0.0);
        assert_eq!(img.get(1, 0), 128.0);
        assert_eq!(img.get(2, 0), 255.0);
        assert_eq!(img.get(2, 1), 30.0);
    }

    #[test]
    fn strided_view_skips_row_padding() {
        // 2x2 payload in rows padded to 4 bytes.
        let bytes = [1u8, 2, 99, 99, 3, 4, 99, 99];
        let view = ImageU8 {
            w: 2,
            h: 2,
            stride: 4,
            data: &bytes,
        };
        let img = grayscale_to_f32(view);
        assert_eq!(img.data, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn rgb_conversion_uses_rec709_luminance_weights() {
        let rgb = image::RgbImage::from_raw(3, 1, vec![255, 0, 0, 0, 255, 0, 0, 0, 255])
            .expect("raw buffer matches dimensions");
        let img = rgb_to_grayscale_f32(&rgb);
        assert!((img.get(0, 0) - 255.0 * 0.2126).abs() < 1e-3);
        assert!((img.get(1, 0) - 255.0 * 0.7152).abs() < 1e-3);
        assert!((img.get(2, 0) - 255.0 * 0.0722).abs() < 1e-3);
    }
}
