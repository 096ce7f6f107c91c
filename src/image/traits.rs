//! Minimal read/write row-access traits shared by the u8 and f32 images.
//!
//! The pipeline consumes images strictly row-by-row (blur passes, gradient
//! sweeps, conversions), so the seam is deliberately small: dimensions plus
//! borrowed rows. Anything fancier lives on the concrete types.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];
}
