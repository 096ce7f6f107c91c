//! Borrowed 8-bit grayscale view over caller-owned bytes.
//!
//! This is the input seam for decoded images: `io::load_grayscale_image`
//! returns an owned buffer whose `as_view` borrows as `ImageU8`, and
//! `io::grayscale_to_f32` lifts the view into the 0..255 float grid the
//! estimator consumes. `stride` permits views over padded rows.
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
