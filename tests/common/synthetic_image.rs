use eye_center_detector::image::ImageF32;

/// Dark circular disk on a uniform bright background, the simplest synthetic
/// stand-in for a pupil on sclera.
pub fn dark_disk(width: usize, height: usize, cx: usize, cy: usize, radius: usize) -> ImageF32 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(radius > 0, "disk radius must be positive");

    let mut img = ImageF32::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx as f32;
            let dy = y as f32 - cy as f32;
            let inside = (dx * dx + dy * dy).sqrt() <= radius as f32;
            img.set(x, y, if inside { 25.0 } else { 215.0 });
        }
    }
    img
}

/// Uniform-intensity image.
pub fn uniform(width: usize, height: usize, value: f32) -> ImageF32 {
    ImageF32::from_vec(width, height, vec![value; width * height])
}
