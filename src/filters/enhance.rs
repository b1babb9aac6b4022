//! Linear enhancement curves and Gaussian softening.
//!
//! Brightness and contrast both interpolate between a degenerate image and
//! the input: `out = base + factor * (in - base)`. For brightness the base is
//! black, for contrast it is the image's mean luminance gray. A factor of 1.0
//! returns the input unchanged.

use crate::filters::{color_matrix::luma, types::RasterImage};

fn blend(base: f32, value: u8, factor: f32) -> u8 {
    (base + factor * (value as f32 - base)).clamp(0.0, 255.0) as u8
}

/// Mean luminance of the image, rounded to the nearest gray level
pub fn mean_luma(image: &RasterImage) -> u8 {
    if image.is_empty() {
        return 0;
    }

    let total: u64 = image.pixels().map(|px| luma(px) as u64).sum();
    let count = image.width() as u64 * image.height() as u64;
    (total as f64 / count as f64 + 0.5) as u8
}

pub fn brightness(image: &RasterImage, factor: f32) -> RasterImage {
    image.map_pixels(|px| px.map(|c| blend(0.0, c, factor)))
}

pub fn contrast(image: &RasterImage, factor: f32) -> RasterImage {
    let mean = mean_luma(image) as f32;
    image.map_pixels(|px| px.map(|c| blend(mean, c, factor)))
}

/// Gaussian blur where `radius` is the standard deviation in pixels
pub fn gaussian_blur(image: &RasterImage, radius: f32) -> RasterImage {
    if image.is_empty() || radius <= 0.0 {
        return image.clone();
    }
    RasterImage::new(image::imageops::blur(image.as_image(), radius))
}
