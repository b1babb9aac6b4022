//! Per-pixel color transforms: grayscale, sepia and invert.

use crate::filters::types::RasterImage;

/// Standard sepia tone coefficients, one row per output channel
const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// ITU-R 601 luminance in 16-bit fixed point
pub fn luma([r, g, b]: [u8; 3]) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Desaturate to luminance, keeping three equal channels
pub fn grayscale(image: &RasterImage) -> RasterImage {
    image.map_pixels(|px| {
        let l = luma(px);
        [l, l, l]
    })
}

pub fn sepia(image: &RasterImage) -> RasterImage {
    image.map_pixels(|[r, g, b]| {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        SEPIA_MATRIX.map(|[kr, kg, kb]| (kr * r + kg * g + kb * b).round().min(255.0) as u8)
    })
}

pub fn invert(image: &RasterImage) -> RasterImage {
    image.map_pixels(|px| px.map(|c| 255 - c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RasterImage {
        RasterImage::from_fn(width, height, |x, y| {
            [(x * 37 % 256) as u8, (y * 53 % 256) as u8, ((x + y) * 11 % 256) as u8]
        })
    }

    #[test]
    fn test_invert_twice_is_identity() {
        let image = gradient(17, 9);
        assert_eq!(invert(&invert(&image)), image);
    }

    #[test]
    fn test_invert_values() {
        let image = RasterImage::new_filled(2, 2, [0, 128, 255]);
        assert_eq!(invert(&image).get_pixel(1, 1), [255, 127, 0]);
    }

    #[test]
    fn test_grayscale_channels_are_equal() {
        let gray = grayscale(&gradient(23, 11));
        assert!(gray.pixels().all(|[r, g, b]| r == g && g == b));
    }

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma([0, 0, 0]), 0);
        assert_eq!(luma([255, 255, 255]), 255);
        assert_eq!(luma([255, 0, 0]), 76);
    }

    #[test]
    fn test_sepia_black_and_white() {
        let black = sepia(&RasterImage::new_filled(3, 3, [0, 0, 0]));
        assert!(black.pixels().all(|px| px == [0, 0, 0]));

        let white = sepia(&RasterImage::new_filled(3, 3, [255, 255, 255]));
        assert!(white.pixels().all(|px| px == [255, 255, 239]));
    }

    #[test]
    fn test_sepia_mid_gray() {
        // 0.937 * 100 rounds to 94 on the blue row
        let toned = sepia(&RasterImage::new_filled(1, 1, [100, 100, 100]));
        assert_eq!(toned.get_pixel(0, 0), [135, 120, 94]);
    }
}
