//! Fixed-kernel convolution filters.
//!
//! The kernels are the classic photo-editor set. Each output channel is
//! `sum / scale + offset`, rounded and clamped to `[0, 255]`. Samples that
//! fall outside the image are clamped to the nearest edge pixel, so the
//! output always has the input's dimensions.

use crate::filters::types::RasterImage;

/// A square convolution kernel
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    pub size: usize,
    pub weights: &'static [f32],
    pub scale: f32,
    pub offset: f32,
}

#[rustfmt::skip]
pub const BLUR: Kernel = Kernel {
    size: 5,
    weights: &[
        1.0, 1.0, 1.0, 1.0, 1.0,
        1.0, 0.0, 0.0, 0.0, 1.0,
        1.0, 0.0, 0.0, 0.0, 1.0,
        1.0, 0.0, 0.0, 0.0, 1.0,
        1.0, 1.0, 1.0, 1.0, 1.0,
    ],
    scale: 16.0,
    offset: 0.0,
};

#[rustfmt::skip]
pub const CONTOUR: Kernel = Kernel {
    size: 3,
    weights: &[
        -1.0, -1.0, -1.0,
        -1.0,  8.0, -1.0,
        -1.0, -1.0, -1.0,
    ],
    scale: 1.0,
    offset: 255.0,
};

#[rustfmt::skip]
pub const DETAIL: Kernel = Kernel {
    size: 3,
    weights: &[
         0.0, -1.0,  0.0,
        -1.0, 10.0, -1.0,
         0.0, -1.0,  0.0,
    ],
    scale: 6.0,
    offset: 0.0,
};

#[rustfmt::skip]
pub const EDGE_ENHANCE: Kernel = Kernel {
    size: 3,
    weights: &[
        -1.0, -1.0, -1.0,
        -1.0, 10.0, -1.0,
        -1.0, -1.0, -1.0,
    ],
    scale: 2.0,
    offset: 0.0,
};

#[rustfmt::skip]
pub const EMBOSS: Kernel = Kernel {
    size: 3,
    weights: &[
        -1.0, 0.0, 0.0,
         0.0, 1.0, 0.0,
         0.0, 0.0, 0.0,
    ],
    scale: 1.0,
    offset: 128.0,
};

#[rustfmt::skip]
pub const SHARPEN: Kernel = Kernel {
    size: 3,
    weights: &[
        -2.0, -2.0, -2.0,
        -2.0, 32.0, -2.0,
        -2.0, -2.0, -2.0,
    ],
    scale: 16.0,
    offset: 0.0,
};

#[rustfmt::skip]
pub const SMOOTH: Kernel = Kernel {
    size: 3,
    weights: &[
        1.0, 1.0, 1.0,
        1.0, 5.0, 1.0,
        1.0, 1.0, 1.0,
    ],
    scale: 13.0,
    offset: 0.0,
};

/// Convolve every pixel of `image` with `kernel`
pub fn convolve(image: &RasterImage, kernel: &Kernel) -> RasterImage {
    if image.is_empty() {
        return image.clone();
    }

    let (width, height) = image.dimensions();
    let (max_x, max_y) = (width as i64 - 1, height as i64 - 1);
    let half = (kernel.size / 2) as i64;
    let source = image.as_image();

    image.map_pixels_with_coords(|x, y, _| {
        let mut acc = [0.0f32; 3];

        for (i, &weight) in kernel.weights.iter().enumerate() {
            if weight == 0.0 {
                continue;
            }
            let kx = (i % kernel.size) as i64 - half;
            let ky = (i / kernel.size) as i64 - half;
            let sx = (x as i64 + kx).clamp(0, max_x) as u32;
            let sy = (y as i64 + ky).clamp(0, max_y) as u32;

            let sample = source.get_pixel(sx, sy);
            for (channel, value) in acc.iter_mut().enumerate() {
                *value += weight * sample[channel] as f32;
            }
        }

        acc.map(|v| (v / kernel.scale + kernel.offset).round().clamp(0.0, 255.0) as u8)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Kernel; 7] = [BLUR, CONTOUR, DETAIL, EDGE_ENHANCE, EMBOSS, SHARPEN, SMOOTH];

    #[test]
    fn test_kernels_are_square() {
        for kernel in ALL {
            assert_eq!(kernel.weights.len(), kernel.size * kernel.size);
        }
    }

    #[test]
    fn test_dimensions_preserved() {
        let image = RasterImage::from_fn(7, 3, |x, y| [(x * 30) as u8, (y * 60) as u8, 90]);
        for kernel in ALL {
            assert_eq!(convolve(&image, &kernel).dimensions(), (7, 3));
        }

        let single = RasterImage::new_filled(1, 1, [12, 34, 56]);
        for kernel in ALL {
            assert_eq!(convolve(&single, &kernel).dimensions(), (1, 1));
        }
    }

    #[test]
    fn test_normalized_kernels_keep_flat_regions() {
        let flat = RasterImage::new_filled(6, 6, [80, 120, 200]);
        for kernel in [BLUR, DETAIL, EDGE_ENHANCE, SHARPEN, SMOOTH] {
            assert_eq!(convolve(&flat, &kernel), flat);
        }
    }

    #[test]
    fn test_contour_and_emboss_offsets_on_flat_regions() {
        let flat = RasterImage::new_filled(4, 4, [80, 120, 200]);
        assert!(convolve(&flat, &CONTOUR).pixels().all(|px| px == [255, 255, 255]));
        assert!(convolve(&flat, &EMBOSS).pixels().all(|px| px == [128, 128, 128]));
    }

    #[test]
    fn test_empty_image_passes_through() {
        let empty = RasterImage::new_filled(0, 0, [0, 0, 0]);
        assert_eq!(convolve(&empty, &BLUR), empty);
    }
}
