use rand::Rng;

use crate::filters::{enhance, params::FilterParameters, types::RasterImage};

/// Largest grain offset drawn per pixel before scaling by the grain parameter
const GRAIN_SPREAD: i32 = 30;

/// How far the vignette darkens the far corner at strength 1.0
const VIGNETTE_FALLOFF: f64 = 0.7;

/// The contrast stage runs slightly flatter than the user's setting
const CONTRAST_SCALE: f64 = 0.8;

/// Vintage film effect with warmth, grain, vignette and soft contrast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VintageFilm {
    params: FilterParameters,
}

impl VintageFilm {
    /// Create the effect; parameters are clamped to their valid ranges
    pub fn new(params: FilterParameters) -> Self {
        Self {
            params: params.clamped(),
        }
    }

    pub fn params(&self) -> &FilterParameters {
        &self.params
    }

    /// Apply the effect with fresh, unseeded grain
    pub fn apply(&self, image: &RasterImage) -> RasterImage {
        self.apply_with_rng(image, &mut rand::thread_rng())
    }

    /// Apply the effect drawing grain from `rng`
    ///
    /// The stage order is fixed; swapping any two stages changes the result.
    pub fn apply_with_rng<R: Rng + ?Sized>(&self, image: &RasterImage, rng: &mut R) -> RasterImage {
        let p = &self.params;

        let warmed = apply_color_temperature(image, p.warmth);
        let grained = apply_grain(&warmed, p.grain, rng);
        let vignetted = apply_vignette(&grained, p.vignette);
        let contrasted = enhance::contrast(&vignetted, (CONTRAST_SCALE * p.contrast) as f32);
        enhance::gaussian_blur(&contrasted, soft_focus_radius(p.contrast) as f32)
    }
}

impl Default for VintageFilm {
    fn default() -> Self {
        Self::new(FilterParameters::default())
    }
}

/// Boost red and green, cut blue (or the reverse when `warmth < 1.0`)
///
/// Each product is computed in f64 and truncated toward zero.
pub fn apply_color_temperature(image: &RasterImage, warmth: f64) -> RasterImage {
    let red = 1.2 * warmth;
    let green = 1.1 * warmth;
    let blue = 0.8 / warmth;

    image.map_pixels(|[r, g, b]| {
        [
            (r as f64 * red).min(255.0) as u8,
            (g as f64 * green).min(255.0) as u8,
            (b as f64 * blue).min(255.0) as u8,
        ]
    })
}

/// Add luminance grain: one sample per pixel, shared by all three channels
pub fn apply_grain<R: Rng + ?Sized>(image: &RasterImage, grain: f64, rng: &mut R) -> RasterImage {
    if grain == 0.0 {
        return image.clone();
    }

    let mut buffer = image.as_image().clone();
    for pixel in buffer.pixels_mut() {
        let noise = rng.gen_range(-GRAIN_SPREAD..=GRAIN_SPREAD) as f64 * grain;
        for channel in pixel.0.iter_mut() {
            *channel = (*channel as f64 + noise).clamp(0.0, 255.0) as u8;
        }
    }
    RasterImage::new(buffer)
}

/// Darken pixels by their normalized distance from the image center
pub fn apply_vignette(image: &RasterImage, strength: f64) -> RasterImage {
    let (cx, cy) = (image.width() as f64 / 2.0, image.height() as f64 / 2.0);
    let max_distance = (cx * cx + cy * cy).sqrt();
    if max_distance == 0.0 {
        return image.clone();
    }

    image.map_pixels_with_coords(|x, y, px| {
        let (dx, dy) = (x as f64 - cx, y as f64 - cy);
        let distance = (dx * dx + dy * dy).sqrt() / max_distance;
        // may go negative at the corners for strong settings; the clamp floors it
        let factor = 1.0 - distance * VIGNETTE_FALLOFF * strength;
        px.map(|c| (c as f64 * factor).clamp(0.0, 255.0) as u8)
    })
}

/// Lower contrast means a wider blur
pub fn soft_focus_radius(contrast: f64) -> f64 {
    0.5 * (2.0 - contrast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn photo(width: u32, height: u32) -> RasterImage {
        RasterImage::from_fn(width, height, |x, y| {
            [(40 + x * 9 % 180) as u8, (60 + y * 7 % 150) as u8, (90 + (x + y) % 120) as u8]
        })
    }

    #[test]
    fn test_color_temperature_neutral_warmth() {
        let warmed = apply_color_temperature(&RasterImage::new_filled(2, 2, [100, 100, 100]), 1.0);
        assert_eq!(warmed.get_pixel(0, 0), [120, 110, 80]);
    }

    #[test]
    fn test_color_temperature_caps_at_255() {
        let warmed = apply_color_temperature(&RasterImage::new_filled(1, 1, [250, 250, 250]), 1.4);
        let [r, g, b] = warmed.get_pixel(0, 0);
        assert_eq!((r, g), (255, 255));
        assert_eq!(b, 142);
    }

    #[test]
    fn test_color_temperature_at_warmth_bounds() {
        let cases: [([u8; 3], f64, [u8; 3]); 3] = [
            ([10, 10, 3], 0.6, [7, 6, 4]),
            ([10, 10, 30], 1.2, [14, 13, 20]),
            ([99, 99, 100], 1.4, [166, 152, 57]),
        ];
        for (input, warmth, want) in cases {
            let warmed = apply_color_temperature(&RasterImage::new_filled(1, 1, input), warmth);
            assert_eq!(warmed.get_pixel(0, 0), want, "{input:?} at warmth {warmth}");
        }
    }

    #[test]
    fn test_cool_setting_boosts_blue() {
        let cooled = apply_color_temperature(&RasterImage::new_filled(1, 1, [100, 100, 100]), 0.6);
        let [r, _, b] = cooled.get_pixel(0, 0);
        assert!(b > r);
    }

    #[test]
    fn test_grain_is_bounded_and_monochrome() {
        let gray = RasterImage::new_filled(32, 32, [128, 128, 128]);
        let mut rng = StdRng::seed_from_u64(7);
        let grain = 1.5;
        let noisy = apply_grain(&gray, grain, &mut rng);

        let bound = (GRAIN_SPREAD as f64 * grain).ceil() as u8;
        let mut changed = 0;
        for [r, g, b] in noisy.pixels() {
            assert!(r == g && g == b, "grain must be identical across channels");
            assert!(r.abs_diff(128) <= bound);
            if r != 128 {
                changed += 1;
            }
        }
        assert!(changed > 0);
    }

    #[test]
    fn test_grain_is_reproducible_with_a_seed() {
        let image = photo(20, 12);
        let first = apply_grain(&image, 2.0, &mut StdRng::seed_from_u64(42));
        let second = apply_grain(&image, 2.0, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_grain_is_identity() {
        let image = photo(10, 10);
        assert_eq!(apply_grain(&image, 0.0, &mut StdRng::seed_from_u64(1)), image);
    }

    #[test]
    fn test_vignette_center_brighter_than_corner() {
        let flat = RasterImage::new_filled(41, 31, [200, 200, 200]);
        for strength in [0.1, 1.0, 3.0] {
            let vignetted = apply_vignette(&flat, strength);
            let center = vignetted.get_pixel(20, 15);
            let corner = vignetted.get_pixel(0, 0);
            assert!(center[0] >= corner[0], "strength {strength}");
        }
    }

    #[test]
    fn test_strong_vignette_floors_at_black() {
        let flat = RasterImage::new_filled(40, 40, [255, 255, 255]);
        let vignetted = apply_vignette(&flat, 3.0);
        assert_eq!(vignetted.get_pixel(0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_zero_vignette_is_identity() {
        let image = photo(13, 8);
        assert_eq!(apply_vignette(&image, 0.0), image);
    }

    #[test]
    fn test_soft_focus_radius() {
        assert_eq!(soft_focus_radius(1.0), 0.5);
        assert!(soft_focus_radius(0.6) > soft_focus_radius(1.4));
    }

    #[test]
    fn test_neutral_pipeline_is_deterministic() {
        let image = photo(24, 18);
        let film = VintageFilm::new(FilterParameters::neutral());

        let first = film.apply(&image);
        let second = film.apply(&image);
        assert_eq!(first, second);
        assert_eq!(first.dimensions(), image.dimensions());
    }

    #[test]
    fn test_neutral_pipeline_flat_gray() {
        // warmth: (120, 110, 80); mean luma 110; contrast 0.8 -> (118, 110, 86)
        let film = VintageFilm::new(FilterParameters::neutral());
        let out = film.apply(&RasterImage::new_filled(16, 16, [100, 100, 100]));
        assert!(out.pixels().all(|px| px == [118, 110, 86]));
    }

    #[test]
    fn test_neutral_pipeline_golden_values() {
        // columns of gray 50, 100, 150, 200; mean luma after warming is 137
        let grays = [50u8, 100, 150, 200];
        let image = RasterImage::from_fn(4, 3, |x, _| [grays[x as usize]; 3]);
        let out = VintageFilm::new(FilterParameters::neutral()).apply(&image);

        let expected: [[u8; 3]; 4] = [[81, 76, 63], [123, 115, 91], [171, 159, 123], [213, 198, 151]];
        for y in 0..3 {
            for (x, want) in expected.iter().enumerate() {
                assert_eq!(out.get_pixel(x as u32, y), *want, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_parameters_are_clamped_on_construction() {
        let film = VintageFilm::new(FilterParameters { warmth: 5.0, grain: -1.0, vignette: 0.5, contrast: 1.0 });
        assert_eq!(film.params().warmth, 1.4);
        assert_eq!(film.params().grain, 0.0);
    }

    #[test]
    fn test_seeded_runs_match() {
        let image = photo(16, 16);
        let film = VintageFilm::default();
        let a = film.apply_with_rng(&image, &mut StdRng::seed_from_u64(99));
        let b = film.apply_with_rng(&image, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
