use image::{ImageBuffer, Rgb, RgbImage};
use rayon::prelude::*;

/// An RGB raster, 8 bits per channel
///
/// This is a thin wrapper around an RGB image buffer. Filters never mutate a
/// raster they were handed; every stage reads one `RasterImage` and returns a
/// freshly allocated one, so a stored original can be filtered any number of
/// times.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    buffer: RgbImage,
}

impl RasterImage {
    /// Create a raster from an RGB image buffer
    pub fn new(buffer: RgbImage) -> Self {
        Self { buffer }
    }

    /// Create a raster with the given dimensions filled with the specified color
    pub fn new_filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let buffer = ImageBuffer::from_fn(width, height, |_, _| Rgb(color));
        Self { buffer }
    }

    /// Create a raster by evaluating `f` at every coordinate
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> [u8; 3],
    {
        let buffer = ImageBuffer::from_fn(width, height, |x, y| Rgb(f(x, y)));
        Self { buffer }
    }

    /// Create a raster from raw interleaved RGB bytes
    pub fn from_rgb_bytes(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        ImageBuffer::from_raw(width, height, data).map(|buffer| Self { buffer })
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// True when the raster has no pixels at all
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Get a pixel at the given coordinates (returns RGB array)
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.buffer.get_pixel(x, y).0
    }

    /// Iterate over all pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.buffer.pixels().map(|p| p.0)
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &RgbImage {
        &self.buffer
    }

    /// Consume the raster and return the underlying image buffer
    pub fn into_image(self) -> RgbImage {
        self.buffer
    }

    /// Raw interleaved RGB bytes
    pub fn as_rgb_bytes(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    /// Build a new raster by mapping every pixel independently
    ///
    /// Pixels are processed in parallel, so `f` must not depend on visiting order.
    pub fn map_pixels<F>(&self, f: F) -> Self
    where
        F: Fn([u8; 3]) -> [u8; 3] + Sync,
    {
        let mut buffer = self.buffer.clone();
        let raw: &mut [u8] = &mut buffer;
        raw.par_chunks_exact_mut(3).for_each(|px| {
            let mapped = f([px[0], px[1], px[2]]);
            px.copy_from_slice(&mapped);
        });
        Self { buffer }
    }

    /// Like [`map_pixels`](Self::map_pixels) but `f` also receives the pixel coordinates
    pub fn map_pixels_with_coords<F>(&self, f: F) -> Self
    where
        F: Fn(u32, u32, [u8; 3]) -> [u8; 3] + Sync,
    {
        if self.is_empty() {
            return self.clone();
        }

        let row_len = self.width() as usize * 3;
        let mut buffer = self.buffer.clone();
        let raw: &mut [u8] = &mut buffer;
        raw.par_chunks_exact_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, px) in row.chunks_exact_mut(3).enumerate() {
                    let mapped = f(x as u32, y as u32, [px[0], px[1], px[2]]);
                    px.copy_from_slice(&mapped);
                }
            });
        Self { buffer }
    }

    /// Save the raster, picking the format from the file extension
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), image::ImageError> {
        self.buffer.save(path)
    }
}

impl From<RgbImage> for RasterImage {
    fn from(buffer: RgbImage) -> Self {
        Self::new(buffer)
    }
}
