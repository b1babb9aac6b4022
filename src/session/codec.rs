//! Upload decoding and transport encoding.

use base64::{engine::general_purpose, Engine as _};
use image::{codecs::jpeg::JpegEncoder, ColorType};
use tracing::debug;

use crate::{
    error::{Result, SessionError},
    filters::RasterImage,
};

/// Prefix of the data URLs handed to and received from the browser
pub const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Decode uploaded bytes into an RGB raster no larger than `max_dimension` on either side
///
/// Oversized images shrink to fit a `max_dimension` square, keeping aspect ratio.
pub fn decode_upload(bytes: &[u8], max_dimension: u32) -> Result<RasterImage> {
    let decoded = image::load_from_memory(bytes).map_err(|e| SessionError::DecodeFailed {
        reason: e.to_string(),
    })?;

    let (width, height) = (decoded.width(), decoded.height());
    let decoded = if width > max_dimension || height > max_dimension {
        debug!("Downsizing upload from {}x{} to fit {}px", width, height, max_dimension);
        decoded.thumbnail(max_dimension, max_dimension)
    } else {
        decoded
    };

    Ok(RasterImage::new(decoded.to_rgb8()))
}

/// Encode a raster as JPEG at the given quality (1-100)
pub fn encode_jpeg(image: &RasterImage, quality: u8) -> Result<Vec<u8>> {
    if image.is_empty() {
        return Err(SessionError::EncodeFailed {
            reason: format!("cannot encode a {}x{} image", image.width(), image.height()),
        }
        .into());
    }

    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality)
        .encode(image.as_rgb_bytes(), image.width(), image.height(), ColorType::Rgb8)
        .map_err(|e| SessionError::EncodeFailed { reason: e.to_string() })?;
    Ok(bytes)
}

/// Wrap JPEG bytes in a `data:` URL
pub fn to_data_url(jpeg: &[u8]) -> String {
    format!("{}{}", JPEG_DATA_URL_PREFIX, general_purpose::STANDARD.encode(jpeg))
}

/// Decode a JPEG data URL (or bare base64) back to bytes
pub fn decode_data_url(data: &str) -> Result<Vec<u8>> {
    let payload = data.trim();
    let payload = payload.strip_prefix(JPEG_DATA_URL_PREFIX).unwrap_or(payload);

    general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| SessionError::InvalidImageData { reason: e.to_string() }.into())
}

/// File name offered when downloading a filtered image
pub fn download_filename(filter_name: &str) -> String {
    format!("filtered_image_{}.jpg", filter_name)
}
