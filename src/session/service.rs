use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::{
    config::{Config, UploadConfig},
    error::{Result, SessionError},
    filters::{FilterId, FilterParameters, FilterRegistry, FilterSpec, ParamMap, RasterImage},
    session::{
        codec::{self, JPEG_CONTENT_TYPE},
        store::{ImageId, ImageStore},
    },
};

/// An accepted upload
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub id: ImageId,
    pub width: u32,
    pub height: u32,
    /// JPEG preview of the stored original
    pub data_url: String,
}

/// A filtered preview ready for the browser
#[derive(Debug, Clone)]
pub struct FilterPreview {
    pub filter_id: String,
    pub data_url: String,
}

/// A file download
#[derive(Debug, Clone)]
pub struct Download {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Request-facing front of the filter engine
///
/// Ties uploads, the shared [`ImageStore`] and the [`FilterRegistry`]
/// together. Every apply starts from the stored original, never from a
/// previously filtered result.
pub struct FilterSession {
    registry: FilterRegistry,
    store: Arc<ImageStore>,
    upload: UploadConfig,
    vintage_defaults: FilterParameters,
}

impl FilterSession {
    pub fn new(config: &Config, store: Arc<ImageStore>) -> Self {
        Self {
            registry: FilterRegistry::new(),
            store,
            upload: config.upload.clone(),
            vintage_defaults: config.vintage,
        }
    }

    /// The filters offered to the user, in display order
    pub fn filters(&self) -> &[FilterSpec] {
        self.registry.list_filters()
    }

    pub fn store(&self) -> &Arc<ImageStore> {
        &self.store
    }

    /// Decode, downsize and store an uploaded image
    pub fn upload(&self, bytes: &[u8]) -> Result<UploadedImage> {
        let raster = codec::decode_upload(bytes, self.upload.max_dimension)?;
        let (width, height) = raster.dimensions();
        let data_url = self.encode_preview(&raster)?;

        let id = self.store.insert(raster);
        info!("Stored upload {} ({}x{}, {} bytes)", id, width, height, bytes.len());

        Ok(UploadedImage { id, width, height, data_url })
    }

    /// Preview of the stored original
    pub fn preview(&self, image_id: &str) -> Result<String> {
        let original = self.lookup(image_id)?;
        self.encode_preview(&original)
    }

    /// Apply a filter to the stored original with fresh grain
    pub fn apply(&self, image_id: &str, filter_id: &str, params: &ParamMap) -> Result<FilterPreview> {
        self.apply_with_rng(image_id, filter_id, params, &mut rand::thread_rng())
    }

    /// Apply a filter to the stored original, drawing grain from `rng`
    pub fn apply_with_rng<R: Rng + ?Sized>(
        &self,
        image_id: &str,
        filter_id: &str,
        params: &ParamMap,
        rng: &mut R,
    ) -> Result<FilterPreview> {
        info!("Received filter request: {}", filter_id);
        debug!("Parameters: {:?}", params);

        let original = self.lookup(image_id)?;
        let params = FilterParameters::from_map_with_defaults(params, &self.vintage_defaults);

        match FilterId::from_key(filter_id) {
            Some(FilterId::VintageFilm) => info!(
                "Applying vintage filter with clamped values: warmth={}, grain={}, vignette={}, contrast={}",
                params.warmth, params.grain, params.vignette, params.contrast
            ),
            Some(_) => {}
            None => warn!("Unknown filter '{}', returning original image", filter_id),
        }

        let result = self.registry.apply_params(filter_id, &original, &params, rng);
        let data_url = self.encode_preview(&result.image)?;

        Ok(FilterPreview {
            filter_id: result.filter_id,
            data_url,
        })
    }

    /// Turn a preview data URL back into a downloadable JPEG
    pub fn download(&self, data_url: &str, filter_name: &str) -> Result<Download> {
        let bytes = codec::decode_data_url(data_url)?;
        let filename = codec::download_filename(filter_name);
        debug!("Prepared download {} ({} bytes)", filename, bytes.len());

        Ok(Download {
            filename,
            content_type: JPEG_CONTENT_TYPE,
            bytes,
        })
    }

    fn lookup(&self, image_id: &str) -> Result<Arc<RasterImage>> {
        let not_found = || SessionError::ImageNotFound { id: image_id.to_string() };

        let id: ImageId = image_id.parse().map_err(|_| not_found())?;
        self.store.get(&id).ok_or_else(|| not_found().into())
    }

    fn encode_preview(&self, image: &RasterImage) -> Result<String> {
        let jpeg = codec::encode_jpeg(image, self.upload.jpeg_quality)?;
        Ok(codec::to_data_url(&jpeg))
    }
}
