use rand::Rng;
use std::fmt;
use tracing::trace;

use crate::filters::{
    color_matrix, convolution, enhance,
    params::{FilterParameters, ParamMap, ParamRange, VINTAGE_PARAMETERS},
    types::RasterImage,
    vintage::VintageFilm,
};

/// Factor used by the simple brightness and contrast filters
pub const ENHANCE_FACTOR: f32 = 1.5;

/// Every filter the engine knows, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterId {
    Grayscale,
    Blur,
    Contour,
    Detail,
    EdgeEnhance,
    Emboss,
    Sharpen,
    Smooth,
    Brightness,
    Contrast,
    Invert,
    Sepia,
    VintageFilm,
}

impl FilterId {
    pub const ALL: [FilterId; 13] = [
        FilterId::Grayscale,
        FilterId::Blur,
        FilterId::Contour,
        FilterId::Detail,
        FilterId::EdgeEnhance,
        FilterId::Emboss,
        FilterId::Sharpen,
        FilterId::Smooth,
        FilterId::Brightness,
        FilterId::Contrast,
        FilterId::Invert,
        FilterId::Sepia,
        FilterId::VintageFilm,
    ];

    /// The string key used by callers
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterId::Grayscale => "grayscale",
            FilterId::Blur => "blur",
            FilterId::Contour => "contour",
            FilterId::Detail => "detail",
            FilterId::EdgeEnhance => "edge_enhance",
            FilterId::Emboss => "emboss",
            FilterId::Sharpen => "sharpen",
            FilterId::Smooth => "smooth",
            FilterId::Brightness => "brightness",
            FilterId::Contrast => "contrast",
            FilterId::Invert => "invert",
            FilterId::Sepia => "sepia",
            FilterId::VintageFilm => "vintage_film",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterId::Grayscale => "Convert to grayscale",
            FilterId::Blur => "Blur effect",
            FilterId::Contour => "Contour effect",
            FilterId::Detail => "Enhance details",
            FilterId::EdgeEnhance => "Edge enhancement",
            FilterId::Emboss => "Emboss effect",
            FilterId::Sharpen => "Sharpen image",
            FilterId::Smooth => "Smooth image",
            FilterId::Brightness => "Increase brightness",
            FilterId::Contrast => "Increase contrast",
            FilterId::Invert => "Invert colors",
            FilterId::Sepia => "Sepia tone effect",
            FilterId::VintageFilm => "Add film grain effect",
        }
    }

    /// Tunable parameters; only the vintage film filter has any
    pub fn parameters(&self) -> &'static [ParamRange] {
        match self {
            FilterId::VintageFilm => &VINTAGE_PARAMETERS,
            _ => &[],
        }
    }

    /// Look up a filter by its string key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == key)
    }

    /// Run this filter. `params` only matter for the vintage film filter.
    pub fn apply_with_rng<R: Rng + ?Sized>(
        self,
        image: &RasterImage,
        params: &FilterParameters,
        rng: &mut R,
    ) -> RasterImage {
        match self {
            FilterId::Grayscale => color_matrix::grayscale(image),
            FilterId::Blur => convolution::convolve(image, &convolution::BLUR),
            FilterId::Contour => convolution::convolve(image, &convolution::CONTOUR),
            FilterId::Detail => convolution::convolve(image, &convolution::DETAIL),
            FilterId::EdgeEnhance => convolution::convolve(image, &convolution::EDGE_ENHANCE),
            FilterId::Emboss => convolution::convolve(image, &convolution::EMBOSS),
            FilterId::Sharpen => convolution::convolve(image, &convolution::SHARPEN),
            FilterId::Smooth => convolution::convolve(image, &convolution::SMOOTH),
            FilterId::Brightness => enhance::brightness(image, ENHANCE_FACTOR),
            FilterId::Contrast => enhance::contrast(image, ENHANCE_FACTOR),
            FilterId::Invert => color_matrix::invert(image),
            FilterId::Sepia => color_matrix::sepia(image),
            FilterId::VintageFilm => VintageFilm::new(*params).apply_with_rng(image, rng),
        }
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filter entry as shown in the filter picker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    pub id: FilterId,
    pub label: &'static str,
    pub parameters: &'static [ParamRange],
}

impl FilterSpec {
    pub fn key(&self) -> &'static str {
        self.id.as_str()
    }
}

impl From<FilterId> for FilterSpec {
    fn from(id: FilterId) -> Self {
        Self {
            id,
            label: id.label(),
            parameters: id.parameters(),
        }
    }
}

/// Output of one filter invocation
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredResult {
    pub image: RasterImage,
    /// The key the caller asked for
    pub filter_id: String,
    /// The filter that actually ran; `None` when the key was unknown
    pub filter: Option<FilterId>,
}

impl FilteredResult {
    /// True when no filter ran and the image is the untouched input
    pub fn is_passthrough(&self) -> bool {
        self.filter.is_none()
    }
}

/// Registry of the built-in filters and the engine's dispatch entry point
///
/// Unknown keys never fail: the input comes back unchanged. Vintage film
/// parameters are clamped; every other filter ignores parameters.
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    specs: Vec<FilterSpec>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self {
            specs: FilterId::ALL.into_iter().map(FilterSpec::from).collect(),
        }
    }

    /// All filters in display order
    pub fn list_filters(&self) -> &[FilterSpec] {
        &self.specs
    }

    pub fn get(&self, key: &str) -> Option<&FilterSpec> {
        self.specs.iter().find(|spec| spec.key() == key)
    }

    pub fn has_filter(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Get all available filter keys
    pub fn available_filters(&self) -> Vec<&'static str> {
        self.specs.iter().map(FilterSpec::key).collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Apply the filter named `filter_id` with fresh grain
    pub fn apply(&self, filter_id: &str, image: &RasterImage, params: &ParamMap) -> FilteredResult {
        self.apply_with_rng(filter_id, image, params, &mut rand::thread_rng())
    }

    /// Apply the filter named `filter_id`, drawing any randomness from `rng`
    pub fn apply_with_rng<R: Rng + ?Sized>(
        &self,
        filter_id: &str,
        image: &RasterImage,
        params: &ParamMap,
        rng: &mut R,
    ) -> FilteredResult {
        self.apply_params(filter_id, image, &FilterParameters::from_map(params), rng)
    }

    /// Apply with already-parsed parameters (they are clamped again here)
    pub fn apply_params<R: Rng + ?Sized>(
        &self,
        filter_id: &str,
        image: &RasterImage,
        params: &FilterParameters,
        rng: &mut R,
    ) -> FilteredResult {
        let filter = self.get(filter_id).map(|spec| spec.id);

        let image = match filter {
            Some(id) => {
                trace!("dispatching {} on {}x{} image", id, image.width(), image.height());
                id.apply_with_rng(image, &params.clamped(), rng)
            }
            None => {
                trace!("unknown filter '{}', passing image through", filter_id);
                image.clone()
            }
        };

        FilteredResult {
            image,
            filter_id: filter_id.to_string(),
            filter,
        }
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply `filter_id` to `image`; unknown keys return the image unchanged
pub fn apply_filter(image: &RasterImage, filter_id: &str, params: &ParamMap) -> RasterImage {
    FilterRegistry::new().apply(filter_id, image, params).image
}

/// `(key, label)` for every filter, in display order
pub fn list_filters() -> Vec<(&'static str, &'static str)> {
    FilterId::ALL.iter().map(|id| (id.as_str(), id.label())).collect()
}
