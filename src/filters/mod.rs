//! # Filter Engine
//!
//! Pure pixel transforms over an in-memory RGB raster. Every filter reads a
//! [`RasterImage`] and returns a new one; nothing here performs I/O or keeps
//! state between calls, so filters can run concurrently on a shared original.
//!
//! ## Built-in Filters
//!
//! - **Color matrix**: grayscale, sepia, invert
//! - **Convolution**: blur, contour, detail, edge_enhance, emboss, sharpen, smooth
//! - **Enhancement**: brightness, contrast (fixed factor 1.5)
//! - **Vintage film**: warmth, grain, vignette and soft contrast, tunable
//!
//! ## Usage
//!
//! ```rust
//! use retro_darkroom::filters::{FilterRegistry, ParamMap, RasterImage};
//!
//! let registry = FilterRegistry::new();
//! let original = RasterImage::new_filled(64, 48, [120, 90, 60]);
//!
//! let mut params = ParamMap::new();
//! params.insert("warmth".to_string(), 1.3);
//! params.insert("grain".to_string(), 0.5);
//!
//! let result = registry.apply("vintage_film", &original, &params);
//! assert_eq!(result.image.dimensions(), (64, 48));
//! ```

pub mod color_matrix;
pub mod convolution;
pub mod enhance;
pub mod params;
pub mod registry;
pub mod types;
pub mod vintage;

// Re-exports for convenience
pub use params::{FilterParameters, ParamMap, ParamRange, VINTAGE_PARAMETERS};
pub use registry::{apply_filter, list_filters, FilterId, FilterRegistry, FilterSpec, FilteredResult};
pub use types::RasterImage;
pub use vintage::VintageFilm;
