//! # Retro-Darkroom
//!
//! Photo filters with a tunable vintage film look.
//!
//! The heart of the crate is a pure filter engine: color-matrix transforms,
//! classic convolution kernels, linear enhancement and a five-stage vintage
//! film compositor, all dispatched through one registry. Around it sits a thin
//! session layer that decodes uploads, keeps originals in memory and encodes
//! previews for transport.
//!
//! ## Quick Start
//!
//! ```rust
//! use retro_darkroom::filters::{apply_filter, list_filters, ParamMap, RasterImage};
//!
//! let original = RasterImage::new_filled(32, 32, [200, 180, 160]);
//!
//! for (key, label) in list_filters() {
//!     let filtered = apply_filter(&original, key, &ParamMap::new());
//!     println!("{key}: {label} -> {}x{}", filtered.width(), filtered.height());
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`filters`] - Raster type, filters, vintage compositor and registry
//! - [`session`] - Upload decoding, image store, previews and downloads
//! - [`config`] - Configuration management
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod filters;
pub mod session;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{DarkroomError, Result},
    filters::{FilterId, FilterRegistry, RasterImage},
    session::{FilterSession, ImageStore},
};
