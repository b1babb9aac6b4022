//! # Session Layer
//!
//! Everything between the outside world and the filter engine: decoding and
//! downsizing uploads, holding originals for the session, encoding previews
//! as JPEG data URLs and packaging downloads.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use retro_darkroom::{config::Config, filters::ParamMap, session::{FilterSession, ImageStore}};
//!
//! # fn main() -> retro_darkroom::Result<()> {
//! let store = Arc::new(ImageStore::new());
//! let session = FilterSession::new(&Config::default(), Arc::clone(&store));
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let uploaded = session.upload(&bytes)?;
//! let preview = session.apply(&uploaded.id.to_string(), "sepia", &ParamMap::new())?;
//! let download = session.download(&preview.data_url, &preview.filter_id)?;
//! std::fs::write(&download.filename, &download.bytes)?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod service;
pub mod store;

pub use service::{Download, FilterPreview, FilterSession, UploadedImage};
pub use store::{ImageId, ImageStore};
