//! # Vintage Film Compositor
//!
//! Recreates the look of old film stock in five strict stages: warm color
//! temperature, luminance grain, vignette falloff, contrast and finally a soft
//! focus blur. Each stage reads the previous stage's full output.

mod effect;

pub use effect::{
    apply_color_temperature, apply_grain, apply_vignette, soft_focus_radius, VintageFilm,
};

// Vintage film parameter names
pub const WARMTH: &str = "warmth";
pub const GRAIN: &str = "grain";
pub const VIGNETTE: &str = "vignette";
pub const CONTRAST: &str = "contrast";
