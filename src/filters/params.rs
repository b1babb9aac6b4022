use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::filters::vintage::{CONTRAST, GRAIN, VIGNETTE, WARMTH};

/// Raw, caller-supplied parameters keyed by name
pub type ParamMap = HashMap<String, f64>;

/// Valid range for one tunable filter parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub description: &'static str,
}

impl ParamRange {
    /// Clamp `value` into range. Non-finite input falls back to the default.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.default
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const WARMTH_RANGE: ParamRange = ParamRange {
    name: WARMTH,
    min: 0.6,
    max: 1.4,
    default: 1.0,
    description: "Color temperature; above 1.0 is warmer, below is cooler",
};

pub const GRAIN_RANGE: ParamRange = ParamRange {
    name: GRAIN,
    min: 0.0,
    max: 3.0,
    default: 1.0,
    description: "Film grain intensity; 0.0 removes grain",
};

pub const VIGNETTE_RANGE: ParamRange = ParamRange {
    name: VIGNETTE,
    min: 0.0,
    max: 3.0,
    default: 1.0,
    description: "Corner darkening strength; 0.0 removes the vignette",
};

pub const CONTRAST_RANGE: ParamRange = ParamRange {
    name: CONTRAST,
    min: 0.6,
    max: 1.4,
    default: 1.0,
    description: "Contrast; lower values also soften focus",
};

/// All vintage film parameters, in display order
pub const VINTAGE_PARAMETERS: [ParamRange; 4] = [WARMTH_RANGE, GRAIN_RANGE, VIGNETTE_RANGE, CONTRAST_RANGE];

/// Parameters for the vintage film filter
///
/// Fields are public so config files and callers can set them directly;
/// the compositor always clamps before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParameters {
    pub warmth: f64,
    pub grain: f64,
    pub vignette: f64,
    pub contrast: f64,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            warmth: WARMTH_RANGE.default,
            grain: GRAIN_RANGE.default,
            vignette: VIGNETTE_RANGE.default,
            contrast: CONTRAST_RANGE.default,
        }
    }
}

impl FilterParameters {
    /// Create clamped parameters
    pub fn new(warmth: f64, grain: f64, vignette: f64, contrast: f64) -> Self {
        Self { warmth, grain, vignette, contrast }.clamped()
    }

    /// Parameters with no grain and no vignette; the deterministic setting
    pub fn neutral() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0)
    }

    /// Read parameters from a raw map, defaulting missing keys to 1.0
    pub fn from_map(map: &ParamMap) -> Self {
        Self::from_map_with_defaults(map, &Self::default())
    }

    /// Read parameters from a raw map, taking missing keys from `defaults`
    pub fn from_map_with_defaults(map: &ParamMap, defaults: &FilterParameters) -> Self {
        let get = |key: &str, fallback: f64| map.get(key).copied().unwrap_or(fallback);

        Self {
            warmth: get(WARMTH, defaults.warmth),
            grain: get(GRAIN, defaults.grain),
            vignette: get(VIGNETTE, defaults.vignette),
            contrast: get(CONTRAST, defaults.contrast),
        }
        .clamped()
    }

    /// Restrict every field to its valid range
    pub fn clamped(self) -> Self {
        Self {
            warmth: WARMTH_RANGE.clamp(self.warmth),
            grain: GRAIN_RANGE.clamp(self.grain),
            vignette: VIGNETTE_RANGE.clamp(self.vignette),
            contrast: CONTRAST_RANGE.clamp(self.contrast),
        }
    }

    pub fn to_map(&self) -> ParamMap {
        HashMap::from([
            (WARMTH.to_string(), self.warmth),
            (GRAIN.to_string(), self.grain),
            (VIGNETTE.to_string(), self.vignette),
            (CONTRAST.to_string(), self.contrast),
        ])
    }
}
