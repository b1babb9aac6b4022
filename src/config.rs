use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    error::{ConfigError, Result},
    filters::FilterParameters,
};

/// Main configuration for Retro-Darkroom
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upload decoding and transport encoding
    pub upload: UploadConfig,

    /// Vintage film values used when a request leaves a parameter out
    pub vintage: FilterParameters,

    /// Parallel pixel processing
    pub processing: ProcessingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    ///
    /// Vintage defaults are not checked here; like request parameters they
    /// are clamped when used.
    pub fn validate(&self) -> Result<()> {
        self.upload.validate()?;
        self.processing.validate()?;
        Ok(())
    }
}

/// Upload and encoding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Uploads larger than this on either side are shrunk to fit
    pub max_dimension: u32,

    /// JPEG quality for previews and downloads (1-100)
    pub jpeg_quality: u8,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_dimension: 1200,
            jpeg_quality: 85,
        }
    }
}

impl UploadConfig {
    fn validate(&self) -> Result<()> {
        if self.max_dimension == 0 {
            return Err(ConfigError::InvalidValue {
                key: "upload.max_dimension".to_string(),
                value: self.max_dimension.to_string(),
            }
            .into());
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::InvalidValue {
                key: "upload.jpeg_quality".to_string(),
                value: self.jpeg_quality.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Thread settings for per-pixel work
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of worker threads for parallel pixel loops
    pub threads: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
        }
    }
}

impl ProcessingConfig {
    fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(ConfigError::InvalidValue {
                key: "processing.threads".to_string(),
                value: self.threads.to_string(),
            }
            .into());
        }
        Ok(())
    }
}
