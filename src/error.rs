use thiserror::Error;

/// Main error type for the Retro-Darkroom library
///
/// The filter engine itself never fails: unknown filters pass the image
/// through and parameters are clamped. Everything here comes from the
/// session layer around it.
#[derive(Error, Debug)]
pub enum DarkroomError {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Upload, lookup and transport errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Image not found: {id}")]
    ImageNotFound { id: String },

    #[error("Failed to decode uploaded image: {reason}")]
    DecodeFailed { reason: String },

    #[error("Failed to encode image: {reason}")]
    EncodeFailed { reason: String },

    #[error("Invalid image data: {reason}")]
    InvalidImageData { reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using DarkroomError
pub type Result<T> = std::result::Result<T, DarkroomError>;

impl DarkroomError {
    /// True when the error means the caller asked for something that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Session(SessionError::ImageNotFound { .. }))
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Session(SessionError::ImageNotFound { .. }) => "Image not found".to_string(),
            Self::Session(SessionError::DecodeFailed { .. }) => {
                "Could not read the uploaded file. Please upload a JPEG or PNG image.".to_string()
            }
            Self::Session(SessionError::InvalidImageData { .. }) => "Invalid image data".to_string(),
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let err: DarkroomError = SessionError::ImageNotFound { id: "abc".into() }.into();
        assert!(err.is_not_found());
        assert_eq!(err.user_message(), "Image not found");

        let err: DarkroomError = SessionError::DecodeFailed { reason: "bad header".into() }.into();
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_display_nests_source() {
        let err: DarkroomError = ConfigError::InvalidValue {
            key: "upload.jpeg_quality".into(),
            value: "0".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid configuration value: upload.jpeg_quality = 0"
        );
    }
}
