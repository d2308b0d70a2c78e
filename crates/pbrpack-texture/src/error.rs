//! Error types for the texture stage.

use pbrpack_spec::{BackendError, TextureRole};
use std::path::PathBuf;
use thiserror::Error;

use crate::png::PngError;

/// Result type for texture operations.
pub type TextureResult<T> = Result<T, TextureError>;

/// Errors that can occur while synthesizing, decoding, packing or writing textures.
#[derive(Debug, Error)]
pub enum TextureError {
    /// Failed to read a source image.
    #[error("Failed to read image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file is not a decodable raster image.
    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// PNG encoding failed.
    #[error("Failed to write PNG {path}: {source}")]
    Png {
        path: PathBuf,
        #[source]
        source: PngError,
    },

    /// Encoding to a non-PNG format failed.
    #[error("Failed to write image {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to create the parent directory of an output image.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A channel referenced a map that was not supplied.
    #[error("Referenced map '{0}' not found")]
    MissingMap(TextureRole),

    /// Buffer sizes do not line up.
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

impl BackendError for TextureError {
    fn code(&self) -> &'static str {
        match self {
            TextureError::Read { .. } => "TEXTURE_001",
            TextureError::Decode { .. } => "TEXTURE_002",
            TextureError::Png { .. } => "TEXTURE_003",
            TextureError::Save { .. } => "TEXTURE_004",
            TextureError::CreateDir { .. } => "TEXTURE_005",
            TextureError::MissingMap(_) => "TEXTURE_006",
            TextureError::InvalidDimensions(_) => "TEXTURE_007",
        }
    }

    fn category(&self) -> &'static str {
        "texture"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TextureError::MissingMap(TextureRole::Roughness);
        assert_eq!(err.to_string(), "Referenced map 'roughness' not found");
        assert_eq!(err.code(), "TEXTURE_006");

        let err = TextureError::Read {
            path: PathBuf::from("in/metal.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("in/metal.png"));
        assert_eq!(err.category(), "texture");
    }
}
