//! Error types for asset resolution and conversion.

use pbrpack_container::ContainerError;
use pbrpack_spec::BackendError;
use pbrpack_texture::TextureError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors that can occur while resolving or converting an asset.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Working directory could not be created.
    #[error("Failed to create working directory {path}: {source}")]
    CreateWorkDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Synthesis or packing failed.
    #[error(transparent)]
    Texture(#[from] TextureError),

    /// Container build failed.
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// Written container could not be read back for the report.
    #[error("Failed to read output {path}: {source}")]
    ReadOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BackendError for ResolveError {
    fn code(&self) -> &'static str {
        match self {
            ResolveError::CreateWorkDir { .. } => "RESOLVE_001",
            ResolveError::Texture(e) => e.code(),
            ResolveError::Container(e) => e.code(),
            ResolveError::ReadOutput { .. } => "RESOLVE_002",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            ResolveError::Texture(e) => e.category(),
            ResolveError::Container(e) => e.category(),
            _ => "resolve",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_codes_pass_through() {
        let err: ResolveError = TextureError::InvalidDimensions("0x0".to_string()).into();
        assert!(err.code().starts_with("TEXTURE_"));
        assert_eq!(err.category(), "texture");

        let err = ResolveError::CreateWorkDir {
            path: PathBuf::from("/ro/temp"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        };
        assert_eq!(err.code(), "RESOLVE_001");
        assert!(err.to_string().contains("/ro/temp"));
    }
}
