//! Error types shared across pbrpack crates.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading requests and configuration.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Failed to read a configuration or request file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown texture role name.
    #[error("Unknown texture role '{0}' (expected albedo, metallic, roughness, normal, ao or metallicRoughness)")]
    UnknownRole(String),
}

impl BackendError for SpecError {
    fn code(&self) -> &'static str {
        match self {
            SpecError::Read { .. } => "SPEC_001",
            SpecError::Json(_) => "SPEC_002",
            SpecError::UnknownRole(_) => "SPEC_003",
        }
    }

    fn category(&self) -> &'static str {
        "spec"
    }
}

/// Common trait for stage errors.
///
/// Every pbrpack error type implements this trait so the CLI can report a
/// stable code next to the message.
///
/// # Example
///
/// ```ignore
/// use pbrpack_spec::error::BackendError;
///
/// fn handle_error<E: BackendError>(err: E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "TEXTURE_001" or "CONTAINER_004".
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    ///
    /// Returns a category like "texture", "container", "resolve".
    fn category(&self) -> &'static str;
}
