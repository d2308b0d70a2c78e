//! Error types for the container stage.

use pbrpack_spec::BackendError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for container operations.
pub type ContainerResult<T> = Result<T, ContainerError>;

/// Errors that can occur while loading geometry or writing a container.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Geometry file could not be opened.
    #[error("Failed to read geometry {path}: {source}")]
    ReadGeometry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Geometry extension has no loader.
    #[error("Unsupported geometry format '{extension}' for {path} (expected obj, gltf or glb)")]
    UnsupportedGeometry { path: PathBuf, extension: String },

    /// OBJ parse failure.
    #[error("Failed to parse OBJ {path}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    /// glTF/GLB parse failure.
    #[error("Failed to parse glTF {path}: {source}")]
    Gltf {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },

    /// Geometry parsed but held no triangle primitives.
    #[error("Geometry {path} contains no triangle primitives")]
    EmptyMesh { path: PathBuf },

    /// Geometry data is internally inconsistent.
    #[error("Invalid geometry in {path}: {message}")]
    InvalidGeometry { path: PathBuf, message: String },

    /// Texture image could not be read for embedding.
    #[error("Failed to read image {path}: {source}")]
    ReadImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Binary buffer exceeds the 4 GiB GLB limit.
    #[error("Binary buffer of {0} bytes exceeds the GLB size limit")]
    BufferTooLarge(usize),

    /// GLB chunk framing failed.
    #[error("Failed to frame GLB: {0}")]
    Frame(#[source] gltf::Error),

    /// JSON chunk serialization failed.
    #[error("Failed to serialize glTF JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to write the output container.
    #[error("Failed to write container {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Existing container could not be parsed for inspection.
    #[error("Failed to inspect container {path}: {message}")]
    Inspect { path: PathBuf, message: String },

    /// IO error during in-memory encoding.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContainerError {
    /// Creates a new invalid geometry error.
    pub fn invalid_geometry(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl BackendError for ContainerError {
    fn code(&self) -> &'static str {
        match self {
            ContainerError::ReadGeometry { .. } => "CONTAINER_001",
            ContainerError::UnsupportedGeometry { .. } => "CONTAINER_002",
            ContainerError::Obj { .. } => "CONTAINER_003",
            ContainerError::Gltf { .. } => "CONTAINER_004",
            ContainerError::EmptyMesh { .. } => "CONTAINER_005",
            ContainerError::InvalidGeometry { .. } => "CONTAINER_006",
            ContainerError::ReadImage { .. } => "CONTAINER_007",
            ContainerError::BufferTooLarge(_) => "CONTAINER_008",
            ContainerError::Serialize(_) => "CONTAINER_009",
            ContainerError::Write { .. } => "CONTAINER_010",
            ContainerError::Inspect { .. } => "CONTAINER_011",
            ContainerError::Io(_) => "CONTAINER_012",
            ContainerError::Frame(_) => "CONTAINER_013",
        }
    }

    fn category(&self) -> &'static str {
        "container"
    }
}
