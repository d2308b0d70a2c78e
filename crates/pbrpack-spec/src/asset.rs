//! Conversion requests and resolved assets.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::role::{TextureMap, TextureRole};

/// One conversion request: a geometry file, whatever textures upstream
/// produced, and an optional output path.
///
/// # Example
///
/// ```
/// use pbrpack_spec::{ConvertRequest, TextureRole};
///
/// let request = ConvertRequest::from_json(r#"{
///     "geometry": "out/crate.obj",
///     "textures": { "albedo": "out/crate_albedo.png" }
/// }"#).unwrap();
///
/// assert!(request.textures.contains(TextureRole::Albedo));
/// assert!(request.output.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvertRequest {
    /// Geometry file understood by the mesh loader.
    pub geometry: PathBuf,
    /// Texture paths keyed by role. Any role may be missing.
    #[serde(default)]
    pub textures: TextureMap,
    /// Desired container path. Empty or placeholder values are replaced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl ConvertRequest {
    /// Create a request with no textures and no output path.
    pub fn new(geometry: impl Into<PathBuf>) -> Self {
        Self {
            geometry: geometry.into(),
            textures: TextureMap::new(),
            output: None,
        }
    }

    /// Set a texture path.
    pub fn texture(mut self, role: TextureRole, path: impl Into<PathBuf>) -> Self {
        self.textures.insert(role, path);
        self
    }

    /// Set the desired output path.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Parse a request from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a request file.
    pub fn from_file(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path).map_err(|source| SpecError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }
}

/// Where a resolved texture came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleOrigin {
    /// Supplied by the caller and present on disk.
    Supplied,
    /// Found by the directory-scan collaborator.
    Discovered,
    /// Written as a flat synthetic image.
    Synthesized,
    /// Produced by the channel packer.
    Packed,
}

/// Fully resolved conversion input.
///
/// Albedo, metallic, roughness and metallicRoughness are always present and
/// exist on disk. Normal and ao are present only if the caller supplied an
/// existing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAsset {
    geometry: PathBuf,
    textures: TextureMap,
    output: PathBuf,
    work_dir: PathBuf,
    origins: BTreeMap<TextureRole, RoleOrigin>,
}

impl ResolvedAsset {
    /// Assemble a resolved asset.
    pub fn new(
        geometry: PathBuf,
        textures: TextureMap,
        output: PathBuf,
        work_dir: PathBuf,
        origins: BTreeMap<TextureRole, RoleOrigin>,
    ) -> Self {
        Self {
            geometry,
            textures,
            output,
            work_dir,
            origins,
        }
    }

    /// Geometry file path.
    pub fn geometry(&self) -> &Path {
        &self.geometry
    }

    /// Completed texture map.
    pub fn textures(&self) -> &TextureMap {
        &self.textures
    }

    /// Output container path.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Working directory that received synthetic and packed images.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Origin of a resolved role.
    pub fn origin(&self, role: TextureRole) -> Option<RoleOrigin> {
        self.origins.get(&role).copied()
    }

    /// All role origins in role order.
    pub fn origins(&self) -> &BTreeMap<TextureRole, RoleOrigin> {
        &self.origins
    }

    /// Returns true if every required role is present.
    pub fn is_complete(&self) -> bool {
        TextureRole::REQUIRED
            .iter()
            .all(|role| self.textures.contains(*role))
    }
}
