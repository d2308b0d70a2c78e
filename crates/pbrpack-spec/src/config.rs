//! Conversion configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::role::TextureRole;

/// Default side length of synthetic textures.
pub const DEFAULT_SYNTHETIC_SIZE: u32 = 1024;

/// Settings for one conversion run.
///
/// Every field has a default, so `{}` is a valid configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvertConfig {
    /// Explicit working directory. When set, detection is skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,
    /// Root whose `temp` subdirectory is the last detection candidate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_root: Option<PathBuf>,
    /// Side length of synthetic square textures.
    #[serde(default = "default_synthetic_size")]
    pub synthetic_size: u32,
    /// Intensity of a synthetic metallic map (0 = dielectric).
    #[serde(default)]
    pub metallic_intensity: u8,
    /// Intensity of a synthetic roughness map.
    #[serde(default = "default_mid_gray")]
    pub roughness_intensity: u8,
    /// Intensity of a synthetic albedo map.
    #[serde(default = "default_mid_gray")]
    pub albedo_intensity: u8,
    /// File name of the packed metallic-roughness map inside the working directory.
    #[serde(default = "default_packed_file_name")]
    pub packed_file_name: String,
    /// Extension of the output container.
    #[serde(default = "default_container_extension")]
    pub container_extension: String,
    /// Base name used when the geometry stem is unusable.
    #[serde(default = "default_fallback_base_name")]
    pub fallback_base_name: String,
    /// Scan directories for `*_metallic.*` / `*_roughness.*` when inputs are missing.
    #[serde(default = "default_true")]
    pub discover: bool,
}

pub(crate) fn default_synthetic_size() -> u32 {
    DEFAULT_SYNTHETIC_SIZE
}

pub(crate) fn default_mid_gray() -> u8 {
    128
}

pub(crate) fn default_packed_file_name() -> String {
    "mr_combined.png".to_string()
}

pub(crate) fn default_container_extension() -> String {
    "glb".to_string()
}

pub(crate) fn default_fallback_base_name() -> String {
    "asset".to_string()
}

pub(crate) fn default_true() -> bool {
    true
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            work_dir: None,
            search_root: None,
            synthetic_size: default_synthetic_size(),
            metallic_intensity: 0,
            roughness_intensity: default_mid_gray(),
            albedo_intensity: default_mid_gray(),
            packed_file_name: default_packed_file_name(),
            container_extension: default_container_extension(),
            fallback_base_name: default_fallback_base_name(),
            discover: default_true(),
        }
    }
}

impl ConvertConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path).map_err(|source| SpecError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Intensity written when a role has to be synthesized.
    ///
    /// Only albedo, metallic and roughness are ever synthesized.
    pub fn synthetic_intensity(&self, role: TextureRole) -> Option<u8> {
        match role {
            TextureRole::Albedo => Some(self.albedo_intensity),
            TextureRole::Metallic => Some(self.metallic_intensity),
            TextureRole::Roughness => Some(self.roughness_intensity),
            _ => None,
        }
    }

    /// Default file name for a synthetic texture of the given role.
    pub fn synthetic_file_name(&self, role: TextureRole) -> String {
        format!("_{}.png", role.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_json_is_default() {
        let config = ConvertConfig::from_json("{}").unwrap();
        assert_eq!(config, ConvertConfig::default());
        assert_eq!(config.synthetic_size, 1024);
        assert_eq!(config.roughness_intensity, 128);
        assert_eq!(config.metallic_intensity, 0);
        assert!(config.discover);
    }

    #[test]
    fn test_partial_override() {
        let config =
            ConvertConfig::from_json(r#"{"synthetic_size": 16, "work_dir": "build/tmp"}"#).unwrap();
        assert_eq!(config.synthetic_size, 16);
        assert_eq!(config.work_dir, Some(PathBuf::from("build/tmp")));
        assert_eq!(config.packed_file_name, "mr_combined.png");
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(ConvertConfig::from_json(r#"{"mipmaps": true}"#).is_err());
    }

    #[test]
    fn test_synthetic_intensities() {
        let config = ConvertConfig::default();
        assert_eq!(config.synthetic_intensity(TextureRole::Metallic), Some(0));
        assert_eq!(config.synthetic_intensity(TextureRole::Roughness), Some(128));
        assert_eq!(config.synthetic_intensity(TextureRole::Albedo), Some(128));
        assert_eq!(config.synthetic_intensity(TextureRole::Normal), None);
        assert_eq!(
            config.synthetic_file_name(TextureRole::Metallic),
            "_metallic.png"
        );
    }
}
