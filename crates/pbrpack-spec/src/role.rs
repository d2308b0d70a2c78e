//! Texture roles and the role-keyed texture map.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Role a texture plays in the PBR material.
///
/// Declaration order is significant: the four embedded roles come first, in
/// the order their images and textures are appended to the container. The
/// derived `Ord` makes every `TextureMap` iterate in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextureRole {
    /// Base color map.
    Albedo,
    /// Combined map: R = occlusion slot, G = roughness, B = metallic.
    MetallicRoughness,
    /// Tangent-space normal map.
    Normal,
    /// Ambient occlusion map.
    Ao,
    /// Single-channel metallic map (packer input only).
    Metallic,
    /// Single-channel roughness map (packer input only).
    Roughness,
}

impl TextureRole {
    /// All roles, in declaration order.
    pub const ALL: [TextureRole; 6] = [
        TextureRole::Albedo,
        TextureRole::MetallicRoughness,
        TextureRole::Normal,
        TextureRole::Ao,
        TextureRole::Metallic,
        TextureRole::Roughness,
    ];

    /// Roles whose images end up inside the container, in embedding order.
    pub const EMBEDDED: [TextureRole; 4] = [
        TextureRole::Albedo,
        TextureRole::MetallicRoughness,
        TextureRole::Normal,
        TextureRole::Ao,
    ];

    /// Roles the resolver always materializes.
    pub const REQUIRED: [TextureRole; 4] = [
        TextureRole::Albedo,
        TextureRole::MetallicRoughness,
        TextureRole::Metallic,
        TextureRole::Roughness,
    ];

    /// Canonical name used in JSON requests and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextureRole::Albedo => "albedo",
            TextureRole::MetallicRoughness => "metallicRoughness",
            TextureRole::Normal => "normal",
            TextureRole::Ao => "ao",
            TextureRole::Metallic => "metallic",
            TextureRole::Roughness => "roughness",
        }
    }

    /// Returns true if images for this role are embedded in the container.
    pub fn is_embedded(&self) -> bool {
        Self::EMBEDDED.contains(self)
    }

    /// Returns true if the role may be absent after resolution.
    pub fn is_optional(&self) -> bool {
        matches!(self, TextureRole::Normal | TextureRole::Ao)
    }
}

impl fmt::Display for TextureRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextureRole {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "albedo" | "base_color" | "baseColor" => Ok(TextureRole::Albedo),
            "metallicRoughness" | "metallic_roughness" => Ok(TextureRole::MetallicRoughness),
            "normal" => Ok(TextureRole::Normal),
            "ao" | "occlusion" => Ok(TextureRole::Ao),
            "metallic" => Ok(TextureRole::Metallic),
            "roughness" => Ok(TextureRole::Roughness),
            other => Err(SpecError::UnknownRole(other.to_string())),
        }
    }
}

/// Mapping from texture role to file path.
///
/// At most one path per role. Iteration always follows [`TextureRole`]
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureMap {
    entries: BTreeMap<TextureRole, PathBuf>,
}

impl TextureMap {
    /// Create an empty texture map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, role: TextureRole, path: impl Into<PathBuf>) -> Self {
        self.insert(role, path);
        self
    }

    /// Set the path for a role, returning the previous one.
    ///
    /// Empty paths are treated as absent and remove the role.
    pub fn insert(&mut self, role: TextureRole, path: impl Into<PathBuf>) -> Option<PathBuf> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return self.entries.remove(&role);
        }
        self.entries.insert(role, path)
    }

    /// Remove a role.
    pub fn remove(&mut self, role: TextureRole) -> Option<PathBuf> {
        self.entries.remove(&role)
    }

    /// Path for a role, if any.
    pub fn get(&self, role: TextureRole) -> Option<&Path> {
        self.entries.get(&role).map(PathBuf::as_path)
    }

    /// Path for a role, only if the file exists on disk.
    pub fn existing(&self, role: TextureRole) -> Option<&Path> {
        self.get(role).filter(|p| p.is_file())
    }

    /// Returns true if a path is set for the role.
    pub fn contains(&self, role: TextureRole) -> bool {
        self.entries.contains_key(&role)
    }

    /// Number of roles with a path.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no role has a path.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in role order.
    pub fn iter(&self) -> impl Iterator<Item = (TextureRole, &Path)> {
        self.entries.iter().map(|(role, path)| (*role, path.as_path()))
    }

    /// Iterate over the embedded roles that have a path, in embedding order.
    pub fn embedded(&self) -> impl Iterator<Item = (TextureRole, &Path)> {
        self.iter().filter(|(role, _)| role.is_embedded())
    }
}

impl FromIterator<(TextureRole, PathBuf)> for TextureMap {
    fn from_iter<I: IntoIterator<Item = (TextureRole, PathBuf)>>(iter: I) -> Self {
        let mut map = TextureMap::new();
        for (role, path) in iter {
            map.insert(role, path);
        }
        map
    }
}
