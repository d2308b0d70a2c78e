//! Completing a partial texture map.
//!
//! Resolution never fails because an input is missing. Metallic and roughness
//! fall back to discovery, then to synthesis; albedo falls back to synthesis.
//! Normal and occlusion are optional and dropped when their file is absent.
//! The metallic-roughness map is always packed fresh from the final metallic
//! and roughness paths.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use pbrpack_spec::{ConvertConfig, ResolvedAsset, RoleOrigin, TextureMap, TextureRole};
use pbrpack_texture::{pack_metallic_roughness, synthesize_flat};

use crate::discovery::{GlobDiscovery, TextureDiscovery};
use crate::error::ResolveResult;
use crate::workdir::{parent_or_current, resolve_output, resolve_work_dir, safe_base_name};

/// Turns a geometry path plus partial texture map into a [`ResolvedAsset`].
#[derive(Debug, Clone)]
pub struct AssetResolver<D = GlobDiscovery> {
    config: ConvertConfig,
    discovery: D,
}

impl AssetResolver<GlobDiscovery> {
    pub fn new(config: ConvertConfig) -> Self {
        Self::with_discovery(config, GlobDiscovery)
    }
}

impl<D: TextureDiscovery> AssetResolver<D> {
    /// Resolver with a custom discovery strategy.
    pub fn with_discovery(config: ConvertConfig, discovery: D) -> Self {
        Self { config, discovery }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Resolve every required role and the output path.
    ///
    /// The input map is left untouched; the returned asset carries a new map
    /// holding albedo, metallic, roughness and metallicRoughness, plus normal
    /// and ao when supplied files exist.
    pub fn resolve(
        &self,
        geometry: &Path,
        textures: &TextureMap,
        output: Option<&Path>,
    ) -> ResolveResult<ResolvedAsset> {
        let config = &self.config;
        let work_dir = resolve_work_dir(geometry, textures, config)?;
        let base_name = safe_base_name(geometry, &config.fallback_base_name);
        let output = resolve_output(output, &work_dir, &base_name, &config.container_extension);
        debug!("output container {}", output.display());

        let mut resolved = TextureMap::new();
        let mut origins = BTreeMap::new();

        let discovery_dir = self.discovery_dir(geometry, textures);
        let mut sources = Vec::with_capacity(2);
        for role in [TextureRole::Metallic, TextureRole::Roughness] {
            let (path, origin) = match textures.existing(role) {
                Some(path) => (path.to_path_buf(), RoleOrigin::Supplied),
                None => match self.discover(role, &discovery_dir) {
                    Some(path) => (path, RoleOrigin::Discovered),
                    None => (self.synthesize(role, &work_dir)?, RoleOrigin::Synthesized),
                },
            };
            resolved.insert(role, &path);
            origins.insert(role, origin);
            sources.push(path);
        }

        let (albedo, origin) = match textures.existing(TextureRole::Albedo) {
            Some(path) => (path.to_path_buf(), RoleOrigin::Supplied),
            None => (
                self.synthesize(TextureRole::Albedo, &work_dir)?,
                RoleOrigin::Synthesized,
            ),
        };
        resolved.insert(TextureRole::Albedo, albedo);
        origins.insert(TextureRole::Albedo, origin);

        for role in [TextureRole::Normal, TextureRole::Ao] {
            match (textures.get(role), textures.existing(role)) {
                (_, Some(path)) => {
                    resolved.insert(role, path);
                    origins.insert(role, RoleOrigin::Supplied);
                }
                (Some(missing), None) => {
                    warn!("dropping {} texture {}: file not found", role, missing.display());
                }
                (None, None) => {}
            }
        }

        if textures.contains(TextureRole::MetallicRoughness) {
            debug!("supplied metallicRoughness map is replaced by a freshly packed one");
        }
        let packed = pack_metallic_roughness(
            &sources[0],
            &sources[1],
            &work_dir.join(&config.packed_file_name),
        )?;
        resolved.insert(TextureRole::MetallicRoughness, packed);
        origins.insert(TextureRole::MetallicRoughness, RoleOrigin::Packed);

        Ok(ResolvedAsset::new(
            geometry.to_path_buf(),
            resolved,
            output,
            work_dir,
            origins,
        ))
    }

    /// Directory scanned for metallic and roughness candidates.
    fn discovery_dir(&self, geometry: &Path, textures: &TextureMap) -> PathBuf {
        let anchor = textures
            .get(TextureRole::Metallic)
            .or_else(|| textures.get(TextureRole::Roughness))
            .unwrap_or(geometry);
        parent_or_current(anchor)
    }

    fn discover(&self, role: TextureRole, dir: &Path) -> Option<PathBuf> {
        if !self.config.discover {
            return None;
        }
        self.discovery.discover(role, dir)
    }

    fn synthesize(&self, role: TextureRole, work_dir: &Path) -> ResolveResult<PathBuf> {
        let intensity = self.config.synthetic_intensity(role).unwrap_or(128);
        let path = work_dir.join(self.config.synthetic_file_name(role));
        Ok(synthesize_flat(&path, intensity, self.config.synthetic_size)?)
    }
}
