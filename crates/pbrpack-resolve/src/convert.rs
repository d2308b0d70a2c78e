//! The full conversion pipeline: resolve, pack, build.

use std::collections::BTreeMap;
use std::path::PathBuf;

use log::info;
use pbrpack_container::{ContainerBuilder, MeshLoader};
use pbrpack_spec::{ConvertConfig, ConvertRequest, ResolvedAsset, RoleOrigin, TextureMap, TextureRole};
use serde::Serialize;

use crate::discovery::{GlobDiscovery, TextureDiscovery};
use crate::error::{ResolveError, ResolveResult};
use crate::resolver::AssetResolver;

/// Outcome of one conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionReport {
    pub geometry: PathBuf,
    pub output: PathBuf,
    pub work_dir: PathBuf,
    pub textures: TextureMap,
    pub origins: BTreeMap<TextureRole, RoleOrigin>,
    /// Size of the written container in bytes.
    pub size: u64,
    /// BLAKE3 hex digest of the written container.
    pub blake3: String,
}

impl ConversionReport {
    /// Roles that had to be synthesized.
    pub fn synthesized(&self) -> Vec<TextureRole> {
        self.roles_with(RoleOrigin::Synthesized)
    }

    /// Roles found by directory discovery.
    pub fn discovered(&self) -> Vec<TextureRole> {
        self.roles_with(RoleOrigin::Discovered)
    }

    fn roles_with(&self, origin: RoleOrigin) -> Vec<TextureRole> {
        self.origins
            .iter()
            .filter(|(_, o)| **o == origin)
            .map(|(role, _)| *role)
            .collect()
    }
}

/// Convert one request with the default discovery and geometry loaders.
pub fn convert(request: &ConvertRequest, config: &ConvertConfig) -> ResolveResult<ConversionReport> {
    Converter::new(config.clone()).convert(request)
}

/// Resolver and container builder wired together.
#[derive(Debug, Clone)]
pub struct Converter<D = GlobDiscovery, L = pbrpack_container::AutoLoader> {
    resolver: AssetResolver<D>,
    builder: ContainerBuilder<L>,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        Self {
            resolver: AssetResolver::new(config),
            builder: ContainerBuilder::new(),
        }
    }
}

impl<D: TextureDiscovery, L: MeshLoader> Converter<D, L> {
    pub fn from_parts(resolver: AssetResolver<D>, builder: ContainerBuilder<L>) -> Self {
        Self { resolver, builder }
    }

    /// Resolve the request's inputs without building anything.
    pub fn resolve(&self, request: &ConvertRequest) -> ResolveResult<ResolvedAsset> {
        self.resolver.resolve(
            &request.geometry,
            &request.textures,
            request.output.as_deref(),
        )
    }

    /// Resolve, pack and write the container.
    pub fn convert(&self, request: &ConvertRequest) -> ResolveResult<ConversionReport> {
        let asset = self.resolve(request)?;
        let output = self.builder.build_resolved(&asset)?;

        let bytes = std::fs::read(&output).map_err(|source| ResolveError::ReadOutput {
            path: output.clone(),
            source,
        })?;
        let report = ConversionReport {
            geometry: asset.geometry().to_path_buf(),
            output,
            work_dir: asset.work_dir().to_path_buf(),
            textures: asset.textures().clone(),
            origins: asset.origins().clone(),
            size: bytes.len() as u64,
            blake3: blake3::hash(&bytes).to_hex().to_string(),
        };

        info!(
            "converted {} -> {} ({} synthesized, {} discovered)",
            report.geometry.display(),
            report.output.display(),
            report.synthesized().len(),
            report.discovered().len()
        );
        Ok(report)
    }
}
