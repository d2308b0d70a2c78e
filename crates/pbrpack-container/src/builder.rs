//! Container assembly: geometry, embedded textures and one PBR material.
//!
//! Textures are embedded in a fixed order (albedo, metallicRoughness, normal,
//! ao). Each embedded image gets exactly one texture with the same index, so
//! the material references texture `i` for the `i`-th embedded image. Roles
//! whose file is absent are skipped and leave no gap.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use gltf::json;
use json::material::{NormalTexture, OcclusionTexture, PbrMetallicRoughness, StrengthFactor};
use json::texture::Info;
use json::Index;
use log::{debug, info};
use pbrpack_spec::{ResolvedAsset, TextureMap, TextureRole};

use crate::embed::data_uri_for;
use crate::error::{ContainerError, ContainerResult};
use crate::geometry::{encode_geometry, Container};
use crate::mesh::{AutoLoader, MeshLoader};

/// Name given to the single material of every container.
pub const MATERIAL_NAME: &str = "PBR_Material";

/// Default `asset.generator` string.
pub fn default_generator() -> String {
    format!("pbrpack {}", env!("CARGO_PKG_VERSION"))
}

/// Builds binary glTF containers from geometry plus a texture map.
#[derive(Debug, Clone)]
pub struct ContainerBuilder<L = AutoLoader> {
    loader: L,
    generator: String,
}

impl ContainerBuilder<AutoLoader> {
    /// Builder that picks the geometry loader by file extension.
    pub fn new() -> Self {
        Self::with_loader(AutoLoader)
    }
}

impl Default for ContainerBuilder<AutoLoader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: MeshLoader> ContainerBuilder<L> {
    pub fn with_loader(loader: L) -> Self {
        Self {
            loader,
            generator: default_generator(),
        }
    }

    /// Overrides the `asset.generator` string.
    pub fn generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Build the container in memory.
    ///
    /// Only the embedded roles of `textures` are used; metallic and roughness
    /// source maps must already be packed into `MetallicRoughness`.
    pub fn assemble(&self, geometry: &Path, textures: &TextureMap) -> ContainerResult<Container> {
        let mesh = self.loader.load(geometry)?;
        debug!(
            "loaded {}: {} primitives, {} vertices, {} triangles",
            geometry.display(),
            mesh.primitives.len(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        let mut container = encode_geometry(&mesh, &self.generator)?;
        let bound = embed_textures(&mut container.root, textures)?;
        let material = container.root.push(pbr_material(&bound));
        bind_material(&mut container.root, material);
        Ok(container)
    }

    /// Build the container and write it to `output` as GLB.
    ///
    /// The file is written to a temporary sibling and renamed into place, so
    /// an existing `output` is either fully replaced or left untouched.
    pub fn build(
        &self,
        geometry: &Path,
        textures: &TextureMap,
        output: &Path,
    ) -> ContainerResult<PathBuf> {
        let container = self.assemble(geometry, textures)?;
        let bytes = container.to_glb()?;
        write_atomically(output, &bytes)?;

        info!(
            "wrote {} ({} bytes, {} images)",
            output.display(),
            bytes.len(),
            container.root.images.len()
        );
        Ok(output.to_path_buf())
    }

    /// Build the container described by a resolved asset.
    pub fn build_resolved(&self, asset: &ResolvedAsset) -> ContainerResult<PathBuf> {
        self.build(asset.geometry(), asset.textures(), asset.output())
    }
}

/// Embed each present role as an image and texture, returning role to texture index.
pub fn embed_textures(
    root: &mut json::Root,
    textures: &TextureMap,
) -> ContainerResult<BTreeMap<TextureRole, Index<json::Texture>>> {
    let mut bound = BTreeMap::new();
    for role in TextureRole::EMBEDDED {
        let Some(path) = textures.existing(role) else {
            debug!("no {} texture to embed", role);
            continue;
        };
        let image = root.push(json::Image {
            buffer_view: None,
            mime_type: None,
            name: None,
            uri: Some(data_uri_for(path)?),
            extensions: Default::default(),
            extras: Default::default(),
        });
        let texture = root.push(json::Texture {
            name: None,
            sampler: None,
            source: image,
            extensions: Default::default(),
            extras: Default::default(),
        });
        debug!("embedded {} as image {} ({})", role, image, path.display());
        bound.insert(role, texture);
    }
    Ok(bound)
}

fn texture_info(index: Index<json::Texture>) -> Info {
    Info {
        index,
        tex_coord: 0,
        extensions: Default::default(),
        extras: Default::default(),
    }
}

/// The single metallic-roughness material, wired to whichever textures exist.
///
/// Factors stay at the glTF defaults (opaque white, metallic and roughness
/// 1.0) so the textures alone carry the surface response.
pub fn pbr_material(bound: &BTreeMap<TextureRole, Index<json::Texture>>) -> json::Material {
    let texture = |role: TextureRole| bound.get(&role).copied();
    json::Material {
        name: Some(MATERIAL_NAME.to_string()),
        pbr_metallic_roughness: PbrMetallicRoughness {
            base_color_texture: texture(TextureRole::Albedo).map(texture_info),
            metallic_roughness_texture: texture(TextureRole::MetallicRoughness)
                .map(texture_info),
            ..Default::default()
        },
        normal_texture: texture(TextureRole::Normal).map(|index| NormalTexture {
            index,
            scale: 1.0,
            tex_coord: 0,
            extensions: Default::default(),
            extras: Default::default(),
        }),
        occlusion_texture: texture(TextureRole::Ao).map(|index| OcclusionTexture {
            index,
            strength: StrengthFactor(1.0),
            tex_coord: 0,
            extensions: Default::default(),
            extras: Default::default(),
        }),
        ..Default::default()
    }
}

/// Point every primitive of mesh 0 at `material`.
pub fn bind_material(root: &mut json::Root, material: Index<json::Material>) {
    if let Some(mesh) = root.meshes.first_mut() {
        for primitive in &mut mesh.primitives {
            primitive.material = Some(material);
        }
    }
}

fn write_atomically(output: &Path, bytes: &[u8]) -> ContainerResult<()> {
    let write_error = |source: std::io::Error| ContainerError::Write {
        path: output.to_path_buf(),
        source,
    };

    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_error)?;

    let mut file = tempfile::NamedTempFile::new_in(parent).map_err(write_error)?;
    file.write_all(bytes).map_err(write_error)?;
    file.flush().map_err(write_error)?;
    file.persist(output).map_err(|e| write_error(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use json::validation::Checked;
    use pretty_assertions::assert_eq;

    fn index(i: u32) -> Index<json::Texture> {
        Index::new(i)
    }

    #[test]
    fn test_material_full() {
        let bound = BTreeMap::from([
            (TextureRole::Albedo, index(0)),
            (TextureRole::MetallicRoughness, index(1)),
            (TextureRole::Normal, index(2)),
            (TextureRole::Ao, index(3)),
        ]);
        let material = pbr_material(&bound);
        assert_eq!(material.name.as_deref(), Some(MATERIAL_NAME));

        let pbr = &material.pbr_metallic_roughness;
        assert_eq!(pbr.base_color_factor.0, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(pbr.metallic_factor.0, 1.0);
        assert_eq!(pbr.roughness_factor.0, 1.0);
        assert_eq!(pbr.base_color_texture.as_ref().map(|t| t.index), Some(index(0)));
        assert_eq!(
            pbr.metallic_roughness_texture.as_ref().map(|t| t.index),
            Some(index(1))
        );
        assert_eq!(material.normal_texture.as_ref().map(|t| t.index), Some(index(2)));
        assert_eq!(material.occlusion_texture.as_ref().map(|t| t.index), Some(index(3)));
        assert!(matches!(
            material.alpha_mode,
            Checked::Valid(json::material::AlphaMode::Opaque)
        ));
    }

    #[test]
    fn test_material_json_layout() {
        let bound = BTreeMap::from([
            (TextureRole::Albedo, index(0)),
            (TextureRole::MetallicRoughness, index(1)),
            (TextureRole::Normal, index(2)),
        ]);
        let value = serde_json::to_value(pbr_material(&bound)).unwrap();
        assert_eq!(value["name"], "PBR_Material");
        assert_eq!(
            value["pbrMetallicRoughness"]["baseColorFactor"],
            serde_json::json!([1.0, 1.0, 1.0, 1.0])
        );
        assert_eq!(value["pbrMetallicRoughness"]["baseColorTexture"]["index"], 0);
        assert_eq!(
            value["pbrMetallicRoughness"]["metallicRoughnessTexture"]["index"],
            1
        );
        assert_eq!(value["normalTexture"]["index"], 2);
        assert!(value.get("occlusionTexture").is_none());
    }

    #[test]
    fn test_material_without_textures() {
        let material = pbr_material(&BTreeMap::new());
        let pbr = &material.pbr_metallic_roughness;
        assert!(pbr.base_color_texture.is_none());
        assert!(pbr.metallic_roughness_texture.is_none());
        assert!(material.normal_texture.is_none());
        assert!(material.occlusion_texture.is_none());
    }

    #[test]
    fn test_embed_skips_missing_without_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let albedo = dir.path().join("albedo.jpg");
        let normal = dir.path().join("normal.png");
        std::fs::write(&albedo, b"jpeg-bytes").unwrap();
        std::fs::write(&normal, b"png-bytes").unwrap();

        let textures = TextureMap::new()
            .with(TextureRole::Albedo, &albedo)
            .with(TextureRole::MetallicRoughness, dir.path().join("absent.png"))
            .with(TextureRole::Normal, &normal);

        let mut root = json::Root::default();
        let bound = embed_textures(&mut root, &textures).unwrap();

        assert_eq!(root.images.len(), 2);
        assert_eq!(root.textures.len(), 2);
        assert_eq!(bound.get(&TextureRole::Albedo), Some(&index(0)));
        assert_eq!(bound.get(&TextureRole::Normal), Some(&index(1)));
        assert!(!bound.contains_key(&TextureRole::MetallicRoughness));
        assert!(root.images[0]
            .uri
            .as_deref()
            .unwrap()
            .starts_with("data:image/jpeg;base64,"));
        assert_eq!(root.textures[1].source.value(), 1);
    }

    #[test]
    fn test_embed_ignores_source_maps() {
        let dir = tempfile::tempdir().unwrap();
        let metallic = dir.path().join("m.png");
        std::fs::write(&metallic, b"m").unwrap();

        let textures = TextureMap::new().with(TextureRole::Metallic, &metallic);
        let mut root = json::Root::default();
        let bound = embed_textures(&mut root, &textures).unwrap();
        assert!(bound.is_empty());
        assert!(root.images.is_empty());
    }

    #[test]
    fn test_write_atomically_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/out.glb");
        write_atomically(&out, b"first").unwrap();
        write_atomically(&out, b"second").unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), b"second");

        let leftovers = std::fs::read_dir(out.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1, "no temporary files should remain");
    }
}
