//! Read-back summaries of written containers.
//!
//! Parsing goes through the `gltf` crate rather than our own document model,
//! so a summary doubles as an independent validity check.

use std::path::Path;

use serde::Serialize;

use crate::embed::decode_data_uri;
use crate::error::{ContainerError, ContainerResult};

/// One image of a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSummary {
    pub index: usize,
    /// MIME type from the data URI or the `mimeType` field.
    pub mime_type: Option<String>,
    /// True if the image bytes live inside the container.
    pub embedded: bool,
    /// Decoded payload size for embedded images.
    pub byte_length: Option<usize>,
}

/// Texture indices referenced by a material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialSummary {
    pub index: usize,
    pub name: Option<String>,
    pub base_color_factor: [f32; 4],
    pub metallic_factor: f32,
    pub roughness_factor: f32,
    pub base_color_texture: Option<usize>,
    pub metallic_roughness_texture: Option<usize>,
    pub normal_texture: Option<usize>,
    pub occlusion_texture: Option<usize>,
}

/// What a container holds, as seen by an independent glTF reader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerSummary {
    pub generator: Option<String>,
    pub mesh_count: usize,
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub images: Vec<ImageSummary>,
    /// Image index behind each texture.
    pub texture_sources: Vec<usize>,
    pub materials: Vec<MaterialSummary>,
    /// Material index of each primitive of mesh 0.
    pub primitive_materials: Vec<Option<usize>>,
}

/// Decoded bytes of image `index` in a GLB or glTF byte stream.
pub fn embedded_image_bytes(data: &[u8], index: usize) -> Option<Vec<u8>> {
    let gltf = gltf::Gltf::from_slice(data).ok()?;
    let image = gltf.document.images().nth(index)?;
    match image.source() {
        gltf::image::Source::Uri { uri, .. } => decode_data_uri(uri).map(|(_, bytes)| bytes),
        gltf::image::Source::View { view, .. } => {
            let blob = gltf.blob.as_ref()?;
            let start = view.offset();
            blob.get(start..start + view.length()).map(<[u8]>::to_vec)
        }
    }
}

/// Summarize the container at `path`.
pub fn inspect_container(path: &Path) -> ContainerResult<ContainerSummary> {
    let data = std::fs::read(path).map_err(|source| ContainerError::Inspect {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;
    inspect_bytes(&data).map_err(|message| ContainerError::Inspect {
        path: path.to_path_buf(),
        message,
    })
}

/// Summarize GLB or glTF JSON bytes.
pub fn inspect_bytes(data: &[u8]) -> Result<ContainerSummary, String> {
    let gltf = gltf::Gltf::from_slice(data).map_err(|e| e.to_string())?;
    let document = &gltf.document;

    let images = document
        .images()
        .map(|image| match image.source() {
            gltf::image::Source::Uri { uri, mime_type } => match decode_data_uri(uri) {
                Some((mime, bytes)) => ImageSummary {
                    index: image.index(),
                    mime_type: Some(mime),
                    embedded: true,
                    byte_length: Some(bytes.len()),
                },
                None => ImageSummary {
                    index: image.index(),
                    mime_type: mime_type.map(str::to_string),
                    embedded: false,
                    byte_length: None,
                },
            },
            gltf::image::Source::View { view, mime_type } => ImageSummary {
                index: image.index(),
                mime_type: Some(mime_type.to_string()),
                embedded: true,
                byte_length: Some(view.length()),
            },
        })
        .collect();

    let texture_sources = document
        .textures()
        .map(|texture| texture.source().index())
        .collect();

    let materials = document
        .materials()
        .filter_map(|material| {
            let index = material.index()?;
            let pbr = material.pbr_metallic_roughness();
            Some(MaterialSummary {
                index,
                name: material.name().map(str::to_string),
                base_color_factor: pbr.base_color_factor(),
                metallic_factor: pbr.metallic_factor(),
                roughness_factor: pbr.roughness_factor(),
                base_color_texture: pbr.base_color_texture().map(|t| t.texture().index()),
                metallic_roughness_texture: pbr
                    .metallic_roughness_texture()
                    .map(|t| t.texture().index()),
                normal_texture: material.normal_texture().map(|t| t.texture().index()),
                occlusion_texture: material.occlusion_texture().map(|t| t.texture().index()),
            })
        })
        .collect();

    let mut vertex_count = 0;
    let mut triangle_count = 0;
    for mesh in document.meshes() {
        for primitive in mesh.primitives() {
            let vertices = primitive
                .get(&gltf::Semantic::Positions)
                .map(|a| a.count())
                .unwrap_or(0);
            vertex_count += vertices;
            triangle_count += primitive
                .indices()
                .map(|a| a.count())
                .unwrap_or(vertices)
                / 3;
        }
    }

    let primitive_materials = document
        .meshes()
        .next()
        .map(|mesh| {
            mesh.primitives()
                .map(|p| p.material().index())
                .collect()
        })
        .unwrap_or_default();

    Ok(ContainerSummary {
        generator: document.as_json().asset.generator.clone(),
        mesh_count: document.meshes().len(),
        vertex_count,
        triangle_count,
        images,
        texture_sources,
        materials,
        primitive_materials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_garbage() {
        assert!(inspect_bytes(b"definitely not gltf").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = inspect_container(Path::new("nowhere/out.glb")).unwrap_err();
        assert!(matches!(err, ContainerError::Inspect { .. }));
    }
}
