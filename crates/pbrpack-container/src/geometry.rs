//! Encoding loaded meshes into a glTF document plus binary buffer.

use std::collections::BTreeMap;

use byteorder::{LittleEndian, WriteBytesExt};
use gltf::json;
use json::accessor::{ComponentType, GenericComponentType, Type as AccessorType};
use json::buffer::Target;
use json::mesh::{Mode, Primitive, Semantic};
use json::validation::{Checked, USize64};
use json::Index;

use crate::error::{ContainerError, ContainerResult};
use crate::glb::{encode_glb, padding_for};
use crate::mesh::{MeshData, PrimitiveData};

/// A glTF document with its binary chunk, ready to be framed as GLB.
#[derive(Debug, Clone)]
pub struct Container {
    pub root: json::Root,
    pub bin: Vec<u8>,
}

impl Container {
    /// Frames the document and buffer as a GLB byte stream.
    pub fn to_glb(&self) -> ContainerResult<Vec<u8>> {
        encode_glb(&self.root, &self.bin)
    }
}

/// Writes a mesh as a single-scene, single-node container without materials.
pub fn encode_geometry(mesh: &MeshData, generator: &str) -> ContainerResult<Container> {
    let mut root = json::Root {
        asset: json::Asset {
            generator: Some(generator.to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut bin = Vec::new();
    // The single buffer is pushed last; every view points at index 0.
    let buffer = Index::new(0);

    let mut primitives = Vec::with_capacity(mesh.primitives.len());
    for data in &mesh.primitives {
        primitives.push(encode_primitive(&mut root, &mut bin, buffer, data)?);
    }

    let mesh_index = root.push(json::Mesh {
        name: mesh.name.clone(),
        primitives,
        weights: None,
        extensions: Default::default(),
        extras: Default::default(),
    });
    let node = root.push(json::Node {
        name: mesh.name.clone(),
        mesh: Some(mesh_index),
        ..Default::default()
    });
    let scene = root.push(json::Scene {
        name: None,
        nodes: vec![node],
        extensions: Default::default(),
        extras: Default::default(),
    });
    root.scene = Some(scene);

    if !bin.is_empty() {
        checked_u32(bin.len())?;
        root.push(json::Buffer {
            byte_length: USize64::from(bin.len()),
            name: None,
            uri: None,
            extensions: Default::default(),
            extras: Default::default(),
        });
    }

    Ok(Container { root, bin })
}

fn encode_primitive(
    root: &mut json::Root,
    bin: &mut Vec<u8>,
    buffer: Index<json::Buffer>,
    data: &PrimitiveData,
) -> ContainerResult<Primitive> {
    let count = data.positions.len();
    let mut attributes = BTreeMap::new();

    let (min, max) = bounds(&data.positions);
    let view = write_view(root, bin, buffer, Target::ArrayBuffer, |out| {
        for p in &data.positions {
            write_floats(out, p)?;
        }
        Ok(())
    })?;
    let position = root.push(json::Accessor {
        min: Some(serde_json::json!(min)),
        max: Some(serde_json::json!(max)),
        ..accessor(view, ComponentType::F32, AccessorType::Vec3, count)
    });
    attributes.insert(Checked::Valid(Semantic::Positions), position);

    if !data.normals.is_empty() {
        let view = write_view(root, bin, buffer, Target::ArrayBuffer, |out| {
            for n in &data.normals {
                write_floats(out, n)?;
            }
            Ok(())
        })?;
        let normal = root.push(accessor(view, ComponentType::F32, AccessorType::Vec3, count));
        attributes.insert(Checked::Valid(Semantic::Normals), normal);
    }

    if !data.uvs.is_empty() {
        let view = write_view(root, bin, buffer, Target::ArrayBuffer, |out| {
            for uv in &data.uvs {
                write_floats(out, uv)?;
            }
            Ok(())
        })?;
        let uv = root.push(accessor(view, ComponentType::F32, AccessorType::Vec2, count));
        attributes.insert(Checked::Valid(Semantic::TexCoords(0)), uv);
    }

    let short_indices = count <= u16::MAX as usize;
    let view = write_view(root, bin, buffer, Target::ElementArrayBuffer, |out| {
        for &i in &data.indices {
            if short_indices {
                out.write_u16::<LittleEndian>(i as u16)?;
            } else {
                out.write_u32::<LittleEndian>(i)?;
            }
        }
        Ok(())
    })?;
    let component_type = if short_indices {
        ComponentType::U16
    } else {
        ComponentType::U32
    };
    let indices = root.push(accessor(
        view,
        component_type,
        AccessorType::Scalar,
        data.indices.len(),
    ));

    Ok(Primitive {
        attributes,
        indices: Some(indices),
        material: None,
        mode: Checked::Valid(Mode::Triangles),
        targets: None,
        extensions: Default::default(),
        extras: Default::default(),
    })
}

/// A tightly packed accessor over a whole buffer view.
fn accessor(
    view: Index<json::buffer::View>,
    component_type: ComponentType,
    type_: AccessorType,
    count: usize,
) -> json::Accessor {
    json::Accessor {
        buffer_view: Some(view),
        byte_offset: None,
        count: USize64::from(count),
        component_type: Checked::Valid(GenericComponentType(component_type)),
        type_: Checked::Valid(type_),
        min: None,
        max: None,
        name: None,
        normalized: false,
        sparse: None,
        extensions: Default::default(),
        extras: Default::default(),
    }
}

/// Appends one tightly packed buffer view, 4-byte aligned, and returns its index.
fn write_view(
    root: &mut json::Root,
    bin: &mut Vec<u8>,
    buffer: Index<json::Buffer>,
    target: Target,
    write: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
) -> ContainerResult<Index<json::buffer::View>> {
    let offset = bin.len();
    write(bin)?;
    let length = bin.len() - offset;
    bin.resize(bin.len() + padding_for(bin.len()), 0);
    checked_u32(bin.len())?;

    Ok(root.push(json::buffer::View {
        buffer,
        byte_length: USize64::from(length),
        byte_offset: (offset > 0).then_some(USize64::from(offset)),
        byte_stride: None,
        name: None,
        target: Some(Checked::Valid(target)),
        extensions: Default::default(),
        extras: Default::default(),
    }))
}

fn write_floats(out: &mut Vec<u8>, values: &[f32]) -> std::io::Result<()> {
    for &v in values {
        out.write_f32::<LittleEndian>(v)?;
    }
    Ok(())
}

fn bounds(positions: &[[f32; 3]]) -> ([f32; 3], [f32; 3]) {
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for p in positions {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    (min, max)
}

/// GLB lengths and offsets are 32-bit.
pub(crate) fn checked_u32(value: usize) -> ContainerResult<u32> {
    u32::try_from(value).map_err(|_| ContainerError::BufferTooLarge(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn triangle() -> MeshData {
        MeshData {
            name: Some("tri".to_string()),
            primitives: vec![PrimitiveData {
                positions: vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 3.0, -1.0]],
                normals: vec![[0.0, 0.0, 1.0]; 3],
                uvs: vec![[0.0, 1.0], [1.0, 1.0], [0.0, 0.0]],
                indices: vec![0, 1, 2],
            }],
        }
    }

    #[test]
    fn test_layout() {
        let container = encode_geometry(&triangle(), "pbrpack test").unwrap();
        let root = &container.root;

        assert_eq!(root.scene.map(|s| s.value()), Some(0));
        assert_eq!(root.nodes[0].mesh.map(|m| m.value()), Some(0));
        assert_eq!(root.meshes.len(), 1);
        assert_eq!(root.accessors.len(), 4);
        assert_eq!(root.buffer_views.len(), 4);
        assert!(root.materials.is_empty());
        assert!(root.images.is_empty());

        let prim = &root.meshes[0].primitives[0];
        assert!(prim.material.is_none());
        assert_eq!(prim.mode, Checked::Valid(Mode::Triangles));
        assert_eq!(
            prim.attributes.keys().cloned().collect::<Vec<_>>(),
            vec![
                Checked::Valid(Semantic::Positions),
                Checked::Valid(Semantic::Normals),
                Checked::Valid(Semantic::TexCoords(0)),
            ]
        );

        // positions 36 + normals 36 + uvs 24 + 3 u16 indices padded to 8
        assert_eq!(container.bin.len(), 36 + 36 + 24 + 8);
        assert_eq!(root.buffers[0].byte_length.0 as usize, container.bin.len());
    }

    #[test]
    fn test_json_attribute_names() {
        let container = encode_geometry(&triangle(), "pbrpack test").unwrap();
        let value = serde_json::to_value(&container.root).unwrap();
        let attributes = &value["meshes"][0]["primitives"][0]["attributes"];
        assert_eq!(attributes["POSITION"], 0);
        assert_eq!(attributes["NORMAL"], 1);
        assert_eq!(attributes["TEXCOORD_0"], 2);
        assert_eq!(value["accessors"][0]["type"], "VEC3");
        assert_eq!(value["asset"]["generator"], "pbrpack test");
    }

    #[test]
    fn test_position_bounds() {
        let container = encode_geometry(&triangle(), "pbrpack test").unwrap();
        let position = &container.root.accessors[0];
        assert_eq!(position.min, Some(serde_json::json!([0.0, 0.0, -1.0])));
        assert_eq!(position.max, Some(serde_json::json!([2.0, 3.0, 0.0])));
    }

    #[test]
    fn test_views_aligned() {
        let container = encode_geometry(&triangle(), "pbrpack test").unwrap();
        for view in &container.root.buffer_views {
            let offset = view.byte_offset.map(|o| o.0).unwrap_or(0);
            assert_eq!(offset % 4, 0);
        }
        assert_eq!(container.bin.len() % 4, 0);
    }

    #[test]
    fn test_large_mesh_uses_u32_indices() {
        let count = u16::MAX as usize + 2;
        let mesh = MeshData {
            name: None,
            primitives: vec![PrimitiveData {
                positions: vec![[0.0; 3]; count],
                normals: Vec::new(),
                uvs: Vec::new(),
                indices: vec![0, 1, (count - 1) as u32],
            }],
        };
        let container = encode_geometry(&mesh, "pbrpack test").unwrap();
        let indices = container.root.meshes[0].primitives[0].indices.unwrap();
        let accessor = &container.root.accessors[indices.value()];
        assert!(matches!(
            accessor.component_type,
            Checked::Valid(GenericComponentType(ComponentType::U32))
        ));
    }
}
