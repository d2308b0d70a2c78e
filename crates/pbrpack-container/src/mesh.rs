//! Geometry loading.
//!
//! Input geometry is reduced to indexed triangle primitives with positions,
//! optional normals and optional texture coordinates. Materials in the source
//! file are ignored; the container stage builds its own.

use std::path::Path;

use log::{debug, warn};

use crate::error::{ContainerError, ContainerResult};

/// One indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimitiveData {
    pub positions: Vec<[f32; 3]>,
    /// Empty, or one normal per position.
    pub normals: Vec<[f32; 3]>,
    /// Empty, or one UV per position (glTF convention: V grows downward).
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl PrimitiveData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Checks attribute lengths and index bounds.
    pub fn validate(&self, path: &Path) -> ContainerResult<()> {
        let count = self.positions.len();
        if count == 0 {
            return Err(ContainerError::invalid_geometry(path, "primitive has no vertices"));
        }
        if !self.normals.is_empty() && self.normals.len() != count {
            return Err(ContainerError::invalid_geometry(
                path,
                format!("{} normals for {} positions", self.normals.len(), count),
            ));
        }
        if !self.uvs.is_empty() && self.uvs.len() != count {
            return Err(ContainerError::invalid_geometry(
                path,
                format!("{} UVs for {} positions", self.uvs.len(), count),
            ));
        }
        if self.indices.len() % 3 != 0 {
            return Err(ContainerError::invalid_geometry(
                path,
                format!("{} indices is not a triangle list", self.indices.len()),
            ));
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= count) {
            return Err(ContainerError::invalid_geometry(
                path,
                format!("index {} out of range for {} vertices", bad, count),
            ));
        }
        Ok(())
    }

    /// Fills `normals` with area-weighted vertex normals when absent.
    pub fn ensure_normals(&mut self) {
        if !self.normals.is_empty() {
            return;
        }
        let mut normals = vec![[0.0f32; 3]; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let (pa, pb, pc) = (self.positions[a], self.positions[b], self.positions[c]);
            let e1 = sub(pb, pa);
            let e2 = sub(pc, pa);
            let face = cross(e1, e2);
            for &i in &[a, b, c] {
                normals[i][0] += face[0];
                normals[i][1] += face[1];
                normals[i][2] += face[2];
            }
        }
        for n in &mut normals {
            *n = normalize(*n);
        }
        self.normals = normals;
    }
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > f32::EPSILON {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        // Degenerate fan; any unit vector keeps the attribute valid
        [0.0, 1.0, 0.0]
    }
}

/// A loaded mesh. Becomes mesh 0 of the container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub name: Option<String>,
    pub primitives: Vec<PrimitiveData>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.primitives.iter().map(PrimitiveData::vertex_count).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.primitives.iter().map(PrimitiveData::triangle_count).sum()
    }
}

/// Loads a geometry file into [`MeshData`].
pub trait MeshLoader {
    fn load(&self, path: &Path) -> ContainerResult<MeshData>;
}

/// Wavefront OBJ loader. One primitive per OBJ object/group.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjLoader;

impl MeshLoader for ObjLoader {
    fn load(&self, path: &Path) -> ContainerResult<MeshData> {
        check_readable(path)?;

        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        // Material libraries are irrelevant here; a missing .mtl is not an error
        let (models, _materials) =
            tobj::load_obj(path, &options).map_err(|source| ContainerError::Obj {
                path: path.to_path_buf(),
                source,
            })?;

        let mut primitives = Vec::new();
        for model in models {
            let mesh = model.mesh;
            if mesh.indices.is_empty() {
                debug!("skipping OBJ object '{}' without faces", model.name);
                continue;
            }
            let positions: Vec<[f32; 3]> = mesh
                .positions
                .chunks_exact(3)
                .map(|p| [p[0], p[1], p[2]])
                .collect();
            let normals: Vec<[f32; 3]> = if mesh.normals.len() == mesh.positions.len() {
                mesh.normals
                    .chunks_exact(3)
                    .map(|n| [n[0], n[1], n[2]])
                    .collect()
            } else {
                Vec::new()
            };
            // OBJ puts V=0 at the bottom of the image, glTF at the top
            let uvs: Vec<[f32; 2]> = if mesh.texcoords.len() / 2 == positions.len() {
                mesh.texcoords
                    .chunks_exact(2)
                    .map(|t| [t[0], 1.0 - t[1]])
                    .collect()
            } else {
                Vec::new()
            };

            let mut primitive = PrimitiveData {
                positions,
                normals,
                uvs,
                indices: mesh.indices,
            };
            primitive.validate(path)?;
            primitive.ensure_normals();
            primitives.push(primitive);
        }

        if primitives.is_empty() {
            return Err(ContainerError::EmptyMesh {
                path: path.to_path_buf(),
            });
        }

        Ok(MeshData {
            name: file_stem(path),
            primitives,
        })
    }
}

/// glTF / GLB loader. Reads the triangle primitives of the first mesh.
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfLoader;

impl MeshLoader for GltfLoader {
    fn load(&self, path: &Path) -> ContainerResult<MeshData> {
        check_readable(path)?;

        let gltf_error = |source: gltf::Error| ContainerError::Gltf {
            path: path.to_path_buf(),
            source,
        };
        let gltf::Gltf { document, blob } = gltf::Gltf::open(path).map_err(gltf_error)?;
        let buffers =
            gltf::import_buffers(&document, path.parent(), blob).map_err(gltf_error)?;

        let mesh = document
            .meshes()
            .next()
            .ok_or_else(|| ContainerError::EmptyMesh {
                path: path.to_path_buf(),
            })?;
        if document.meshes().len() > 1 {
            warn!(
                "{} holds {} meshes; only the first is converted",
                path.display(),
                document.meshes().len()
            );
        }

        let mut primitives = Vec::new();
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                debug!(
                    "skipping primitive {} with mode {:?}",
                    primitive.index(),
                    primitive.mode()
                );
                continue;
            }
            let reader =
                primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));

            let positions: Vec<[f32; 3]> = match reader.read_positions() {
                Some(iter) => iter.collect(),
                None => continue,
            };
            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|iter| iter.collect())
                .unwrap_or_default();
            let uvs: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|coords| coords.into_f32().collect())
                .unwrap_or_default();
            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };

            let mut data = PrimitiveData {
                positions,
                normals,
                uvs,
                indices,
            };
            data.validate(path)?;
            data.ensure_normals();
            primitives.push(data);
        }

        if primitives.is_empty() {
            return Err(ContainerError::EmptyMesh {
                path: path.to_path_buf(),
            });
        }

        Ok(MeshData {
            name: mesh.name().map(str::to_string).or_else(|| file_stem(path)),
            primitives,
        })
    }
}

/// Picks a loader from the file extension (obj, gltf, glb).
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoLoader;

impl MeshLoader for AutoLoader {
    fn load(&self, path: &Path) -> ContainerResult<MeshData> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "obj" => ObjLoader.load(path),
            "gltf" | "glb" => GltfLoader.load(path),
            _ => Err(ContainerError::UnsupportedGeometry {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

fn check_readable(path: &Path) -> ContainerResult<()> {
    let metadata = std::fs::metadata(path).map_err(|source| ContainerError::ReadGeometry {
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(ContainerError::ReadGeometry {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "not a regular file"),
        });
    }
    Ok(())
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
