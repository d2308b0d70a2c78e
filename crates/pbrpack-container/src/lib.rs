//! pbrpack container stage.
//!
//! Turns a geometry file plus a texture map into a single self-contained
//! binary glTF (GLB). Geometry comes from OBJ, glTF or GLB input and is
//! re-encoded into one buffer. Textures are embedded as base64 data URIs and
//! wired into one metallic-roughness material named `PBR_Material`, which is
//! bound to every primitive of the first mesh.
//!
//! # Example
//!
//! ```ignore
//! use pbrpack_container::ContainerBuilder;
//! use pbrpack_spec::{TextureMap, TextureRole};
//!
//! let textures = TextureMap::new()
//!     .with(TextureRole::Albedo, "work/albedo.png")
//!     .with(TextureRole::MetallicRoughness, "work/mr_combined.png");
//! ContainerBuilder::new().build("chair.obj".as_ref(), &textures, "chair.glb".as_ref())?;
//! ```

pub mod builder;
pub mod embed;
pub mod error;
pub mod geometry;
pub mod glb;
pub mod inspect;
pub mod mesh;

pub use builder::{default_generator, ContainerBuilder, MATERIAL_NAME};
pub use error::{ContainerError, ContainerResult};
pub use geometry::{encode_geometry, Container};
pub use inspect::{
    embedded_image_bytes, inspect_bytes, inspect_container, ContainerSummary, ImageSummary,
    MaterialSummary,
};
pub use mesh::{AutoLoader, GltfLoader, MeshData, MeshLoader, ObjLoader, PrimitiveData};
