//! pbrpack Shared Data Model
//!
//! This crate holds the types every pbrpack stage agrees on: the closed set of
//! texture roles, the role-keyed texture map that the resolver completes, the
//! immutable resolved asset handed to the container builder, and the
//! conversion configuration.
//!
//! # Example
//!
//! ```
//! use pbrpack_spec::{TextureMap, TextureRole};
//!
//! let mut textures = TextureMap::new();
//! textures.insert(TextureRole::Albedo, "textures/crate_albedo.png");
//! textures.insert(TextureRole::Normal, "textures/crate_normal.png");
//!
//! let embedded: Vec<_> = textures.embedded().map(|(role, _)| role).collect();
//! assert_eq!(embedded, vec![TextureRole::Albedo, TextureRole::Normal]);
//! ```
//!
//! # Modules
//!
//! - [`role`]: Texture roles and the role-keyed texture map
//! - [`asset`]: Conversion requests and resolved assets
//! - [`config`]: Conversion configuration
//! - [`error`]: Error types and the shared error-code trait

pub mod asset;
pub mod config;
pub mod error;
pub mod role;

pub use asset::{ConvertRequest, ResolvedAsset, RoleOrigin};
pub use config::{ConvertConfig, DEFAULT_SYNTHETIC_SIZE};
pub use error::{BackendError, SpecError};
pub use role::{TextureMap, TextureRole};
