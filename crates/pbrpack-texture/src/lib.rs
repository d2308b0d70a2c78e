//! pbrpack Texture Stage
//!
//! This crate produces the texture inputs a PBR container needs when upstream
//! stages left some of them out.
//!
//! # Features
//!
//! - **Flat synthesis**: single-channel square images of one intensity, never
//!   overwriting an existing file
//! - **Channel packing**: metallic and roughness maps packed into one RGB image
//!   using the glTF convention (R = 255, G = roughness, B = metallic)
//! - **Deterministic PNG**: fixed compression settings for byte-identical output
//!
//! # Example
//!
//! ```no_run
//! use pbrpack_texture::{pack_metallic_roughness, synthesize_flat};
//! use std::path::Path;
//!
//! let metallic = synthesize_flat(Path::new("temp/_metallic.png"), 0, 1024).unwrap();
//! let roughness = synthesize_flat(Path::new("temp/_roughness.png"), 128, 1024).unwrap();
//! pack_metallic_roughness(&metallic, &roughness, Path::new("temp/mr_combined.png")).unwrap();
//! ```
//!
//! # Determinism
//!
//! Identical inputs always produce byte-identical PNG output: the encoder uses
//! fixed compression and filter settings and writes no timestamps.

pub mod buffer;
pub mod codec;
pub mod error;
pub mod packing;
pub mod png;
pub mod synthesize;

// Re-export main types for convenience
pub use buffer::{GrayscaleBuffer, RgbBuffer};
pub use error::TextureError;
pub use packing::{pack_channels, pack_metallic_roughness, ChannelSource, PackedChannels};
pub use png::{PngConfig, PngError};
pub use synthesize::{synthesize, synthesize_flat};
