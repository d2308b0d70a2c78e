//! Channel packing: combining single-channel maps into one RGB texture.
//!
//! glTF stores roughness and metallic in one image: green carries roughness,
//! blue carries metallic, and red is the occlusion slot. With no occlusion
//! data available at this stage, red is held at full visibility (255).
//!
//! # Example
//!
//! ```ignore
//! use pbrpack_texture::packing::{pack_channels, PackedChannels};
//! use std::collections::BTreeMap;
//!
//! let mut maps = BTreeMap::new();
//! maps.insert(TextureRole::Metallic, metallic_buffer);
//! maps.insert(TextureRole::Roughness, roughness_buffer);
//!
//! let packed = pack_channels(&PackedChannels::metallic_roughness(), &maps, 512, 512)?;
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::debug;
use pbrpack_spec::TextureRole;

use crate::buffer::{GrayscaleBuffer, RgbBuffer};
use crate::codec::{load_luma, resize_bicubic, save_rgb};
use crate::error::{TextureError, TextureResult};

/// Source for a channel in a packed texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSource {
    /// Sample the map supplied for this role.
    Map(TextureRole),
    /// Constant value for the channel.
    Constant(u8),
}

impl ChannelSource {
    fn resolve(
        &self,
        maps: &BTreeMap<TextureRole, GrayscaleBuffer>,
        x: u32,
        y: u32,
    ) -> TextureResult<u8> {
        match self {
            ChannelSource::Map(role) => maps
                .get(role)
                .map(|buffer| buffer.get(x, y))
                .ok_or(TextureError::MissingMap(*role)),
            ChannelSource::Constant(value) => Ok(*value),
        }
    }
}

/// Channel layout for packing maps into one RGB image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedChannels {
    /// Source for the red channel
    pub r: ChannelSource,
    /// Source for the green channel
    pub g: ChannelSource,
    /// Source for the blue channel
    pub b: ChannelSource,
}

impl PackedChannels {
    /// Create a layout from per-channel sources.
    pub fn new(r: ChannelSource, g: ChannelSource, b: ChannelSource) -> Self {
        Self { r, g, b }
    }

    /// glTF metallic-roughness layout: R = 255, G = roughness, B = metallic.
    pub fn metallic_roughness() -> Self {
        Self::new(
            ChannelSource::Constant(255),
            ChannelSource::Map(TextureRole::Roughness),
            ChannelSource::Map(TextureRole::Metallic),
        )
    }

    fn sources(&self) -> [ChannelSource; 3] {
        [self.r, self.g, self.b]
    }
}

/// Pack maps into a single RGB texture of the given size.
///
/// Every referenced map must already have exactly `width`x`height` pixels.
pub fn pack_channels(
    packed: &PackedChannels,
    maps: &BTreeMap<TextureRole, GrayscaleBuffer>,
    width: u32,
    height: u32,
) -> TextureResult<RgbBuffer> {
    for source in packed.sources() {
        if let ChannelSource::Map(role) = source {
            let buffer = maps.get(&role).ok_or(TextureError::MissingMap(role))?;
            if buffer.dimensions() != (width, height) {
                return Err(TextureError::InvalidDimensions(format!(
                    "{} map is {}x{}, expected {}x{}",
                    role, buffer.width, buffer.height, width, height
                )));
            }
        }
    }

    let mut result = RgbBuffer::new(width, height, [0, 0, 0]);
    for y in 0..height {
        for x in 0..width {
            let r = packed.r.resolve(maps, x, y)?;
            let g = packed.g.resolve(maps, x, y)?;
            let b = packed.b.resolve(maps, x, y)?;
            result.set(x, y, [r, g, b]);
        }
    }

    Ok(result)
}

/// Pack a metallic and a roughness image into one glTF metallic-roughness map.
///
/// Both inputs are reduced to luminance. The metallic image's resolution is
/// authoritative: a roughness image of a different size is resized to it with
/// bicubic interpolation. The result is written to `out`, replacing any
/// existing file.
pub fn pack_metallic_roughness(
    metallic: &Path,
    roughness: &Path,
    out: &Path,
) -> TextureResult<PathBuf> {
    let metallic_map = load_luma(metallic)?;
    let mut roughness_map = load_luma(roughness)?;

    let (width, height) = metallic_map.dimensions();
    if roughness_map.dimensions() != (width, height) {
        debug!(
            "resizing roughness {}x{} -> {}x{}",
            roughness_map.width, roughness_map.height, width, height
        );
        roughness_map = resize_bicubic(&roughness_map, width, height)?;
    }

    let maps = BTreeMap::from([
        (TextureRole::Metallic, metallic_map),
        (TextureRole::Roughness, roughness_map),
    ]);
    let packed = pack_channels(&PackedChannels::metallic_roughness(), &maps, width, height)?;
    save_rgb(&packed, out)?;

    debug!(
        "packed {} + {} -> {}",
        metallic.display(),
        roughness.display(),
        out.display()
    );
    Ok(out.to_path_buf())
}
