//! Deterministic PNG writer.
//!
//! Compression and filter are fixed, and the png crate writes no timestamps,
//! so identical pixels always encode to identical bytes. The container embeds
//! these bytes verbatim, which keeps whole conversions reproducible.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;

use crate::buffer::{GrayscaleBuffer, RgbBuffer};

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),
}

/// Encoder settings. Both fields must stay fixed for reproducible output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    pub compression: Compression,
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

/// Write an RGB buffer to a PNG file.
pub fn write_rgb(buffer: &RgbBuffer, path: &Path, config: &PngConfig) -> Result<(), PngError> {
    write_file(path, |w| {
        encode(buffer.as_bytes(), buffer.dimensions(), ColorType::Rgb, w, config)
    })
}

/// Write a grayscale buffer to a PNG file.
pub fn write_grayscale(
    buffer: &GrayscaleBuffer,
    path: &Path,
    config: &PngConfig,
) -> Result<(), PngError> {
    write_file(path, |w| {
        encode(
            buffer.as_bytes(),
            buffer.dimensions(),
            ColorType::Grayscale,
            w,
            config,
        )
    })
}

fn write_file<F>(path: &Path, body: F) -> Result<(), PngError>
where
    F: FnOnce(&mut std::io::BufWriter<std::fs::File>) -> Result<(), PngError>,
{
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    body(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Encode 8-bit pixels of the given color type into `writer`.
pub fn encode<W: Write>(
    data: &[u8],
    (width, height): (u32, u32),
    color_type: ColorType,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(data)?;
    png_writer.finish()?;
    Ok(())
}
