//! Raster decode, luminance conversion, resizing and format-by-extension saving.

use std::io::Cursor;
use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, ImageFormat, ImageReader, RgbImage};

use crate::buffer::{GrayscaleBuffer, RgbBuffer};
use crate::error::{TextureError, TextureResult};
use crate::png::{write_grayscale, write_rgb, PngConfig};

/// ITU-R BT.601 luma of an 8-bit RGB triple, in 16.16 fixed point.
#[inline]
pub fn luma_601(r: u8, g: u8, b: u8) -> u8 {
    let l = (r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16;
    l.min(255) as u8
}

/// Decode an image file and reduce it to a single luminance channel.
///
/// 8-bit grayscale sources are taken as-is; color sources are reduced with
/// BT.601 weights and any alpha channel is dropped.
pub fn load_luma(path: &Path) -> TextureResult<GrayscaleBuffer> {
    Ok(to_luma(decode(path)?))
}

/// Decode any raster the `image` crate supports.
///
/// The format is sniffed from the file content first. Formats without a
/// signature (TGA) fall back to the file extension.
pub fn decode(path: &Path) -> TextureResult<DynamicImage> {
    let read_error = |source: std::io::Error| TextureError::Read {
        path: path.to_path_buf(),
        source,
    };
    let bytes = std::fs::read(path).map_err(read_error)?;

    let mut reader = ImageReader::new(Cursor::new(bytes));
    if let Ok(format) = ImageFormat::from_path(path) {
        reader.set_format(format);
    }
    reader
        .with_guessed_format()
        .map_err(read_error)?
        .decode()
        .map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Reduce a decoded image to one luminance channel.
pub fn to_luma(image: DynamicImage) -> GrayscaleBuffer {
    let gray = match image {
        DynamicImage::ImageLuma8(gray) => gray,
        DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_) => image.to_luma8(),
        other => {
            let rgb = other.to_rgb8();
            let (width, height) = rgb.dimensions();
            let data = rgb
                .pixels()
                .map(|p| luma_601(p.0[0], p.0[1], p.0[2]))
                .collect();
            return GrayscaleBuffer {
                width,
                height,
                data,
            };
        }
    };
    let (width, height) = gray.dimensions();
    GrayscaleBuffer {
        width,
        height,
        data: gray.into_raw(),
    }
}

/// Resize a grayscale buffer with bicubic (Catmull-Rom) interpolation.
pub fn resize_bicubic(
    buffer: &GrayscaleBuffer,
    width: u32,
    height: u32,
) -> TextureResult<GrayscaleBuffer> {
    if buffer.dimensions() == (width, height) {
        return Ok(buffer.clone());
    }
    let source = to_gray_image(buffer)?;
    let resized = image::imageops::resize(&source, width, height, FilterType::CatmullRom);
    GrayscaleBuffer::from_raw(width, height, resized.into_raw())
}

fn to_gray_image(buffer: &GrayscaleBuffer) -> TextureResult<GrayImage> {
    GrayImage::from_raw(buffer.width, buffer.height, buffer.data.clone()).ok_or_else(|| {
        TextureError::InvalidDimensions(format!(
            "{}x{} grayscale buffer holds {} bytes",
            buffer.width,
            buffer.height,
            buffer.data.len()
        ))
    })
}

fn to_rgb_image(buffer: &RgbBuffer) -> TextureResult<RgbImage> {
    RgbImage::from_raw(buffer.width, buffer.height, buffer.data.clone()).ok_or_else(|| {
        TextureError::InvalidDimensions(format!(
            "{}x{} RGB buffer holds {} bytes",
            buffer.width,
            buffer.height,
            buffer.data.len()
        ))
    })
}

/// Returns true if the path should go through the deterministic PNG writer.
fn is_png_path(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        None => true,
        Some(ext) => ext.eq_ignore_ascii_case("png"),
    }
}

/// Save a grayscale buffer, choosing the encoder from the file extension.
pub fn save_grayscale(buffer: &GrayscaleBuffer, path: &Path) -> TextureResult<()> {
    if is_png_path(path) {
        return write_grayscale(buffer, path, &PngConfig::default()).map_err(|source| {
            TextureError::Png {
                path: path.to_path_buf(),
                source,
            }
        });
    }
    to_gray_image(buffer)?
        .save(path)
        .map_err(|source| TextureError::Save {
            path: path.to_path_buf(),
            source,
        })
}

/// Save an RGB buffer, choosing the encoder from the file extension.
pub fn save_rgb(buffer: &RgbBuffer, path: &Path) -> TextureResult<()> {
    if is_png_path(path) {
        return write_rgb(buffer, path, &PngConfig::default()).map_err(|source| {
            TextureError::Png {
                path: path.to_path_buf(),
                source,
            }
        });
    }
    to_rgb_image(buffer)?
        .save(path)
        .map_err(|source| TextureError::Save {
            path: path.to_path_buf(),
            source,
        })
}

/// Decode an image file into an RGB buffer.
pub fn load_rgb(path: &Path) -> TextureResult<RgbBuffer> {
    let rgb = decode(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(RgbBuffer {
        width,
        height,
        data: rgb.into_raw(),
    })
}
