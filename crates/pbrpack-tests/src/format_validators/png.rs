//! PNG validator and decoder.

use super::FormatError;

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Information from a PNG IHDR chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngInfo {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    /// 0 = grayscale, 2 = RGB, 6 = RGBA
    pub color_type: u8,
}

impl PngInfo {
    /// Number of channels for the color type.
    pub fn channels(&self) -> u8 {
        match self.color_type {
            0 | 3 => 1,
            2 => 3,
            4 => 2,
            6 => 4,
            _ => 0,
        }
    }
}

/// Decoded 8-bit pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPng {
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    pub pixels: Vec<u8>,
}

impl DecodedPng {
    /// Whether every pixel equals `value` (one entry per channel).
    pub fn is_uniform(&self, value: &[u8]) -> bool {
        self.channels > 0
            && value.len() == self.channels
            && self.pixels.chunks(self.channels).all(|px| px == value)
    }
}

/// Validate the PNG signature and IHDR chunk.
pub fn validate_png(data: &[u8]) -> Result<PngInfo, FormatError> {
    if data.len() < 8 + 8 + 13 {
        return Err(FormatError::new(
            "PNG",
            format!("File too short: {} bytes", data.len()),
        ));
    }
    if data[0..8] != PNG_SIGNATURE {
        return Err(FormatError::at_offset("PNG", "Invalid PNG signature", 0));
    }
    if &data[12..16] != b"IHDR" {
        return Err(FormatError::at_offset("PNG", "First chunk must be IHDR", 12));
    }

    let ihdr = &data[16..29];
    let width = u32::from_be_bytes([ihdr[0], ihdr[1], ihdr[2], ihdr[3]]);
    let height = u32::from_be_bytes([ihdr[4], ihdr[5], ihdr[6], ihdr[7]]);
    if width == 0 || height == 0 {
        return Err(FormatError::new(
            "PNG",
            format!("Invalid dimensions: {}x{}", width, height),
        ));
    }

    Ok(PngInfo {
        width,
        height,
        bit_depth: ihdr[8],
        color_type: ihdr[9],
    })
}

/// Decode an 8-bit PNG into raw pixels.
pub fn decode_png(data: &[u8]) -> Result<DecodedPng, FormatError> {
    let decoder = png::Decoder::new(data);
    let mut reader = decoder
        .read_info()
        .map_err(|e| FormatError::new("PNG", e.to_string()))?;
    let mut pixels = vec![0; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut pixels)
        .map_err(|e| FormatError::new("PNG", e.to_string()))?;
    if frame.bit_depth != png::BitDepth::Eight {
        return Err(FormatError::new(
            "PNG",
            format!("Expected 8-bit samples, got {:?}", frame.bit_depth),
        ));
    }
    pixels.truncate(frame.buffer_size());

    Ok(DecodedPng {
        width: frame.width,
        height: frame.height,
        channels: frame.color_type.samples(),
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(width: u32, height: u32, color: png::ColorType, pixels: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(pixels).unwrap();
        writer.finish().unwrap();
        out
    }

    #[test]
    fn test_validate_and_decode_rgb() {
        let data = encode(2, 1, png::ColorType::Rgb, &[255, 128, 0, 255, 128, 0]);
        let info = validate_png(&data).unwrap();
        assert_eq!((info.width, info.height, info.channels()), (2, 1, 3));

        let decoded = decode_png(&data).unwrap();
        assert_eq!(decoded.channels, 3);
        assert!(decoded.is_uniform(&[255, 128, 0]));
        assert!(!decoded.is_uniform(&[255, 128]));
    }

    #[test]
    fn test_decode_grayscale() {
        let data = encode(2, 2, png::ColorType::Grayscale, &[7, 7, 7, 7]);
        let decoded = decode_png(&data).unwrap();
        assert_eq!(decoded.channels, 1);
        assert!(decoded.is_uniform(&[7]));
    }

    #[test]
    fn test_validate_png_rejects_garbage() {
        assert!(validate_png(&[0u8; 10]).unwrap_err().message.contains("too short"));
        let mut data = encode(1, 1, png::ColorType::Grayscale, &[0]);
        data[0] = 0;
        assert!(validate_png(&data).unwrap_err().message.contains("signature"));
        assert!(decode_png(b"not a png").is_err());
    }
}
