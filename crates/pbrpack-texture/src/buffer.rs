//! 8-bit image buffers.

use crate::error::TextureError;

/// Row-major pixel offset, computed in `usize` so large images cannot wrap.
#[inline]
fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Grayscale texture buffer (single channel, 8-bit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscaleBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data (row-major).
    pub data: Vec<u8>,
}

impl GrayscaleBuffer {
    /// Create a new grayscale buffer filled with a value.
    pub fn new(width: u32, height: u32, fill: u8) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            data: vec![fill; size],
        }
    }

    /// Wrap existing pixel data.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, TextureError> {
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(TextureError::InvalidDimensions(format!(
                "Expected {} bytes for {}x{} grayscale, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        let idx = pixel_index(self.width, x, y);
        self.data[idx]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        let idx = pixel_index(self.width, x, y);
        self.data[idx] = value;
    }

    /// (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// RGB texture buffer (three channels, 8-bit, interleaved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data (RGB triples, row-major).
    pub data: Vec<u8>,
}

impl RgbBuffer {
    /// Create a new RGB buffer filled with a color.
    pub fn new(width: u32, height: u32, fill: [u8; 3]) -> Self {
        let size = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(size * 3);
        for _ in 0..size {
            data.extend_from_slice(&fill);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = pixel_index(self.width, x, y) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let idx = pixel_index(self.width, x, y) * 3;
        self.data[idx..idx + 3].copy_from_slice(&rgb);
    }

    /// (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Extract one channel as a grayscale buffer.
    pub fn channel(&self, index: usize) -> GrayscaleBuffer {
        let data = self.data.iter().skip(index).step_by(3).copied().collect();
        GrayscaleBuffer {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_get_set() {
        let mut buf = GrayscaleBuffer::new(3, 2, 7);
        assert_eq!(buf.data.len(), 6);
        buf.set(2, 1, 200);
        assert_eq!(buf.get(2, 1), 200);
        assert_eq!(buf.get(0, 0), 7);
        assert_eq!(buf.dimensions(), (3, 2));
    }

    #[test]
    fn grayscale_from_raw_checks_length() {
        assert!(GrayscaleBuffer::from_raw(2, 2, vec![0; 4]).is_ok());
        let err = GrayscaleBuffer::from_raw(2, 2, vec![0; 3]).unwrap_err();
        assert!(err.to_string().contains("Expected 4 bytes"));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn pixel_index_past_u32_range() {
        // 70000 * 70000 overflows u32 row math
        assert_eq!(pixel_index(70_000, 69_999, 69_999), 4_899_999_999);
        assert_eq!(pixel_index(3, 2, 1), 5);
    }

    #[test]
    fn rgb_last_pixel() {
        let mut buf = RgbBuffer::new(5, 3, [0, 0, 0]);
        buf.set(4, 2, [9, 8, 7]);
        assert_eq!(&buf.data[buf.data.len() - 3..], &[9, 8, 7]);
        assert_eq!(buf.get(4, 2), [9, 8, 7]);
    }

    #[test]
    fn rgb_channels() {
        let mut buf = RgbBuffer::new(2, 2, [255, 10, 20]);
        buf.set(1, 1, [1, 2, 3]);
        assert_eq!(buf.get(0, 0), [255, 10, 20]);
        assert_eq!(buf.get(1, 1), [1, 2, 3]);

        let green = buf.channel(1);
        assert_eq!(green.data, vec![10, 10, 10, 2]);
        let blue = buf.channel(2);
        assert_eq!(blue.data, vec![20, 20, 20, 3]);
    }
}
