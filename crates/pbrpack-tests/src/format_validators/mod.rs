//! Binary format validators for test infrastructure.
//!
//! These parse the containers and images pbrpack writes and return structured
//! information, independently of the crates that produced them.

use std::fmt;

mod glb;
mod png;

pub use glb::{validate_glb, GlbInfo};
pub use png::{decode_png, validate_png, DecodedPng, PngInfo};

/// Error type for format validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    /// The format being validated.
    pub format: &'static str,
    /// Description of what went wrong.
    pub message: String,
    /// Byte offset where the error occurred, if applicable.
    pub offset: Option<usize>,
}

impl FormatError {
    /// Create a new format error.
    pub fn new(format: &'static str, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
            offset: None,
        }
    }

    /// Create a format error with a byte offset.
    pub fn at_offset(format: &'static str, message: impl Into<String>, offset: usize) -> Self {
        Self {
            format,
            message: message.into(),
            offset: Some(offset),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(
                f,
                "{} error at offset {}: {}",
                self.format, offset, self.message
            ),
            None => write!(f, "{} error: {}", self.format, self.message),
        }
    }
}

impl std::error::Error for FormatError {}

/// Read a little-endian u32 at `offset`, if the slice is long enough.
pub(crate) fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
