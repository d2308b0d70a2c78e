//! GLB (binary glTF) validator.

use serde_json::Value;

use super::{read_u32_le, FormatError};

const GLB_MAGIC: &[u8; 4] = b"glTF";
const HEADER_SIZE: usize = 12;
const CHUNK_HEADER_SIZE: usize = 8;
const JSON_CHUNK_TYPE: u32 = 0x4E4F534A;
const BIN_CHUNK_TYPE: u32 = 0x004E4942;

/// Structure of a GLB file.
#[derive(Debug, Clone, PartialEq)]
pub struct GlbInfo {
    /// Container version (always 2 when valid).
    pub version: u32,
    /// Total length declared in the header.
    pub length: u32,
    /// Parsed JSON chunk.
    pub json: Value,
    /// Length of the JSON chunk including padding.
    pub json_chunk_length: u32,
    /// Length of the BIN chunk including padding, if present.
    pub bin_chunk_length: Option<u32>,
}

impl GlbInfo {
    /// Number of entries in a top-level JSON array such as `images`.
    pub fn count(&self, key: &str) -> usize {
        self.json
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

/// Validate a GLB file and parse its JSON chunk.
///
/// Checks the header magic and version, that the declared length equals the
/// file size, that both chunks are 4-byte aligned and that the first chunk is
/// JSON.
pub fn validate_glb(data: &[u8]) -> Result<GlbInfo, FormatError> {
    if data.len() < HEADER_SIZE + CHUNK_HEADER_SIZE {
        return Err(FormatError::new(
            "GLB",
            format!("File too short: {} bytes", data.len()),
        ));
    }
    if &data[0..4] != GLB_MAGIC {
        return Err(FormatError::at_offset("GLB", "Invalid magic", 0));
    }

    let version = read_u32_le(data, 4).unwrap_or(0);
    if version != 2 {
        return Err(FormatError::at_offset(
            "GLB",
            format!("Unsupported version {}", version),
            4,
        ));
    }
    let length = read_u32_le(data, 8).unwrap_or(0);
    if length as usize != data.len() {
        return Err(FormatError::at_offset(
            "GLB",
            format!("Declared length {} but file has {} bytes", length, data.len()),
            8,
        ));
    }

    let json_chunk_length = read_u32_le(data, 12).unwrap_or(0);
    if read_u32_le(data, 16) != Some(JSON_CHUNK_TYPE) {
        return Err(FormatError::at_offset("GLB", "First chunk must be JSON", 16));
    }
    if json_chunk_length % 4 != 0 {
        return Err(FormatError::at_offset("GLB", "JSON chunk not 4-byte aligned", 12));
    }
    let json_start = HEADER_SIZE + CHUNK_HEADER_SIZE;
    let json_end = json_start + json_chunk_length as usize;
    let json_bytes = data
        .get(json_start..json_end)
        .ok_or_else(|| FormatError::at_offset("GLB", "JSON chunk overruns file", json_start))?;
    let json: Value = serde_json::from_slice(json_bytes)
        .map_err(|e| FormatError::at_offset("GLB", e.to_string(), json_start))?;

    let mut bin_chunk_length = None;
    if json_end < data.len() {
        let chunk_length = read_u32_le(data, json_end)
            .ok_or_else(|| FormatError::at_offset("GLB", "Truncated chunk header", json_end))?;
        if read_u32_le(data, json_end + 4) != Some(BIN_CHUNK_TYPE) {
            return Err(FormatError::at_offset("GLB", "Second chunk must be BIN", json_end));
        }
        if chunk_length % 4 != 0 {
            return Err(FormatError::at_offset(
                "GLB",
                "BIN chunk not 4-byte aligned",
                json_end,
            ));
        }
        if json_end + CHUNK_HEADER_SIZE + chunk_length as usize != data.len() {
            return Err(FormatError::at_offset(
                "GLB",
                "BIN chunk does not end at file end",
                json_end,
            ));
        }
        bin_chunk_length = Some(chunk_length);
    }

    Ok(GlbInfo {
        version,
        length,
        json,
        json_chunk_length,
        bin_chunk_length,
    })
}
