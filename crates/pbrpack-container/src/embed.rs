//! Image embedding as base64 data URIs.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{ContainerError, ContainerResult};

/// MIME type for an image path, chosen by extension. Unknown extensions are
/// labelled PNG.
pub fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "image/png",
    }
}

/// Encode raw bytes as `data:<mime>;base64,<payload>`.
pub fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Read an image file and return it as a data URI.
pub fn data_uri_for(path: &Path) -> ContainerResult<String> {
    let bytes = std::fs::read(path).map_err(|source| ContainerError::ReadImage {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(encode_data_uri(mime_type_for(path), &bytes))
}

/// Split a base64 data URI into its MIME type and decoded payload.
pub fn decode_data_uri(uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime_type = header.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload).ok()?;
    Some((mime_type.to_string(), bytes))
}
