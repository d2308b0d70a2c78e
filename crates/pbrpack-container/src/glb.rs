//! GLB (binary glTF) framing.
//!
//! Layout: a 12-byte header (`glTF`, version 2, total length), a JSON chunk
//! padded with spaces, and an optional BIN chunk padded with zeros. Both
//! chunks are 4-byte aligned. Chunk writing is delegated to
//! [`gltf::binary::Glb`].

use std::borrow::Cow;

use gltf::binary::{Glb, Header};
use gltf::json;

use crate::error::{ContainerError, ContainerResult};

/// `glTF` magic.
pub const GLB_MAGIC: [u8; 4] = *b"glTF";
/// Container version written in the header.
pub const GLB_VERSION: u32 = 2;

const HEADER_SIZE: usize = 12;
const CHUNK_HEADER_SIZE: usize = 8;

/// Number of padding bytes needed to reach 4-byte alignment.
pub fn padding_for(len: usize) -> usize {
    (4 - (len % 4)) % 4
}

/// Serialize `root` and `bin` into a GLB byte stream.
///
/// The BIN chunk is omitted when `bin` is empty.
pub fn encode_glb(root: &json::Root, bin: &[u8]) -> ContainerResult<Vec<u8>> {
    let json = json::serialize::to_vec(root)?;

    let mut total_length = HEADER_SIZE + CHUNK_HEADER_SIZE + json.len() + padding_for(json.len());
    if !bin.is_empty() {
        total_length += CHUNK_HEADER_SIZE + bin.len() + padding_for(bin.len());
    }
    let length =
        u32::try_from(total_length).map_err(|_| ContainerError::BufferTooLarge(total_length))?;

    let glb = Glb {
        header: Header {
            magic: GLB_MAGIC,
            version: GLB_VERSION,
            length,
        },
        json: Cow::Owned(json),
        bin: (!bin.is_empty()).then_some(Cow::Borrowed(bin)),
    };
    let bytes = glb.to_vec().map_err(ContainerError::Frame)?;

    debug_assert_eq!(bytes.len(), total_length);
    Ok(bytes)
}
