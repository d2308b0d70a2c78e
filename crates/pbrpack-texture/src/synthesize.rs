//! Flat texture synthesis.
//!
//! Produces a single-channel square image of one intensity when a required
//! input texture is absent. Call sites pick the intensity per role: 0 for a
//! non-metal metallic map, 128 for mid roughness, 128 for neutral gray albedo.

use std::path::{Path, PathBuf};

use log::debug;
use pbrpack_spec::DEFAULT_SYNTHETIC_SIZE;

use crate::buffer::GrayscaleBuffer;
use crate::codec::save_grayscale;
use crate::error::{TextureError, TextureResult};

/// Synthesize a flat texture at the default size (1024x1024).
pub fn synthesize(path: &Path, intensity: u8) -> TextureResult<PathBuf> {
    synthesize_flat(path, intensity, DEFAULT_SYNTHETIC_SIZE)
}

/// Write a `size`x`size` grayscale image filled with `intensity` to `path`.
///
/// - An empty `path` is returned unchanged without touching the filesystem.
/// - An existing file is never overwritten; its path is returned unchanged.
/// - Missing parent directories are created.
pub fn synthesize_flat(path: &Path, intensity: u8, size: u32) -> TextureResult<PathBuf> {
    if path.as_os_str().is_empty() {
        return Ok(path.to_path_buf());
    }
    if path.exists() {
        debug!("keeping existing texture {}", path.display());
        return Ok(path.to_path_buf());
    }
    if size == 0 {
        return Err(TextureError::InvalidDimensions(
            "synthetic texture size must be at least 1".to_string(),
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| TextureError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let buffer = GrayscaleBuffer::new(size, size, intensity);
    save_grayscale(&buffer, path)?;
    debug!(
        "synthesized {}x{} texture of intensity {} at {}",
        size,
        size,
        intensity,
        path.display()
    );

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::load_luma;

    #[test]
    fn test_empty_path_untouched() {
        let result = synthesize_flat(Path::new(""), 10, 4).unwrap();
        assert_eq!(result, PathBuf::new());
    }

    #[test]
    fn test_writes_flat_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/_roughness.png");

        let result = synthesize_flat(&path, 128, 8).unwrap();
        assert_eq!(result, path);

        let loaded = load_luma(&path).unwrap();
        assert_eq!(loaded.dimensions(), (8, 8));
        assert!(loaded.data.iter().all(|&v| v == 128));
    }

    #[test]
    fn test_existing_file_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_albedo.png");
        std::fs::write(&path, b"upstream bytes").unwrap();

        synthesize_flat(&path, 0, 8).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"upstream bytes");
    }

    #[test]
    fn test_zero_size_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = synthesize_flat(&dir.path().join("x.png"), 0, 0).unwrap_err();
        assert!(matches!(err, TextureError::InvalidDimensions(_)));
    }

    #[test]
    fn test_jpeg_extension_uses_image_encoder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_metallic.jpg");
        synthesize_flat(&path, 0, 16).unwrap();

        let loaded = load_luma(&path).unwrap();
        assert_eq!(loaded.dimensions(), (16, 16));
        // A flat black JPEG decodes back to (near) zero everywhere
        assert!(loaded.data.iter().all(|&v| v <= 2));
    }
}
