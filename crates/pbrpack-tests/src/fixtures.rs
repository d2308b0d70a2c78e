//! Test fixtures: throwaway asset directories with geometry and textures.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use pbrpack_texture::codec::save_rgb;
use pbrpack_texture::{synthesize_flat, RgbBuffer};

/// A unit cube with UVs, 8 vertices and 6 quad faces.
pub const CUBE_OBJ: &str = "\
o cube
v -0.5 -0.5 -0.5
v 0.5 -0.5 -0.5
v 0.5 0.5 -0.5
v -0.5 0.5 -0.5
v -0.5 -0.5 0.5
v 0.5 -0.5 0.5
v 0.5 0.5 0.5
v -0.5 0.5 0.5
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1 4/4 3/3 2/2
f 5/1 6/2 7/3 8/4
f 1/1 2/2 6/3 5/4
f 4/1 8/4 7/3 3/2
f 1/1 5/2 8/3 4/4
f 2/1 3/2 7/3 6/4
";

/// Side length of fixture textures.
pub const FIXTURE_TEXTURE_SIZE: u32 = 8;

/// A temporary directory holding one asset's source files.
pub struct AssetFixture {
    pub root: TempDir,
}

impl AssetFixture {
    /// Create a new empty fixture.
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Get the fixture root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write the cube OBJ under `name`.
    pub fn add_cube(&self, name: &str) -> PathBuf {
        self.add_file(name, CUBE_OBJ)
    }

    /// Write an arbitrary file, creating parent directories.
    pub fn add_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.prepare(name);
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    fn prepare(&self, name: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        path
    }

    /// Write a flat grayscale texture.
    pub fn add_gray(&self, name: &str, value: u8) -> PathBuf {
        let path = self.prepare(name);
        synthesize_flat(&path, value, FIXTURE_TEXTURE_SIZE).expect("Failed to write gray texture")
    }

    /// Write a flat RGB texture.
    pub fn add_rgb(&self, name: &str, rgb: [u8; 3]) -> PathBuf {
        let path = self.prepare(name);
        let buffer = RgbBuffer::new(FIXTURE_TEXTURE_SIZE, FIXTURE_TEXTURE_SIZE, rgb);
        save_rgb(&buffer, &path).expect("Failed to write rgb texture");
        path
    }
}

impl Default for AssetFixture {
    fn default() -> Self {
        Self::new()
    }
}
