//! CLI argument definitions for the pbrpack command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pbrpack - pack a mesh and its PBR textures into one GLB
#[derive(Parser)]
#[command(name = "pbrpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Convert a geometry file and its textures into a self-contained GLB
    Convert {
        /// Geometry file (OBJ, glTF or GLB); optional with --request
        geometry: Option<PathBuf>,

        /// Base color texture
        #[arg(long)]
        albedo: Option<PathBuf>,

        /// Metallic map (grayscale)
        #[arg(long)]
        metallic: Option<PathBuf>,

        /// Roughness map (grayscale)
        #[arg(long)]
        roughness: Option<PathBuf>,

        /// Tangent-space normal map
        #[arg(long)]
        normal: Option<PathBuf>,

        /// Ambient occlusion map
        #[arg(long)]
        ao: Option<PathBuf>,

        /// Output container path (default: <work dir>/<name>.glb)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Working directory for synthetic and packed textures
        #[arg(long)]
        work_dir: Option<PathBuf>,

        /// Side length of synthetic textures
        #[arg(long)]
        size: Option<u32>,

        /// Do not scan for *_metallic.* / *_roughness.* files
        #[arg(long)]
        no_discover: bool,

        /// Conversion config file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Conversion request manifest (JSON); flags override its fields
        #[arg(long)]
        request: Option<PathBuf>,

        /// Output machine-readable JSON report (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Summarize the images, textures and material of a GLB
    Inspect {
        /// Container to inspect
        container: PathBuf,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Write a flat grayscale texture unless the file already exists
    Synthesize {
        /// Path of the texture to create
        path: PathBuf,

        /// Pixel intensity (0-255)
        #[arg(long)]
        value: u8,

        /// Side length in pixels
        #[arg(long, default_value_t = pbrpack_spec::DEFAULT_SYNTHETIC_SIZE)]
        size: u32,
    },

    /// Pack metallic and roughness maps into one metallic-roughness texture
    Pack {
        /// Metallic map; its resolution is kept
        metallic: PathBuf,

        /// Roughness map; resized to match metallic if needed
        roughness: PathBuf,

        /// Output texture path
        #[arg(short, long)]
        output: PathBuf,
    },
}
