//! Pack command implementation
//!
//! Combines a metallic and a roughness map into one glTF metallic-roughness
//! texture (R = 255, G = roughness, B = metallic).

use anyhow::{Context, Result};
use colored::Colorize;
use pbrpack_texture::pack_metallic_roughness;
use std::path::Path;
use std::process::ExitCode;

/// Run the pack command
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(metallic: &Path, roughness: &Path, output: &Path) -> Result<ExitCode> {
    println!(
        "{} {} + {}",
        "Packing:".cyan().bold(),
        metallic.display(),
        roughness.display()
    );

    pack_metallic_roughness(metallic, roughness, output).with_context(|| {
        format!(
            "Failed to pack {} and {}",
            metallic.display(),
            roughness.display()
        )
    })?;

    println!("{} Wrote {}", "SUCCESS".green().bold(), output.display());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbrpack_texture::codec::load_rgb;
    use pbrpack_texture::synthesize_flat;

    #[test]
    fn test_run_packs() {
        let dir = tempfile::tempdir().unwrap();
        let metallic = synthesize_flat(&dir.path().join("m.png"), 10, 4).unwrap();
        let roughness = synthesize_flat(&dir.path().join("r.png"), 20, 4).unwrap();
        let output = dir.path().join("mr.png");

        run(&metallic, &roughness, &output).unwrap();
        let packed = load_rgb(&output).unwrap();
        assert!(packed.data.chunks(3).all(|px| px == [255, 20, 10]));
    }

    #[test]
    fn test_missing_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let roughness = synthesize_flat(&dir.path().join("r.png"), 20, 4).unwrap();
        let err = run(&dir.path().join("m.png"), &roughness, &dir.path().join("mr.png"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to pack"));
    }
}
