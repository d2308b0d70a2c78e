//! Synthesize command implementation
//!
//! Writes a flat grayscale texture. An existing file is left untouched.

use anyhow::{Context, Result};
use colored::Colorize;
use pbrpack_texture::synthesize_flat;
use std::path::Path;
use std::process::ExitCode;

/// Run the synthesize command
///
/// # Arguments
/// * `path` - Texture to create
/// * `value` - Intensity of every pixel
/// * `size` - Side length in pixels
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(path: &Path, value: u8, size: u32) -> Result<ExitCode> {
    let existed = path.exists();
    synthesize_flat(path, value, size)
        .with_context(|| format!("Failed to synthesize {}", path.display()))?;

    if existed {
        println!(
            "{} {} already exists, left unchanged",
            "SKIPPED".yellow().bold(),
            path.display()
        );
    } else {
        println!(
            "{} Wrote {}x{} texture of value {} to {}",
            "SUCCESS".green().bold(),
            size,
            size,
            value,
            path.display()
        );
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_writes_then_skips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_roughness.png");

        run(&path, 128, 8).unwrap();
        let first = std::fs::read(&path).unwrap();
        run(&path, 0, 16).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), first);
    }

    #[test]
    fn test_zero_size_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&dir.path().join("x.png"), 1, 0).unwrap_err();
        assert!(err.to_string().contains("x.png"));
    }
}
