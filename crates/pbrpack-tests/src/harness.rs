//! Test harness for running the pbrpack CLI and checking its outputs.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;

use crate::format_validators::{self, GlbInfo};

/// Result of running the pbrpack CLI.
#[derive(Debug)]
pub struct CliResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Create a CliResult from a Command Output.
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Assert that the command succeeded.
    pub fn assert_success(&self) {
        assert!(
            self.success,
            "Command failed with exit code {}.\nstdout: {}\nstderr: {}",
            self.exit_code, self.stdout, self.stderr
        );
    }

    /// Assert that the command failed.
    pub fn assert_failure(&self) {
        assert!(
            !self.success,
            "Expected command to fail, but it succeeded.\nstdout: {}",
            self.stdout
        );
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({}):\n{}", e, self.stdout))
    }
}

/// Run the pbrpack CLI with `args`, using `cwd` as the working directory.
pub fn run_cli(cwd: &Path, args: &[&str]) -> CliResult {
    let output = Command::new(env!("CARGO"))
        .args(["run", "--quiet", "--manifest-path"])
        .arg(workspace_manifest_path())
        .args(["-p", "pbrpack-cli", "--bin", "pbrpack", "--"])
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output();

    match output {
        Ok(out) => CliResult::from_output(out),
        Err(e) => CliResult {
            success: false,
            exit_code: -1,
            stdout: String::new(),
            stderr: format!("Failed to run CLI: {}", e),
        },
    }
}

fn workspace_manifest_path() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let manifest_path = manifest_dir.join("..").join("..").join("Cargo.toml");
        manifest_path.canonicalize().unwrap_or(manifest_path)
    })
    .clone()
}

/// Read and validate a GLB file.
pub fn validate_glb_file(path: &Path) -> Result<GlbInfo, String> {
    let data = fs::read(path).map_err(|e| format!("Failed to read file: {}", e))?;
    format_validators::validate_glb(&data).map_err(|e| e.to_string())
}
