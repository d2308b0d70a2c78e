//! pbrpack End-to-End Test Infrastructure
//!
//! This crate exercises the whole conversion flow:
//!
//! - Conversion: geometry + textures -> GLB
//! - Validation: container layout and embedded image contents
//! - **Determinism**: byte-identical output across runs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pbrpack-tests
//! ```

pub mod determinism;
pub mod fixtures;
pub mod format_validators;
pub mod harness;

// Re-export commonly used items
pub use determinism::{compute_hash, verify_determinism, DeterminismResult, DiffInfo};
pub use fixtures::AssetFixture;
pub use format_validators::{decode_png, validate_glb, validate_png, FormatError, GlbInfo, PngInfo};
