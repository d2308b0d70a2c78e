//! pbrpack asset resolution.
//!
//! Completes a partial texture map for one geometry file, then drives the
//! container build:
//!
//! 1. pick a working directory (explicit, or the first existing of the
//!    metallic dir, the roughness dir, `<geometry dir>/temp`, `<search root>/temp`)
//! 2. derive the output path (`<work dir>/<base>.glb` for placeholders)
//! 3. look for missing metallic and roughness maps via [`TextureDiscovery`]
//! 4. synthesize whatever is still missing
//! 5. pack metallic and roughness into one map
//!
//! [`convert`] runs all of the above followed by the container build.

pub mod convert;
pub mod discovery;
pub mod error;
pub mod resolver;
pub mod workdir;

pub use convert::{convert, ConversionReport, Converter};
pub use discovery::{GlobDiscovery, NoDiscovery, TextureDiscovery};
pub use error::{ResolveError, ResolveResult};
pub use resolver::AssetResolver;
pub use workdir::{is_placeholder_output, resolve_output, resolve_work_dir, safe_base_name};
