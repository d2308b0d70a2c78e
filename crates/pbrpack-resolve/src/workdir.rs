//! Working-directory and output-path policy.

use std::path::{Path, PathBuf};

use log::debug;
use pbrpack_spec::{ConvertConfig, TextureMap, TextureRole};

use crate::error::{ResolveError, ResolveResult};

/// Directory name probed beside the geometry and under the search root.
pub const TEMP_DIR_NAME: &str = "temp";

/// Parent directory of `path`, with an empty parent read as `.`.
pub fn parent_or_current(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Non-empty parent of a supplied role path, if any.
fn supplied_parent(textures: &TextureMap, role: TextureRole) -> Option<PathBuf> {
    textures
        .get(role)
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// Candidate working directories in priority order.
///
/// The metallic directory, the roughness directory, `<geometry dir>/temp` and
/// `<search root>/temp` (only when a search root is configured).
pub fn work_dir_candidates(
    geometry: &Path,
    textures: &TextureMap,
    config: &ConvertConfig,
) -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(4);
    candidates.extend(supplied_parent(textures, TextureRole::Metallic));
    candidates.extend(supplied_parent(textures, TextureRole::Roughness));
    candidates.push(parent_or_current(geometry).join(TEMP_DIR_NAME));
    if let Some(root) = &config.search_root {
        candidates.push(root.join(TEMP_DIR_NAME));
    }
    candidates
}

/// Pick the working directory, creating it if needed.
///
/// An explicit `config.work_dir` wins and is created. Otherwise the first
/// existing candidate is used, and if none exists `<geometry dir>/temp` is
/// created.
pub fn resolve_work_dir(
    geometry: &Path,
    textures: &TextureMap,
    config: &ConvertConfig,
) -> ResolveResult<PathBuf> {
    if let Some(dir) = &config.work_dir {
        create_dir(dir)?;
        debug!("using configured work dir {}", dir.display());
        return Ok(dir.clone());
    }

    if let Some(dir) = work_dir_candidates(geometry, textures, config)
        .into_iter()
        .find(|dir| dir.is_dir())
    {
        debug!("using existing work dir {}", dir.display());
        return Ok(dir);
    }

    let dir = parent_or_current(geometry).join(TEMP_DIR_NAME);
    create_dir(&dir)?;
    debug!("created work dir {}", dir.display());
    Ok(dir)
}

fn create_dir(dir: &Path) -> ResolveResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| ResolveError::CreateWorkDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Base name for the output container.
///
/// The geometry stem, unless it is empty, starts with a dot, or is the
/// placeholder `obj` (any case); then `fallback`.
pub fn safe_base_name(geometry: &Path, fallback: &str) -> String {
    let stem = geometry
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if stem.is_empty() || stem.starts_with('.') || stem.eq_ignore_ascii_case("obj") {
        fallback.to_string()
    } else {
        stem
    }
}

/// True if `output` is absent, empty, names a directory, or is a bare `.<ext>`.
pub fn is_placeholder_output(output: Option<&Path>, extension: &str) -> bool {
    let Some(output) = output else {
        return true;
    };
    let text = output.to_string_lossy();
    if text.is_empty() || text.ends_with(std::path::is_separator) {
        return true;
    }
    match output.file_name() {
        None => true,
        Some(name) => {
            let name = name.to_string_lossy();
            name.is_empty() || name.eq_ignore_ascii_case(&format!(".{extension}"))
        }
    }
}

/// Final output path: the caller's path, or `<work_dir>/<base>.<ext>` for a placeholder.
pub fn resolve_output(
    output: Option<&Path>,
    work_dir: &Path,
    base_name: &str,
    extension: &str,
) -> PathBuf {
    match output {
        Some(path) if !is_placeholder_output(Some(path), extension) => path.to_path_buf(),
        _ => work_dir.join(format!("{base_name}.{extension}")),
    }
}
