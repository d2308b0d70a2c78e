//! Best-effort lookup of sibling texture files.
//!
//! [`GlobDiscovery`] scans a directory for `*_<role>.*` and picks the most
//! recently modified match. With several assets in one directory it can pick
//! an unrelated file; callers that need certainty should supply paths
//! explicitly or plug in their own [`TextureDiscovery`].

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::debug;
use pbrpack_spec::TextureRole;

/// Locates an existing file for a texture role inside a directory.
pub trait TextureDiscovery {
    fn discover(&self, role: TextureRole, dir: &Path) -> Option<PathBuf>;
}

/// Newest file matching `*_<role>.*`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobDiscovery;

impl GlobDiscovery {
    /// Glob pattern for `role` inside `dir`, or `None` if `dir` is not UTF-8.
    pub fn pattern(role: TextureRole, dir: &Path) -> Option<String> {
        let dir = dir.to_str()?;
        let escaped = glob::Pattern::escape(dir);
        let file = format!("*_{}.*", role.as_str());
        if escaped.is_empty() {
            Some(file)
        } else if escaped.ends_with(std::path::is_separator) {
            Some(format!("{escaped}{file}"))
        } else {
            Some(format!("{escaped}{}{file}", std::path::MAIN_SEPARATOR))
        }
    }
}

impl TextureDiscovery for GlobDiscovery {
    fn discover(&self, role: TextureRole, dir: &Path) -> Option<PathBuf> {
        let pattern = Self::pattern(role, dir)?;
        let entries = glob::glob(&pattern).ok()?;

        let newest = entries
            .filter_map(Result::ok)
            .filter(|path| path.is_file())
            .map(|path| {
                let modified = std::fs::metadata(&path)
                    .and_then(|m| m.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                (modified, path)
            })
            .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
            .map(|(_, path)| path);

        if let Some(path) = &newest {
            debug!("discovered {} texture {}", role, path.display());
        }
        newest
    }
}

/// Never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiscovery;

impl TextureDiscovery for NoDiscovery {
    fn discover(&self, _role: TextureRole, _dir: &Path) -> Option<PathBuf> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn touch(path: &Path, modified: SystemTime) {
        let file = std::fs::File::create(path).unwrap();
        file.set_modified(modified).unwrap();
    }

    #[test]
    fn test_pattern() {
        let pattern = GlobDiscovery::pattern(TextureRole::Roughness, Path::new("tex")).unwrap();
        assert!(pattern.starts_with("tex"));
        assert!(pattern.ends_with("*_roughness.*"));
        assert_eq!(
            GlobDiscovery::pattern(TextureRole::Metallic, Path::new("")).unwrap(),
            "*_metallic.*"
        );
    }

    #[test]
    fn test_picks_newest() {
        let dir = tempfile::tempdir().unwrap();
        let base = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        touch(&dir.path().join("old_metallic.png"), base);
        touch(
            &dir.path().join("new_metallic.jpg"),
            base + Duration::from_secs(60),
        );
        touch(
            &dir.path().join("newer_roughness.png"),
            base + Duration::from_secs(120),
        );

        let found = GlobDiscovery
            .discover(TextureRole::Metallic, dir.path())
            .unwrap();
        assert_eq!(found.file_name().unwrap(), "new_metallic.jpg");
    }

    #[test]
    fn test_no_match() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("albedo.png"), b"x").unwrap();
        assert!(GlobDiscovery
            .discover(TextureRole::Roughness, dir.path())
            .is_none());
        assert!(GlobDiscovery
            .discover(TextureRole::Roughness, &dir.path().join("missing"))
            .is_none());
    }

    #[test]
    fn test_directories_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("set_metallic.d")).unwrap();
        assert!(GlobDiscovery
            .discover(TextureRole::Metallic, dir.path())
            .is_none());
    }

    #[test]
    fn test_glob_metacharacters_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let tricky = dir.path().join("scan [v2]");
        std::fs::create_dir(&tricky).unwrap();
        std::fs::write(tricky.join("a_metallic.png"), b"x").unwrap();

        let found = GlobDiscovery.discover(TextureRole::Metallic, &tricky);
        assert_eq!(found, Some(tricky.join("a_metallic.png")));
    }

    #[test]
    fn test_no_discovery() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a_metallic.png"), b"x").unwrap();
        assert!(NoDiscovery
            .discover(TextureRole::Metallic, dir.path())
            .is_none());
    }
}
