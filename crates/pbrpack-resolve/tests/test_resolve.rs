//! Resolution and conversion against real directory layouts.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use pbrpack_resolve::{convert, AssetResolver, Converter, NoDiscovery, ResolveError};
use pbrpack_spec::{BackendError, ConvertConfig, ConvertRequest, RoleOrigin, TextureMap, TextureRole};
use pbrpack_texture::codec::load_rgb;
use pbrpack_texture::synthesize_flat;
use pretty_assertions::assert_eq;

const TRIANGLE_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
f 1/1 2/2 3/3
";

fn write_obj(dir: &Path, name: &str) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, TRIANGLE_OBJ).unwrap();
    path
}

fn config() -> ConvertConfig {
    ConvertConfig {
        synthetic_size: 8,
        ..Default::default()
    }
}

fn set_mtime(path: &Path, secs: u64) {
    let file = std::fs::OpenOptions::new().write(true).open(path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_missing_metallic_discovered_next_to_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let geometry = write_obj(dir.path(), "crate.obj");
    let older = synthesize_flat(&dir.path().join("a_metallic.png"), 10, 4).unwrap();
    let newer = synthesize_flat(&dir.path().join("b_metallic.png"), 240, 4).unwrap();
    set_mtime(&older, 1_700_000_000);
    set_mtime(&newer, 1_700_000_500);

    let asset = AssetResolver::new(config())
        .resolve(&geometry, &TextureMap::new(), None)
        .unwrap();

    assert_eq!(asset.textures().get(TextureRole::Metallic), Some(newer.as_path()));
    assert_eq!(
        asset.origin(TextureRole::Metallic),
        Some(RoleOrigin::Discovered)
    );
    assert_eq!(
        asset.origin(TextureRole::Roughness),
        Some(RoleOrigin::Synthesized)
    );

    let packed = load_rgb(asset.textures().get(TextureRole::MetallicRoughness).unwrap()).unwrap();
    assert_eq!(packed.dimensions(), (4, 4));
    assert!(packed.data.chunks(3).all(|px| px == [255, 128, 240]));
}

#[test]
fn test_discovery_searches_supplied_metallic_dir() {
    let dir = tempfile::tempdir().unwrap();
    let geometry = write_obj(&dir.path().join("models"), "crate.obj");
    let tex = dir.path().join("tex");
    std::fs::create_dir_all(&tex).unwrap();
    let roughness = synthesize_flat(&tex.join("crate_roughness.png"), 77, 4).unwrap();

    // Metallic is named but absent; its directory is still the search anchor
    let textures = TextureMap::new().with(TextureRole::Metallic, tex.join("gone_metallic.png"));
    let asset = AssetResolver::new(config())
        .resolve(&geometry, &textures, None)
        .unwrap();

    assert_eq!(asset.textures().get(TextureRole::Roughness), Some(roughness.as_path()));
    assert_eq!(asset.work_dir(), tex.as_path());
}

#[test]
fn test_supplied_paths_win_over_discovery() {
    let dir = tempfile::tempdir().unwrap();
    let geometry = write_obj(dir.path(), "crate.obj");
    synthesize_flat(&dir.path().join("other_metallic.png"), 200, 4).unwrap();
    let supplied = synthesize_flat(&dir.path().join("mine.png"), 50, 4).unwrap();

    let textures = TextureMap::new().with(TextureRole::Metallic, &supplied);
    let asset = AssetResolver::with_discovery(config(), NoDiscovery)
        .resolve(&geometry, &textures, None)
        .unwrap();
    assert_eq!(asset.textures().get(TextureRole::Metallic), Some(supplied.as_path()));
    assert_eq!(asset.origin(TextureRole::Metallic), Some(RoleOrigin::Supplied));
}

// ============================================================================
// Naming
// ============================================================================

#[test]
fn test_placeholder_output_uses_safe_base_name() {
    let dir = tempfile::tempdir().unwrap();
    let geometry = write_obj(dir.path(), "obj.obj");

    let asset = AssetResolver::with_discovery(config(), NoDiscovery)
        .resolve(&geometry, &TextureMap::new(), Some(Path::new(".glb")))
        .unwrap();

    assert_eq!(asset.work_dir(), dir.path().join("temp").as_path());
    assert_eq!(asset.output(), dir.path().join("temp/asset.glb").as_path());
}

#[test]
fn test_explicit_output_kept() {
    let dir = tempfile::tempdir().unwrap();
    let geometry = write_obj(dir.path(), "chair.obj");
    let output = dir.path().join("dist/chair_final.glb");

    let asset = AssetResolver::with_discovery(config(), NoDiscovery)
        .resolve(&geometry, &TextureMap::new(), Some(output.as_path()))
        .unwrap();
    assert_eq!(asset.output(), output.as_path());
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_convert_reports_hash_of_written_file() {
    let dir = tempfile::tempdir().unwrap();
    let geometry = write_obj(dir.path(), "chair.obj");
    let request = ConvertRequest::new(&geometry).output(dir.path().join("out/chair.glb"));

    let report = convert(&request, &config()).unwrap();
    let bytes = std::fs::read(&report.output).unwrap();

    assert_eq!(report.size, bytes.len() as u64);
    assert_eq!(report.blake3, blake3_hex(&bytes));
    assert_eq!(
        report.synthesized(),
        vec![TextureRole::Albedo, TextureRole::Metallic, TextureRole::Roughness]
    );
    assert!(report.discovered().is_empty());
}

#[test]
fn test_convert_twice_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let geometry = write_obj(dir.path(), "chair.obj");
    let request = ConvertRequest::new(&geometry);
    let converter = Converter::new(config());

    let first = converter.convert(&request).unwrap();
    let second = converter.convert(&request).unwrap();
    assert_eq!(first.output, second.output);
    assert_eq!(first.blake3, second.blake3);
}

#[test]
fn test_convert_missing_geometry_fails_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let request = ConvertRequest::new(dir.path().join("nope.obj"));

    let err = convert(&request, &config()).unwrap_err();
    assert!(matches!(err, ResolveError::Container(_)));
    assert_eq!(err.category(), "container");
    assert!(err.to_string().contains("nope.obj"));
}

fn blake3_hex(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}
