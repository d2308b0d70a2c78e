//! CLI smoke tests run through `cargo run`.

use pbrpack_tests::harness::{run_cli, validate_glb_file};
use pbrpack_tests::AssetFixture;

#[test]
fn test_cli_convert_and_inspect() {
    let fixture = AssetFixture::new();
    fixture.add_cube("chair.obj");

    let result = run_cli(
        fixture.path(),
        &["convert", "chair.obj", "--size", "8", "--no-discover", "--json"],
    );
    result.assert_success();
    let report = result.json();
    let reported = report["output"].as_str().unwrap();
    assert!(reported.ends_with("chair.glb"));

    // The report echoes paths as given, relative to the CLI's cwd.
    let output = fixture.path().join(reported);
    assert!(output.is_file());

    let info = validate_glb_file(&output).unwrap();
    assert_eq!(info.count("images"), 2);

    let output = output.to_string_lossy().into_owned();
    let result = run_cli(fixture.path(), &["inspect", &output, "--json"]);
    result.assert_success();
    let summary = result.json();
    assert_eq!(summary["images"].as_array().unwrap().len(), 2);
    assert_eq!(summary["materials"][0]["name"], "PBR_Material");
}

#[test]
fn test_cli_synthesize_and_pack() {
    let fixture = AssetFixture::new();

    run_cli(fixture.path(), &["synthesize", "m.png", "--value", "0", "--size", "4"])
        .assert_success();
    run_cli(fixture.path(), &["synthesize", "r.png", "--value", "200", "--size", "4"])
        .assert_success();
    run_cli(fixture.path(), &["pack", "m.png", "r.png", "-o", "mr.png"]).assert_success();

    let data = std::fs::read(fixture.path().join("mr.png")).unwrap();
    let decoded = pbrpack_tests::decode_png(&data).unwrap();
    assert!(decoded.is_uniform(&[255, 200, 0]));
}

#[test]
fn test_cli_convert_missing_geometry_fails() {
    let fixture = AssetFixture::new();
    let result = run_cli(fixture.path(), &["convert", "missing.obj"]);
    result.assert_failure();
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("missing.obj"));
}
