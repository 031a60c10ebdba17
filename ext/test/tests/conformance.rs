//! Conformance tests that run YAML fixtures against pathex
//!
//! Run with: cargo test -p pathex-test --test conformance --features pathex-test/fixtures
//!
//! Note: This test file requires the `fixtures` feature to be enabled.

#![cfg(feature = "fixtures")]

use pathex_test::fixture::Fixture;
use std::fs;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Load and run every fixture in one file
fn run_fixture_file(name: &str) {
    init_tracing();

    let path = fixtures_dir().join(name);
    let yaml = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));

    // Parse potentially multiple fixtures (separated by ---)
    let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
        panic!("Failed to parse {}: {}", path.display(), e);
    });
    assert!(!fixtures.is_empty(), "{} has no fixtures", path.display());

    for fixture in fixtures {
        println!("  Running: {}", fixture.name);
        fixture.run_and_assert();
    }
}

#[test]
fn test_top_level() {
    run_fixture_file("01_top_level.yaml");
}

#[test]
fn test_components() {
    run_fixture_file("02_components.yaml");
}

#[test]
fn test_step_out() {
    run_fixture_file("03_step_out.yaml");
}

#[test]
fn test_options() {
    run_fixture_file("04_options.yaml");
}

#[test]
fn test_build_errors() {
    run_fixture_file("05_build_errors.yaml");
}

#[test]
fn test_every_fixture_file_is_listed() {
    let mut files: Vec<String> = fs::read_dir(fixtures_dir())
        .expect("read fixtures dir")
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".yaml") || name.ends_with(".yml"))
        .collect();
    files.sort();

    assert_eq!(
        files,
        vec![
            "01_top_level.yaml",
            "02_components.yaml",
            "03_step_out.yaml",
            "04_options.yaml",
            "05_build_errors.yaml",
        ]
    );
}
