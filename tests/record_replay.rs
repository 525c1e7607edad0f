//! Cassette replay integration tests: zero network I/O.
//!
//! All tests set `THUMBGEN_REPLAY` to a cassette file path so that the binary
//! never contacts a live API endpoint.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("thumbgen");
    cmd.env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env_remove("THUMBGEN_REC")
        .env_remove("RUST_LOG");
    cmd
}

/// Absolute path to the `test_fixtures` directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_fixtures")
}

fn fresh_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn success_saves_decoded_thumbnail() {
    let cassette = fixtures_dir().join("thumbnail_ok.cassette.yaml");
    let dir = fresh_dir("thumbgen_test_success");
    let out = dir.join("thumb.jpg");

    cmd()
        .env("THUMBGEN_REPLAY", cassette.to_str().unwrap())
        .args(["--config", dir.join("missing.toml").to_str().unwrap()])
        .args(["--output", out.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Generating your masterpiece..."))
        .stderr(predicate::str::contains("Saved:"));

    assert_eq!(std::fs::read(&out).unwrap(), b"ABC");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn default_download_name_is_ai_thumbnail() {
    let cassette = fixtures_dir().join("thumbnail_ok.cassette.yaml");
    let dir = fresh_dir("thumbgen_test_default_name");

    cmd()
        .env("THUMBGEN_REPLAY", cassette.to_str().unwrap())
        .args(["--config", dir.join("missing.toml").to_str().unwrap()])
        .current_dir(&dir)
        .assert()
        .success();

    let files: Vec<_> = std::fs::read_dir(&dir).unwrap().flatten().collect();
    assert_eq!(files.len(), 1, "Exactly one file should be created");
    assert_eq!(files[0].file_name().to_string_lossy(), "ai-thumbnail.jpg");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn data_uri_is_printed_on_request() {
    let cassette = fixtures_dir().join("thumbnail_ok.cassette.yaml");
    let dir = fresh_dir("thumbgen_test_data_uri");

    cmd()
        .env("THUMBGEN_REPLAY", cassette.to_str().unwrap())
        .args(["--config", dir.join("missing.toml").to_str().unwrap()])
        .args(["--output", dir.join("thumb.jpg").to_str().unwrap(), "--data-uri"])
        .assert()
        .success()
        .stdout(predicate::str::diff("data:image/jpeg;base64,QUJD\n"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn config_default_output_is_used() {
    let cassette = fixtures_dir().join("thumbnail_ok.cassette.yaml");
    let dir = fresh_dir("thumbgen_test_config_output");
    let out = dir.join("from-config.jpg");
    let config = dir.join("config.toml");
    std::fs::write(&config, format!("[defaults]\noutput = {:?}\n", out.to_str().unwrap()))
        .unwrap();

    cmd()
        .env("THUMBGEN_REPLAY", cassette.to_str().unwrap())
        .args(["--config", config.to_str().unwrap()])
        .assert()
        .success();

    assert!(out.exists(), "Config output path should have been used");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn replayed_failure_shows_message_and_exits_nonzero() {
    let cassette = fixtures_dir().join("thumbnail_rate_limited.cassette.yaml");
    let dir = fresh_dir("thumbgen_test_failure");
    let out = dir.join("thumb.jpg");

    cmd()
        .env("THUMBGEN_REPLAY", cassette.to_str().unwrap())
        .args(["--config", dir.join("missing.toml").to_str().unwrap()])
        .args(["--output", out.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Generation Failed\nrate limited"))
        .stderr(predicate::str::contains("Saved:").not());

    assert!(!out.exists(), "No download should exist after a failure");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn failure_without_message_uses_generic_text() {
    let dir = fresh_dir("thumbgen_test_unknown_failure");
    let cassette = dir.join("empty_err.cassette.yaml");
    std::fs::write(
        &cassette,
        "name: empty-err\nrecorded_at: \"2026-10-18T00:00:00Z\"\ncommit: test\ninteractions:\n  - seq: 0\n    port: image_generator\n    method: generate\n    input: {}\n    output:\n      Err: null\n",
    )
    .unwrap();

    cmd()
        .env("THUMBGEN_REPLAY", cassette.to_str().unwrap())
        .args(["--config", dir.join("missing.toml").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("An unknown error occurred."));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_cassette_is_a_config_error() {
    let dir = fresh_dir("thumbgen_test_missing_cassette");

    cmd()
        .env("THUMBGEN_REPLAY", dir.join("nope.cassette.yaml").to_str().unwrap())
        .args(["--config", dir.join("missing.toml").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load cassette"));

    let _ = std::fs::remove_dir_all(&dir);
}
