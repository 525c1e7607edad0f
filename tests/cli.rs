//! CLI argument parsing and validation tests: no network I/O.
//!
//! These tests verify that invalid arguments are rejected before any cassette
//! or live adapter is consulted.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("thumbgen");
    cmd.env_remove("THUMBGEN_REPLAY")
        .env_remove("THUMBGEN_REC")
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .args(["--config", "/nonexistent/thumbgen/config.toml"]);
    cmd
}

#[test]
fn show_prompt_prints_fixed_prompt() {
    cmd()
        .arg("--show-prompt")
        .assert()
        .success()
        .stdout(predicate::str::contains("The Man behind the Mask"))
        .stderr(predicate::str::contains("Prompt Details"));
}

#[test]
fn prompt_argument_is_rejected() {
    cmd().arg("a cat").assert().failure();
}

#[test]
fn invalid_model_exits_with_error() {
    cmd()
        .args(["--model", "dall-e-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown provider for model"));
}

#[test]
fn invalid_aspect_ratio_exits_with_error() {
    // 21:9 is a Gemini ratio, not an Imagen one
    cmd()
        .args(["--model", "imagen-4", "--aspect-ratio", "21:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported aspect ratio"));
}

#[test]
fn missing_api_key_exits_with_error() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key for Gemini"))
        .stderr(predicate::str::contains("Generating").not());
}
