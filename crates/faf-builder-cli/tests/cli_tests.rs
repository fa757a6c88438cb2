//! Integration tests for the `zero-faf` CLI binary.
//!
//! These run the CLI as a subprocess and check exit codes and output.
//! Clipboard copying is not exercised here since it depends on the host's
//! clipboard tools.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::process::Command;

/// Helper: locate the `zero-faf` binary built by `cargo test`.
fn zero_faf_bin() -> String {
    let path = env!("CARGO_BIN_EXE_zero-faf");
    assert!(
        Path::new(path).exists(),
        "zero-faf binary not found at {path}"
    );
    path.to_owned()
}

/// Helper: run zero-faf with args and extra env, return (`exit_code`, stdout, stderr).
fn run_with_env(args: &[&str], env: &[(&str, &str)]) -> (i32, String, String) {
    let mut cmd = Command::new(zero_faf_bin());
    cmd.args(args)
        .env_remove("FAF_MCP_SERVER_URL")
        .env_remove("FAF_TEMPLATE_REPO_URL")
        .env_remove("FAF_SUBMIT_DELAY_MS")
        .env_remove("RUST_LOG");
    for (key, value) in env {
        cmd.env(key, value);
    }
    let output = cmd.output().expect("failed to execute zero-faf");

    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

fn run(args: &[&str]) -> (i32, String, String) {
    run_with_env(args, &[])
}

// ── Version & help ───────────────────────────────────────────────────

#[test]
fn test_version_flag() {
    let (code, stdout, _) = run(&["--version"]);
    assert_eq!(code, 0, "zero-faf --version should exit 0");
    assert!(stdout.contains("zero-faf"), "version output: {stdout}");
}

#[test]
fn test_help_flag() {
    let (code, stdout, _) = run(&["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Zero-FAF-Builder CLI"));
    for sub in ["command", "deploy-link", "validate", "submit"] {
        assert!(stdout.contains(sub), "help should list '{sub}': {stdout}");
    }
}

#[test]
fn test_no_subcommand_is_usage_error() {
    let (code, _, stderr) = run(&[]);
    assert_eq!(code, 2, "clap usage errors exit 2");
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}

// ── Setup command & deploy link ──────────────────────────────────────

#[test]
fn test_command_prints_default_setup_command() {
    let (code, stdout, _) = run(&["command"]);
    assert_eq!(code, 0);
    assert_eq!(
        stdout.trim(),
        "npx faf-cli@latest init --mcp=https://grok-faf-mcp.vercel.app"
    );
}

#[test]
fn test_command_flag_overrides_mcp_server() {
    let (code, stdout, _) = run(&["--mcp-server-url", "https://mcp.example.dev", "command"]);
    assert_eq!(code, 0);
    assert_eq!(
        stdout.trim(),
        "npx faf-cli@latest init --mcp=https://mcp.example.dev"
    );
}

#[test]
fn test_command_env_overrides_mcp_server() {
    let (code, stdout, _) = run_with_env(
        &["command"],
        &[("FAF_MCP_SERVER_URL", "https://env.example.dev")],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("--mcp=https://env.example.dev"), "stdout: {stdout}");
}

#[test]
fn test_deploy_link_default() {
    let (code, stdout, _) = run(&["deploy-link"]);
    assert_eq!(code, 0);
    assert_eq!(
        stdout.trim(),
        "https://vercel.com/new/clone?repository-url=https%3A%2F%2Fgithub.com%2Fwolfe-jam%2Fzero-faf-builder&project-name=zero-faf-project&repository-name=zero-faf-project"
    );
}

#[test]
fn test_deploy_link_template_override() {
    let (code, stdout, _) = run(&[
        "deploy-link",
        "--template-repo-url",
        "https://github.com/acme/starter",
    ]);
    assert_eq!(code, 0);
    assert!(
        stdout.contains("repository-url=https%3A%2F%2Fgithub.com%2Facme%2Fstarter"),
        "stdout: {stdout}"
    );
}

// ── Validate ─────────────────────────────────────────────────────────

#[test]
fn test_validate_malformed_url() {
    let (code, _, stderr) = run(&["validate", "not-a-url"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid URL format"), "stderr: {stderr}");
}

#[test]
fn test_validate_non_github_host() {
    let (code, _, stderr) = run(&["validate", "https://google.com"]);
    assert_eq!(code, 1);
    assert!(
        stderr.contains("Please enter a valid GitHub URL"),
        "stderr: {stderr}"
    );
}

#[test]
fn test_validate_empty_input() {
    let (code, _, stderr) = run(&["validate", ""]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Please enter a GitHub URL"), "stderr: {stderr}");
}

#[test]
fn test_validate_github_url_prints_clone_preview() {
    let (code, stdout, _) = run(&["validate", "https://github.com/vercel/next.js"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Valid GitHub URL"));
    assert!(stdout.contains("vercel/next.js"));
    assert!(stdout.contains("git clone https://github.com/vercel/next.js"));
    assert!(stdout.contains("cd next.js"));
    assert!(stdout.contains("npx grok-faf-mcp init"));
}

// ── Submit ───────────────────────────────────────────────────────────

#[test]
fn test_submit_valid_url_completes() {
    let (code, stdout, stderr) = run_with_env(
        &["submit", "https://github.com/vercel/next.js"],
        &[("FAF_SUBMIT_DELAY_MS", "10")],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Injecting FAF..."));
    assert!(stdout.contains("https://github.com/vercel/next.js is ready with project.faf"));
}

#[test]
fn test_submit_invalid_url_fails_without_injecting() {
    let (code, stdout, stderr) = run(&["submit", "not-a-url"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid URL format"), "stderr: {stderr}");
    assert!(!stdout.contains("Injecting FAF..."));
}
