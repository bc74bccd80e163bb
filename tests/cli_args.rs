//! Tests for the `taskline` binary.
//!
//! Each test writes a task catalog to a temporary directory and runs the
//! actual binary against it.

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

const CONFIG: &str = r#"
[[targets]]
name = "test"
project = ":app"
[[targets.options]]
name = "tests"
description = "Only run tests matching this filter"

[[targets]]
name = "clean"
[[targets.options]]
name = "all"
type = "flag"
"#;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).expect("Failed to write config");
    path
}

fn taskline(args: &[&str]) -> Output {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&dir, CONFIG);

    Command::new(env!("CARGO_BIN_EXE_taskline"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("TASKLINE_LOG")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_help_shows_config_option() {
    let output = Command::new(env!("CARGO_BIN_EXE_taskline"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("Config file declaring the available tasks"));
}

#[test]
fn test_prints_configured_tasks() {
    let output = taskline(&["test", "--tests", "Foo", "clean", "--all"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), [":app:test --tests=Foo", ":clean --all"]);
}

#[test]
fn test_json_output() {
    let output = taskline(&["--json", "clean", "--all"]);

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json[0]["path"], ":clean");
    assert_eq!(json[0]["options"]["all"], true);
}

#[test]
fn test_unknown_task_exits_with_error() {
    let output = taskline(&["publish"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Task 'publish' not found."));
}

#[test]
fn test_missing_option_value_shows_cause() {
    let output = taskline(&["test", "--tests"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Problem configuring task :app:test from command line."),
        "unexpected stderr: {}",
        stderr
    );
    assert!(stderr.contains("No argument was provided for command-line option '--tests'."));
}

#[test]
fn test_config_loading_is_logged() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&dir, CONFIG);

    let output = Command::new(env!("CARGO_BIN_EXE_taskline"))
        .arg("--config")
        .arg(&config)
        .arg("clean")
        .env_remove("TASKLINE_LOG")
        .env("RUST_LOG", "taskline=debug")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Loaded config"), "unexpected stderr: {}", stderr);
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let output = Command::new(env!("CARGO_BIN_EXE_taskline"))
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("clean")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read config file"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(
        &dir,
        r#"
        [[targets]]
        name = "run"
        [[targets.options]]
        name = "mode"
        type = "choice"
        "#,
    );

    let output = Command::new(env!("CARGO_BIN_EXE_taskline"))
        .arg("--config")
        .arg(&config)
        .arg("run")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Config validation failed"));
}
