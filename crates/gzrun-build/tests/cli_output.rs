//! Integration tests for CLI output behavior
//!
//! The default behavior is quiet (no logs). Use -v/--verbose to enable logs.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn gzrun_build(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gzrun-build"))
        .arg("--root")
        .arg(root)
        .args(args)
        .output()
        .expect("Failed to execute 'gzrun-build'")
}

fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{} failed with exit code {:?}. stderr: {}",
        what,
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// A minimal front-end project with no compiler installed.
fn sample_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src/client")).unwrap();
    fs::write(
        dir.path().join("src/client/index.html"),
        "<html><body>gzrun</body></html>",
    )
    .unwrap();
    fs::write(dir.path().join("src/client/style.css"), "body { margin: 0; }").unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name":"gzrun","devDependencies":{"typescript":"^5"},"scripts":{"build":"gulp"}}"#,
    )
    .unwrap();
    dir
}

#[test]
fn test_tasks_lists_every_task_without_logs() {
    let project = sample_project();
    let output = gzrun_build(project.path(), &["tasks"]);
    assert_success(&output, "gzrun-build tasks");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    for name in [
        "clean",
        "scaffolding",
        "client@html",
        "client@css",
        "client@ts",
        "backend@ts",
        "client@html:watch",
        "client@css:watch",
        "client@ts:watch",
        "backend@ts:watch",
        "sync",
        "default",
        "watch",
        "serve",
    ] {
        assert!(
            stdout.lines().any(|line| line.split_whitespace().next() == Some(name)),
            "missing task '{}' in: {}",
            name,
            stdout
        );
    }

    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );
    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "Default mode should not emit INFO logs, got: {}",
        stderr
    );
}

#[test]
fn test_verbose_emits_json_logs_on_stderr() {
    let project = sample_project();
    let output = gzrun_build(project.path(), &["-v", "tasks"]);
    assert_success(&output, "gzrun-build -v tasks");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stdout.contains(r#""event":"#));
    assert!(
        stderr.contains(r#""event":"core.app.startup_completed""#),
        "expected startup event on stderr, got: {}",
        stderr
    );
}

#[test]
fn test_unknown_task_fails() {
    let project = sample_project();
    let output = gzrun_build(project.path(), &["run", "deploy"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("deploy"), "stderr: {}", stderr);
}

#[test]
fn test_scaffolding_writes_packaged_manifest() {
    let project = sample_project();
    let output = gzrun_build(project.path(), &["run", "scaffolding"]);
    assert_success(&output, "gzrun-build run scaffolding");

    let manifest = fs::read_to_string(project.path().join("dist/package.json")).unwrap();
    assert_eq!(
        manifest,
        "{\n  \"name\": \"gzrun\",\n  \"scripts\": {\n    \"start\": \"electron ./\"\n  },\n  \"main\": \"main.js\"\n}"
    );
}

#[test]
fn test_asset_copy_and_clean() {
    let project = sample_project();
    let output = gzrun_build(project.path(), &["run", "client@css"]);
    assert_success(&output, "gzrun-build run client@css");

    let copied = project.path().join("dist/client/style.css");
    assert_eq!(fs::read_to_string(&copied).unwrap(), "body { margin: 0; }");

    let output = gzrun_build(project.path(), &["clean"]);
    assert_success(&output, "gzrun-build clean");
    assert!(!project.path().join("dist").exists());
}

#[test]
fn test_clean_refuses_project_root_as_output() {
    let project = sample_project();
    fs::write(
        project.path().join("gzrun-build.toml"),
        "[paths]\nout_dir = \".\"\n",
    )
    .unwrap();

    let output = gzrun_build(project.path(), &["clean"]);
    assert!(!output.status.success());
    assert!(project.path().join("package.json").exists());
    assert!(project.path().join("src/client/index.html").exists());
    assert!(project.path().join("gzrun-build.toml").exists());
}

#[test]
fn test_missing_compiler_fails_the_build() {
    let project = sample_project();
    let output = gzrun_build(project.path(), &["build"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tsc"), "stderr: {}", stderr);
}

#[test]
fn test_non_loopback_host_is_rejected() {
    let project = sample_project();
    fs::write(
        project.path().join("gzrun-build.toml"),
        "[serve]\nhost = \"0.0.0.0\"\n",
    )
    .unwrap();

    let output = gzrun_build(project.path(), &["tasks"]);
    assert!(!output.status.success());
}

#[test]
fn test_completions_are_generated() {
    let output = Command::new(env!("CARGO_BIN_EXE_gzrun-build"))
        .args(["completions", "bash"])
        .output()
        .expect("Failed to execute 'gzrun-build completions bash'");
    assert_success(&output, "gzrun-build completions bash");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("gzrun-build"));
}
