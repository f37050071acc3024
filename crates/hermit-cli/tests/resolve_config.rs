//! Integration tests for `hermit resolve` driven by a templated JSON config.
//!
//! These tests verify:
//! - `--config` loads the mapping table and roots from JSON
//! - Resolved paths go to stdout, one per line
//! - Runtime built-ins print as `external <name>`
//! - A missing module exits nonzero and names specifier and importer

use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-p", "hermit-cli", "--bin", "hermit", "--"]);
    cmd
}

fn touch(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "export {};").unwrap();
}

/// Stage an output tree and write the config JSON; returns the config path.
fn write_fixture(root: &Path) -> std::path::PathBuf {
    touch(&root.join("out/libs/core/index.js"));
    touch(&root.join("out/libs/core/http.js"));
    touch(&root.join("out/src/main.js"));

    let config = root.join("resolve.json");
    std::fs::write(
        &config,
        format!(
            r#"{{
                "sandboxRoot": {:?},
                "rootDir": "out",
                "workspaceName": "myws",
                "moduleMappings": {{"@myws/core": "libs/core/index.d.ts"}}
            }}"#,
            root.to_str().unwrap()
        ),
    )
    .unwrap();
    config
}

#[test]
fn test_resolve_mapped_alias_from_config() {
    let dir = tempdir().unwrap();
    let config = write_fixture(dir.path());

    let output = cargo_bin()
        .args(["resolve", "@myws/core/http", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to run resolve command");

    assert!(output.status.success(), "resolve should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.trim().ends_with("out/libs/core/http.js"),
        "unexpected stdout: {stdout}"
    );
}

#[test]
fn test_resolve_builtin_prints_external() {
    let dir = tempdir().unwrap();
    let config = write_fixture(dir.path());

    let output = cargo_bin()
        .args(["resolve", "node:fs", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to run resolve command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "external node:fs");
}

#[test]
fn test_resolve_missing_module_fails_with_both_names() {
    let dir = tempdir().unwrap();
    let config = write_fixture(dir.path());
    let importer = dir.path().join("out/src/main.js");

    let output = cargo_bin()
        .args(["resolve", "left-pad", "--importer"])
        .arg(&importer)
        .arg("--config")
        .arg(&config)
        .output()
        .expect("Failed to run resolve command");

    assert!(!output.status.success(), "missing module should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("left-pad"), "stderr should name the specifier");
    assert!(stderr.contains("main.js"), "stderr should name the importer");
}

#[test]
fn test_flag_overrides_beat_config() {
    let dir = tempdir().unwrap();
    let config = write_fixture(dir.path());
    touch(&dir.path().join("staged/pkg/mod.js"));

    let output = cargo_bin()
        .args(["resolve", "myws/pkg/mod", "--output-root", "staged", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to run resolve command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.trim().ends_with("staged/pkg/mod.js"),
        "unexpected stdout: {stdout}"
    );
}
