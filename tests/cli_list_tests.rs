//! End-to-end tests for `keyboard-repack --list`.
#![cfg(unix)]

use std::process::Command;

mod fixtures;
use fixtures::*;

#[test]
fn test_list_prints_layouts() {
    let gaia = fake_gaia();

    let output = Command::new(repack_bin())
        .args(gaia.base_args())
        .arg("--list")
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "List should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["- el", "- en", "- fr", "- number"]);
}

#[test]
fn test_list_has_no_side_effects() {
    let gaia = fake_gaia();

    let output = Command::new(repack_bin())
        .args(gaia.base_args())
        .args(["--list", "-l", "fr"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(!gaia.build_log().exists(), "--list must not run the build");
    assert!(!gaia.root().join("build_stage").exists());
}

#[test]
fn test_list_missing_layouts_dir() {
    let gaia = fake_gaia();
    std::fs::remove_dir_all(gaia.root().join("apps")).unwrap();

    let output = Command::new(repack_bin())
        .args(gaia.base_args())
        .arg("--list")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2), "Missing layouts dir is an I/O error");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to list languages"));
}
