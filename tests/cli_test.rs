mod common;

use common::TestRepo;
use std::fs;
use std::process::Command;

fn git_relnotes() -> Command {
    Command::new(env!("CARGO_BIN_EXE_git-relnotes"))
}

#[test]
fn test_help() {
    let output = git_relnotes().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("--get-release-notes"));
    assert!(stdout.contains("--compare-release-notes"));
}

#[test]
fn test_mode_is_required() {
    let output = git_relnotes().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_modes_are_exclusive() {
    let output = git_relnotes()
        .args(["--get-release-notes", "--compare-release-notes"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_print_tag_with_libgit2_backend() {
    let repo = TestRepo::new();
    let first = repo.commit("initial");
    repo.tag("v1.4.0", first);
    repo.commit("fix: later");

    let config_dir = tempfile::TempDir::new().unwrap();
    let config_path = config_dir.path().join("relnotes.toml");
    fs::write(
        &config_path,
        "[repository]\nbackend = \"libgit2\"\nmark_safe_directory = false\n",
    )
    .unwrap();

    let output = git_relnotes()
        .arg("--print-tag")
        .arg("--config")
        .arg(&config_path)
        .arg("--checkout-dir")
        .arg(repo.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), "v1.4.0");
}

#[test]
fn test_print_tag_without_tags_exits_nonzero() {
    let repo = TestRepo::new();
    repo.commit("initial");

    let config_dir = tempfile::TempDir::new().unwrap();
    let config_path = config_dir.path().join("relnotes.toml");
    fs::write(
        &config_path,
        "[repository]\nbackend = \"libgit2\"\nmark_safe_directory = false\n",
    )
    .unwrap();

    let output = git_relnotes()
        .arg("--print-tag")
        .arg("--config")
        .arg(&config_path)
        .arg("--checkout-dir")
        .arg(repo.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Tag not found"), "stderr: {}", stderr);
}
