// End-to-end tests for the imosum binary
// Tests cover: usage text, hash mode, directory walks, check mode, exit status

#![cfg(feature = "cli")]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const HELLO_DIGEST: &str = "05d8a7b341bd9b025b1e906a48ae1d19";

fn imosum(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_imosum"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("IMOSUM_SAMPLE_SIZE")
        .env_remove("IMOSUM_SAMPLE_THRESHOLD")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

// ============================================================================
// Hash Mode
// ============================================================================

#[test]
fn test_no_paths_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    let output = imosum(dir.path(), &[]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("USAGE: imosum [-c] path1 path2..."));
}

#[test]
fn test_hash_single_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a"), b"hello").unwrap();

    let output = imosum(dir.path(), &["a"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), format!("{HELLO_DIGEST}  a\n"));
    assert_eq!(stderr(&output), "");
}

#[test]
fn test_directory_is_walked_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("d");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("b"), b"second").unwrap();
    fs::write(root.join("sub").join("c"), b"third").unwrap();
    fs::write(root.join("a"), b"hello").unwrap();

    let output = imosum(dir.path(), &["d"]);
    assert!(output.status.success());

    let out = stdout(&output);
    let paths: Vec<&str> = out
        .lines()
        .map(|line| line.split_once("  ").unwrap().1)
        .collect();
    assert_eq!(paths, vec!["d/a", "d/b", "d/sub/c"]);
    assert!(out.starts_with(&format!("{HELLO_DIGEST}  d/a\n")));
}

#[test]
fn test_sample_size_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("big"), [b'A'; 45]).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_imosum"))
        .args(["--sample-threshold", "45", "big"])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env("IMOSUM_SAMPLE_SIZE", "0")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "2d9123b54d37e9b8f94ab37a7eca6f40  big\n");
}

#[test]
fn test_missing_path_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a"), b"hello").unwrap();

    let output = imosum(dir.path(), &["a", "missing"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), format!("{HELLO_DIGEST}  a\n"));
    assert!(
        stderr(&output).starts_with("imosum: cannot stat 'missing'"),
        "stderr: {}",
        stderr(&output)
    );
}

// ============================================================================
// Check Mode
// ============================================================================

#[test]
fn test_check_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a"), b"hello").unwrap();
    fs::write(dir.path().join("b"), b"world").unwrap();

    let hashed = imosum(dir.path(), &["a", "b"]);
    assert!(hashed.status.success());
    fs::write(dir.path().join("sums"), hashed.stdout).unwrap();

    let output = imosum(dir.path(), &["-c", "sums"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "a: OK\nb: OK\n");
    assert_eq!(stderr(&output), "");
}

#[test]
fn test_check_mismatch_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a"), b"changed").unwrap();
    fs::write(dir.path().join("b"), b"hello").unwrap();
    fs::write(
        dir.path().join("sums"),
        format!("{HELLO_DIGEST}  a\n{HELLO_DIGEST}  b\n"),
    )
    .unwrap();

    let output = imosum(dir.path(), &["--check", "sums"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "a: FAILED\nb: OK\n");
    assert_eq!(
        stderr(&output),
        "imosum: WARNING: 1 computed checksum did NOT match\n"
    );
}

#[test]
fn test_check_missing_file_counts_as_failed() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("sums"),
        format!("{HELLO_DIGEST}  gone\n{HELLO_DIGEST}  also-gone\n"),
    )
    .unwrap();

    let output = imosum(dir.path(), &["-c", "sums"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "gone: FAILED\nalso-gone: FAILED\n");
    assert!(stderr(&output).contains("imosum: WARNING: 2 computed checksums did NOT match"));
}

#[test]
fn test_check_malformed_lines_only_warn() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a"), b"hello").unwrap();
    fs::write(
        dir.path().join("sums"),
        format!("not a manifest line\n{HELLO_DIGEST}  a\n"),
    )
    .unwrap();

    let output = imosum(dir.path(), &["-c", "sums"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "a: OK\n");
    assert_eq!(
        stderr(&output),
        "imosum: WARNING: 1 line is improperly formatted\n"
    );
}

#[test]
fn test_check_missing_manifest_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = imosum(dir.path(), &["-c", "nope"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("imosum: "));
}
