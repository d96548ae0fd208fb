//! Basic functionality integration tests for the skeltree CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, snapshot};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_reference_tree() {
    let fx = TestFixture::new();
    fx.reference_tree();

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(fx.src.path())
        .arg(fx.out())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 3 folders and 1 files"));

    assert_eq!(snapshot(&fx.out()), vec!["a/", "a/b/", "a/b/file1.txt", "a/c/"]);
    assert!(!fx.out().join("a/.hidden").exists());

    // Source untouched
    assert_eq!(
        fs::metadata(fx.src.path().join("a/b/file1.txt")).unwrap().len(),
        10 * 1024
    );
}

#[test]
fn test_missing_destination_is_created() {
    let fx = TestFixture::new();
    fx.file("only.txt", 3);
    let out = fx.dst.path().join("deep/new/root");

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(fx.src.path()).arg(&out).assert().success();

    assert_eq!(snapshot(&out), vec!["only.txt"]);
}

#[test]
fn test_existing_destination_is_reused() {
    let fx = TestFixture::new();
    fx.file("a/new.txt", 5);
    fs::write(fx.dst.path().join("unrelated.txt"), "keep me").unwrap();

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(fx.src.path()).arg(fx.dst.path()).assert().success();

    assert!(fx.dst.path().join("a/new.txt").is_file());
    assert_eq!(
        fs::read_to_string(fx.dst.path().join("unrelated.txt")).unwrap(),
        "keep me"
    );
}

#[test]
fn test_empty_source() {
    let fx = TestFixture::new();

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(fx.src.path())
        .arg(fx.out())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 0 folders and 0 files"))
        .stdout(predicate::str::contains("remaining").not());

    assert!(fx.out().is_dir());
    assert!(snapshot(&fx.out()).is_empty());
}

#[test]
fn test_second_run_is_idempotent() {
    let fx = TestFixture::new();
    fx.reference_tree();
    fx.create_files("bulk", 20);

    for _ in 0..2 {
        let mut cmd = cargo_bin_cmd!("skeltree");
        cmd.arg(fx.src.path())
            .arg(fx.out())
            .assert()
            .success()
            .stdout(predicate::str::contains("Created 4 folders and 21 files"));
    }

    let tree = snapshot(&fx.out());
    assert_eq!(tree.len(), 4 + 21);
    assert!(tree.contains(&"bulk/file19.txt".to_string()));
}

#[test]
fn test_truncates_stale_destination_files() {
    let fx = TestFixture::new();
    fx.file("report.pdf", 64);
    fs::create_dir_all(fx.out()).unwrap();
    fs::write(fx.out().join("report.pdf"), "stale contents").unwrap();

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(fx.src.path()).arg(fx.out()).assert().success();

    assert_eq!(fs::metadata(fx.out().join("report.pdf")).unwrap().len(), 0);
}

#[test]
fn test_banner_and_summary_echo_paths() {
    let fx = TestFixture::new();
    fx.file("x.txt", 1);
    let src = fx.src.path().canonicalize().unwrap();

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(fx.src.path())
        .arg(fx.out())
        .assert()
        .success()
        .stdout(predicate::str::contains("Source: "))
        .stdout(predicate::str::contains("Destination: "))
        .stdout(predicate::str::contains(src.display().to_string()));
}

#[test]
fn test_destination_inside_source() {
    let fx = TestFixture::new();
    fx.file("docs/readme.md", 10);
    let out = fx.src.path().join("skeleton");

    for _ in 0..2 {
        let mut cmd = cargo_bin_cmd!("skeltree");
        cmd.arg(fx.src.path())
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains("Created 1 folders and 1 files"));
    }

    assert_eq!(snapshot(&out), vec!["docs/", "docs/readme.md"]);
}

#[test]
fn test_help() {
    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SOURCE"))
        .stdout(predicate::str::contains("--keep-going"));
}

#[test]
fn test_version() {
    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("skeltree"));
}

#[test]
fn test_missing_operands_is_usage_error() {
    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg("only-one").assert().failure().code(2);
}
