//! Boundary cases integration tests for the skeltree CLI.
//!
//! - Files with special characters and Unicode in names
//! - Deep directory nesting
//! - Many files in a single directory
//! - Empty directories and empty files

use crate::common::{TestFixture, snapshot};
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_special_character_names() {
    let fx = TestFixture::new();
    let names = [
        "with space.txt",
        "semi;colon.txt",
        "quote'single.txt",
        "paren (1).txt",
        "ümlaut-日本語.txt",
        "emoji-📁.bin",
    ];
    for name in names {
        fx.file(&format!("mixed/{name}"), 12);
    }

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(fx.src.path()).arg(fx.out()).assert().success();

    for name in names {
        let path = fx.out().join("mixed").join(name);
        assert_eq!(fs::metadata(&path).unwrap().len(), 0, "{name}");
    }
}

#[test]
fn test_deep_nesting() {
    let fx = TestFixture::new();
    let deep: String = (0..40).map(|i| format!("n{i}/")).collect();
    fx.file(&format!("{deep}leaf.txt"), 1);

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(fx.src.path())
        .arg(fx.out())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 40 folders and 1 files"));

    assert!(fx.out().join(format!("{deep}leaf.txt")).is_file());
}

#[test]
fn test_many_files_in_one_directory() {
    let fx = TestFixture::new();
    fx.create_files("flat", 1200);

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(fx.src.path())
        .arg(fx.out())
        .args(["-j", "8", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 1 folders and 1200 files"));

    assert_eq!(fs::read_dir(fx.out().join("flat")).unwrap().count(), 1200);
}

#[test]
fn test_empty_directories_and_files() {
    let fx = TestFixture::new();
    fx.dir("empty/nested/deeper");
    fx.file("zero.txt", 0);

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(fx.src.path()).arg(fx.out()).assert().success();

    assert_eq!(
        snapshot(&fx.out()),
        vec!["empty/", "empty/nested/", "empty/nested/deeper/", "zero.txt"]
    );
}

#[test]
fn test_destination_directory_where_file_expected() {
    let fx = TestFixture::new();
    fx.file("name", 3);
    fs::create_dir_all(fx.out().join("name/leftover")).unwrap();

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(fx.src.path()).arg(fx.out()).assert().success();

    assert!(fx.out().join("name").is_file());
}
