//! Progress line integration tests for the skeltree CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, snapshot};
use predicates::prelude::*;
use rstest::rstest;

fn progress_lines(stdout: &[u8], label: &str) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|line| line.starts_with(&format!("{label}: ")))
        .map(str::to_owned)
        .collect()
}

#[test]
fn test_folder_and_file_cadence() {
    let fx = TestFixture::new();
    for i in 0..5 {
        fx.dir(&format!("d{i}"));
    }
    fx.create_files("d0", 7);

    let output = cargo_bin_cmd!("skeltree")
        .arg(fx.src.path())
        .arg(fx.out())
        .args(["--dir-every", "2", "--file-every", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let folders = progress_lines(&output.stdout, "Folders");
    assert_eq!(folders.len(), 3, "{folders:?}");
    assert!(folders[0].starts_with("Folders: 2/5 (40.0%)"));
    assert!(folders[1].starts_with("Folders: 4/5 (80.0%)"));
    assert!(folders[2].starts_with("Folders: 5/5 (100.0%) - about 0s remaining"));

    let files = progress_lines(&output.stdout, "Files");
    let counts: Vec<&str> = files
        .iter()
        .map(|l| l.split_whitespace().nth(1).unwrap_or_default())
        .collect();
    assert_eq!(counts, vec!["3/7", "6/7", "7/7"]);
}

#[test]
fn test_folders_reported_before_files() {
    let fx = TestFixture::new();
    fx.create_files("a", 2);

    let output = cargo_bin_cmd!("skeltree")
        .arg(fx.src.path())
        .arg(fx.out())
        .args(["--dir-every", "1", "--file-every", "1"])
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let last_folder = stdout.rfind("Folders: ").unwrap();
    let first_file = stdout.find("Files: ").unwrap();
    assert!(last_folder < first_file);
}

#[test]
fn test_quiet_suppresses_progress() {
    let fx = TestFixture::new();
    fx.create_files("a", 3);

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(fx.src.path())
        .arg(fx.out())
        .args(["-q", "--file-every", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remaining").not())
        .stdout(predicate::str::contains("Created 1 folders and 3 files"));
}

#[test]
fn test_bar_mode_prints_no_lines() {
    let fx = TestFixture::new();
    fx.create_files("a", 3);

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(fx.src.path())
        .arg(fx.out())
        .arg("--bar")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files: ").not());

    assert_eq!(snapshot(&fx.out()).len(), 4);
}

#[rstest]
#[case::sequential("1")]
#[case::parallel("4")]
fn test_jobs_produce_same_tree(#[case] jobs: &str) {
    let fx = TestFixture::new();
    for d in 0..6 {
        fx.create_files(&format!("dir{d}/nested"), 10);
    }

    let output = cargo_bin_cmd!("skeltree")
        .arg(fx.src.path())
        .arg(fx.out())
        .args(["-j", jobs, "--file-every", "20"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let tree = snapshot(&fx.out());
    assert_eq!(tree.len(), 12 + 60);

    // One line per 20 files regardless of worker count; workers may print
    // them out of order
    let files = progress_lines(&output.stdout, "Files");
    assert_eq!(files.len(), 3);
    assert!(files.iter().any(|l| l.starts_with("Files: 60/60 (100.0%)")));
}
