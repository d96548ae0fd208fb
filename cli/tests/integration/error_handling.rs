//! Error handling integration tests for the skeltree CLI.
//!
//! These tests verify:
//! - Source validation happens before anything is created
//! - Destination problems are reported with a stable error code
//! - Abort versus keep-going on unreadable entries

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_missing_source_leaves_destination_untouched() {
    let fx = TestFixture::new();
    let missing = fx.src.path().join("does/not/exist");

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(&missing)
        .arg(fx.out())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error[source_not_found]"));

    assert!(!fx.out().exists());
}

#[test]
fn test_source_is_a_file() {
    let fx = TestFixture::new();
    fx.file("plain.txt", 4);

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(fx.src.path().join("plain.txt"))
        .arg(fx.out())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[not_a_directory]"));
}

#[test]
fn test_destination_is_a_file() {
    let fx = TestFixture::new();
    fx.file("a.txt", 1);
    let occupied = fx.dst.path().join("occupied");
    fs::write(&occupied, "x").unwrap();

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(fx.src.path())
        .arg(&occupied)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[destination_create]"));

    assert_eq!(fs::read_to_string(&occupied).unwrap(), "x");
}

#[test]
fn test_source_inside_destination_is_refused() {
    let fx = TestFixture::new();
    let src = fx.dst.path().join("inner");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("precious.txt"), "data").unwrap();

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(&src)
        .arg(fx.dst.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("error[invalid_input]"));

    assert_eq!(fs::read_to_string(src.join("precious.txt")).unwrap(), "data");
}

#[test]
fn test_max_depth_aborts_by_default() {
    let fx = TestFixture::new();
    fx.dir("l1/l2/l3");

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(fx.src.path())
        .arg(fx.out())
        .arg("--max-depth")
        .arg("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[max_depth_exceeded]"));
}

#[test]
fn test_max_depth_with_keep_going_is_partial() {
    let fx = TestFixture::new();
    fx.dir("l1/l2/l3");

    let mut cmd = cargo_bin_cmd!("skeltree");
    cmd.arg(fx.src.path())
        .arg(fx.out())
        .args(["--max-depth", "1", "--keep-going"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Created 2 folders and 0 files"))
        .stdout(predicate::str::contains("Failed:      1\n"))
        .stderr(predicate::str::contains("warning: Maximum depth 1 exceeded").count(1))
        .stderr(predicate::str::contains("error[partial_failure]"));

    assert!(fx.out().join("l1/l2").is_dir());
    assert!(!fx.out().join("l1/l2/l3").exists());
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use common::running_as_root;
    use std::os::unix::fs::PermissionsExt;

    /// Restores permissions on drop so the temp dir can be removed.
    struct Locked(std::path::PathBuf);

    impl Locked {
        fn new(path: std::path::PathBuf) -> Self {
            fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();
            Self(path)
        }
    }

    impl Drop for Locked {
        fn drop(&mut self) {
            let _ = fs::set_permissions(&self.0, fs::Permissions::from_mode(0o755));
        }
    }

    fn locked_fixture() -> (TestFixture, Locked) {
        let fx = TestFixture::new();
        fx.file("readable/ok.txt", 2);
        fx.file("secret/inner.txt", 2);
        let lock = Locked::new(fx.src.path().join("secret"));
        (fx, lock)
    }

    #[test]
    fn test_unreadable_directory_aborts_by_default() {
        if running_as_root() {
            eprintln!("SKIP: permission bits are not enforced for root");
            return;
        }
        let (fx, _lock) = locked_fixture();

        let mut cmd = cargo_bin_cmd!("skeltree");
        cmd.arg(fx.src.path())
            .arg(fx.out())
            .assert()
            .failure()
            .stderr(predicate::str::contains("error[permission_denied]"));
    }

    #[test]
    fn test_unreadable_directory_skipped_with_keep_going() {
        if running_as_root() {
            eprintln!("SKIP: permission bits are not enforced for root");
            return;
        }
        let (fx, _lock) = locked_fixture();

        let mut cmd = cargo_bin_cmd!("skeltree");
        cmd.arg(fx.src.path())
            .arg(fx.out())
            .arg("-k")
            .arg("-v")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Failed:      1\n"))
            .stderr(predicate::str::contains("warning: Failed to read directory").count(1))
            .stderr(predicate::str::contains("error[partial_failure]"));

        // Everything readable is still replicated
        assert!(fx.out().join("readable/ok.txt").is_file());
        assert!(fx.out().join("secret").is_dir());
    }

    #[test]
    fn test_resilient_profile_keeps_going() {
        if running_as_root() {
            eprintln!("SKIP: permission bits are not enforced for root");
            return;
        }
        let (fx, _lock) = locked_fixture();

        let mut cmd = cargo_bin_cmd!("skeltree");
        cmd.arg(fx.src.path())
            .arg(fx.out())
            .args(["--profile", "resilient"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("warning: Failed to read directory"))
            .stderr(predicate::str::contains("secret"))
            .stderr(predicate::str::contains("error[partial_failure]"));

        assert!(fx.out().join("readable/ok.txt").is_file());
    }
}
