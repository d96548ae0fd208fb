//! Path utilities shared by the enumerator and the replicators.
//!
//! Every destination path is derived the same way: strip the source root
//! from the entry path, then join what is left onto the destination root.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Strip `root` from `path`, yielding the entry's relative path.
///
/// Returns `None` when `path` does not live under `root`, or when it is the
/// root itself (the root has no relative path of its own).
pub(crate) fn relative_to<'a>(root: &Path, path: &'a Path) -> Option<&'a Path> {
    let rel = path.strip_prefix(root).ok()?;
    // strip_prefix already drops the separator between root and rest
    if rel.as_os_str().is_empty() {
        None
    } else {
        Some(rel)
    }
}

/// Destination counterpart of a relative path.
///
/// Only normal components are kept, so a relative path can never climb out
/// of the destination root.
pub(crate) fn destination_for(dst_root: &Path, relative: &Path) -> PathBuf {
    let mut out = dst_root.to_path_buf();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            out.push(part);
        }
    }
    out
}

/// Resolve a source root to an absolute, canonical path.
///
/// A drive root (`C:\`) or a relative path both resolve. On Windows the
/// result carries the `\\?\` prefix, which keeps long paths working for
/// every path later joined onto it.
pub(crate) fn resolve_existing(path: &Path) -> io::Result<PathBuf> {
    std::fs::canonicalize(path)
}

/// Whether a file name follows the Unix "dotfile" hiding convention.
///
/// `.` and `..` never reach this function; `read_dir` does not yield them.
#[inline]
#[cfg_attr(windows, allow(dead_code))]
pub(crate) fn is_dotfile(name: &std::ffi::OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}
