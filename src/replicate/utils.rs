//! Utility functions for the replication passes.
//!
//! This module contains the filesystem primitives both passes are built
//! from: forcing a directory into existence, creating a placeholder file,
//! clearing a destination entry of the wrong type, and the per-entry error
//! policy.

use std::fs::{self, Metadata, OpenOptions};
use std::io;
use std::path::Path;

use crate::error::{EntryOperation, Error, Result};
use crate::options::{OnEntryError, ReplicateOptions};

// =============================================================================
// Error policy
// =============================================================================

/// Apply the configured [`OnEntryError`] policy to a failed entry.
///
/// Returns the error under `Abort`. Under `Continue` the error is reported
/// through the warning handler and swallowed; the caller counts it.
pub(crate) fn absorb(options: &ReplicateOptions, error: Error) -> Result<()> {
    match options.on_error {
        OnEntryError::Abort => Err(error),
        OnEntryError::Continue => {
            options.warn(&error.to_string());
            Ok(())
        }
    }
}

// =============================================================================
// Destination primitives
// =============================================================================

/// Make sure `path` is a real directory.
///
/// Returns `Ok(true)` if something was created. A file or symlink sitting
/// at `path` is removed first.
pub(crate) fn ensure_dir(path: &Path) -> Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(false),
        Ok(meta) => {
            remove_existing(path, &meta)
                .map_err(|e| Error::entry(path, EntryOperation::RemoveConflict, e))?;
            create_dir(path)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => create_dir(path),
        Err(e) => Err(Error::entry(path, EntryOperation::CreateDir, e)),
    }
}

fn create_dir(path: &Path) -> Result<bool> {
    fs::create_dir_all(path).map_err(|e| Error::entry(path, EntryOperation::CreateDir, e))?;
    Ok(true)
}

/// Create a zero-length file at `path`, truncating any existing file.
///
/// The parent directory is created first if it is missing. Anything other
/// than a regular file at `path` (directory, symlink) is removed so the
/// result is always a plain empty file and no link is ever written through.
pub(crate) fn create_placeholder(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    match fs::symlink_metadata(path) {
        Ok(meta) if !meta.is_file() => remove_existing(path, &meta)
            .map_err(|e| Error::entry(path, EntryOperation::RemoveConflict, e))?,
        _ => {}
    }

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map(drop)
        .map_err(|e| Error::entry(path, EntryOperation::CreateFile, e))
}

/// Remove an existing file, symlink, or directory at the given path
#[inline]
pub(crate) fn remove_existing(path: &Path, meta: &Metadata) -> io::Result<()> {
    let ft = meta.file_type();
    if ft.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

// =============================================================================
// Source utilities
// =============================================================================

/// Get a unique key for a directory based on device and inode.
///
/// This is used for cycle detection when following symlinks and is much
/// faster than canonicalize(). On non-Unix, falls back to a hash of the
/// canonical path.
#[cfg(unix)]
pub(crate) fn get_dir_key(path: &Path) -> io::Result<(u64, u64)> {
    use std::os::unix::fs::MetadataExt;
    let meta = fs::metadata(path)?;
    Ok((meta.dev(), meta.ino()))
}

#[cfg(not(unix))]
pub(crate) fn get_dir_key(path: &Path) -> io::Result<(u64, u64)> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let canonical = path.canonicalize()?;
    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    Ok((0, hasher.finish()))
}

// =============================================================================
// Tests
// =============================================================================
