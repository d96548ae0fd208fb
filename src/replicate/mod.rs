//! Core replication operations.
//!
//! A run resolves both roots, then makes two passes over the source tree:
//! every qualifying directory first, every qualifying file second. Each pass
//! enumerates the tree from scratch and knows its total before it creates
//! anything.

mod dirs;
mod enumerate;
mod files;
mod utils;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::options::ReplicateOptions;
use crate::utils::path::resolve_existing;

// Re-export public API
pub use dirs::replicate_dirs;
pub use enumerate::{EntryKind, Enumeration, SourceEntry, enumerate};
pub use files::replicate_files;

/// Resolved source and destination roots.
///
/// Both are absolute and canonical. Building one has side effects: the
/// destination root is created if it does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRoots {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl TreeRoots {
    /// Resolve the source root and create the destination root.
    ///
    /// The source is checked first, so a missing source leaves the
    /// destination untouched.
    ///
    /// # Errors
    ///
    /// - Source cannot be resolved ([`Error::SourceNotFound`])
    /// - Source is not a directory ([`Error::NotADirectory`])
    /// - Destination cannot be created, or is not a directory
    ///   ([`Error::DestinationCreate`])
    /// - Source lies inside (or is) the destination ([`Error::SourceInsideDestination`])
    pub fn resolve(source: &Path, destination: &Path) -> Result<Self> {
        let resolved_source =
            resolve_existing(source).map_err(|_| Error::SourceNotFound(source.to_path_buf()))?;
        if !resolved_source.is_dir() {
            return Err(Error::NotADirectory(resolved_source));
        }

        let destination_error = |e: io::Error| Error::DestinationCreate {
            path: destination.to_path_buf(),
            source: e,
        };

        let resolved_destination = match resolve_existing(destination) {
            Ok(existing) => existing,
            Err(_) => {
                fs::create_dir_all(destination).map_err(destination_error)?;
                resolve_existing(destination).map_err(destination_error)?
            }
        };
        if !resolved_destination.is_dir() {
            return Err(destination_error(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "destination exists and is not a directory",
            )));
        }

        // Placeholders would truncate the source files themselves
        if resolved_source.starts_with(&resolved_destination) {
            return Err(Error::SourceInsideDestination {
                source_root: resolved_source,
                destination_root: resolved_destination,
            });
        }

        Ok(Self {
            source: resolved_source,
            destination: resolved_destination,
        })
    }
}

/// Counters for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Qualifying entries handed to the pass
    pub total: u64,
    /// Entries newly created (directories that already existed are not counted)
    pub created: u64,
    /// Entries skipped after an error
    pub failed: u64,
}

/// Statistics from a replication run.
///
/// Returned by [`replicate_tree`].
///
/// # Example
///
/// ```no_run
/// use skeltree::{replicate_tree, ReplicateOptions};
/// use std::path::Path;
///
/// let stats = replicate_tree(Path::new("/mnt/archive"), Path::new("index"), &ReplicateOptions::default())?;
/// println!("{} folders, {} files", stats.dirs_total, stats.files_total);
/// # Ok::<(), skeltree::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReplicateStats {
    /// Resolved source root
    pub source: PathBuf,
    /// Resolved destination root
    pub destination: PathBuf,
    /// Qualifying source directories
    pub dirs_total: u64,
    /// Destination directories that did not exist before
    pub dirs_created: u64,
    /// Directories skipped after an error
    pub dirs_failed: u64,
    /// Qualifying source files
    pub files_total: u64,
    /// Files skipped after an error
    pub files_failed: u64,
    /// Entries left out as hidden or system
    pub excluded: u64,
    /// Entries that could not be read (each counted once)
    pub unreadable: u64,
    /// Duration of the whole run
    pub duration: Duration,
}

impl ReplicateStats {
    /// Number of entries that failed in any way.
    pub fn failed(&self) -> u64 {
        self.dirs_failed + self.files_failed + self.unreadable
    }

    /// Number of entries the run dealt with, failures included.
    pub fn entries_total(&self) -> u64 {
        self.dirs_total + self.files_total + self.unreadable
    }
}

/// Mirror a directory tree as empty folders and zero-length files
///
/// # Strategy
///
/// 1. Resolve the source root, create the destination root
/// 2. Enumerate qualifying directories, create them (sequential, parent-first)
/// 3. Enumerate qualifying files, create placeholders (optionally parallel)
///
/// # Errors
///
/// Returns an error if:
/// - Source does not exist ([`Error::SourceNotFound`])
/// - Source is not a directory ([`Error::NotADirectory`])
/// - Destination cannot be created ([`Error::DestinationCreate`])
/// - Source lies inside the destination ([`Error::SourceInsideDestination`])
/// - An entry fails under [`OnEntryError::Abort`](crate::OnEntryError::Abort)
///   ([`Error::EntryAccess`], [`Error::SymlinkLoop`], [`Error::MaxDepthExceeded`])
/// - Entries failed under [`OnEntryError::Continue`](crate::OnEntryError::Continue)
///   ([`Error::PartialReplicate`], carrying the full stats)
pub fn replicate_tree(
    source: &Path,
    destination: &Path,
    options: &ReplicateOptions,
) -> Result<ReplicateStats> {
    let start_time = Instant::now();
    let roots = TreeRoots::resolve(source, destination)?;

    // Pass 1: directories
    let dirs = enumerate(&roots, EntryKind::Directory, options)?;
    let dir_pass = replicate_dirs(&roots, &dirs.entries, options)?;
    let dirs_excluded = dirs.excluded;
    drop(dirs);

    // Pass 2: files
    let files = enumerate(&roots, EntryKind::File, options)?;
    let file_pass = replicate_files(&roots, &files.entries, options)?;

    let stats = ReplicateStats {
        source: roots.source,
        destination: roots.destination,
        dirs_total: dir_pass.total,
        dirs_created: dir_pass.created,
        dirs_failed: dir_pass.failed,
        files_total: file_pass.total,
        files_failed: file_pass.failed,
        excluded: dirs_excluded + files.excluded,
        unreadable: files.unreadable,
        duration: start_time.elapsed(),
    };

    if stats.failed() > 0 {
        return Err(Error::PartialReplicate {
            stats: Box::new(stats),
        });
    }

    Ok(stats)
}

// =============================================================================
// Tests
// =============================================================================
