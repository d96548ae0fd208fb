//! Error types for skeltree.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur while replicating a tree, the [`Result`] type alias, and
//! [`ErrorCode`] for stable machine-readable classification.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Setup | [`Error::SourceNotFound`], [`Error::NotADirectory`], [`Error::DestinationCreate`], [`Error::SourceInsideDestination`] |
//! | Entry | [`Error::EntryAccess`], [`Error::SymlinkLoop`], [`Error::MaxDepthExceeded`] |
//! | Partial | [`Error::PartialReplicate`] |
//!
//! Setup errors are always fatal and happen before anything is enumerated.
//! Entry errors abort the run or are skipped, depending on
//! [`OnEntryError`](crate::OnEntryError).

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::replicate::ReplicateStats;

/// Result type for skeltree operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC` (errno 28) |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
///
/// Placeholder files carry no data, but directory entries and inodes still
/// consume space, so a full volume surfaces here too.
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    #[cfg(unix)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ENOSPC: i32 = 28;
            return raw_error == ENOSPC;
        }
    }

    #[cfg(windows)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ERROR_DISK_FULL: i32 = 112;
            return raw_error == ERROR_DISK_FULL;
        }
    }

    false
}

/// The filesystem operation that failed for a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOperation {
    /// Listing the children of a source directory
    ReadDir,
    /// Reading the metadata of a source entry
    ReadMetadata,
    /// Creating a destination directory
    CreateDir,
    /// Creating (or truncating) a placeholder file
    CreateFile,
    /// Removing a destination entry of the wrong type
    RemoveConflict,
}

impl EntryOperation {
    /// Short human-readable name of the operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadDir => "read directory",
            Self::ReadMetadata => "read metadata",
            Self::CreateDir => "create directory",
            Self::CreateFile => "create file",
            Self::RemoveConflict => "remove conflicting entry",
        }
    }
}

impl fmt::Display for EntryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable, machine-readable error classification.
///
/// Used by the command line for `error[<code>]` prefixes and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    SourceNotFound,
    NotADirectory,
    DestinationCreate,
    PermissionDenied,
    NoSpace,
    IoError,
    SymlinkLoop,
    MaxDepthExceeded,
    PartialFailure,
    InvalidInput,
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SourceNotFound => "source_not_found",
            Self::NotADirectory => "not_a_directory",
            Self::DestinationCreate => "destination_create",
            Self::PermissionDenied => "permission_denied",
            Self::NoSpace => "no_space",
            Self::IoError => "io_error",
            Self::SymlinkLoop => "symlink_loop",
            Self::MaxDepthExceeded => "max_depth_exceeded",
            Self::PartialFailure => "partial_failure",
            Self::InvalidInput => "invalid_input",
            Self::Internal => "internal",
        }
    }

    /// Classify a raw IO error.
    pub fn from_io(error: &io::Error) -> Self {
        if is_no_space_error(error) {
            Self::NoSpace
        } else if error.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied
        } else {
            Self::IoError
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while replicating a tree.
///
/// All errors include relevant path information to aid debugging.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Source path cannot be resolved to an existing path
    #[error("Source path does not exist: {0}")]
    SourceNotFound(PathBuf),

    /// Source is not a directory
    #[error("Source is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Destination root could not be created or resolved
    #[error("Failed to create destination {path}: {source}")]
    DestinationCreate {
        /// Destination root as given
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Source root is the destination root or lies beneath it
    #[error("Source {source_root} lies inside destination {destination_root}")]
    SourceInsideDestination {
        /// Resolved source root
        source_root: PathBuf,
        /// Resolved destination root
        destination_root: PathBuf,
    },

    /// A single entry could not be enumerated or created
    #[error("Failed to {operation} {path}: {source}")]
    EntryAccess {
        /// The path that failed
        path: PathBuf,
        /// What was being done to it
        operation: EntryOperation,
        /// Underlying error
        source: io::Error,
    },

    /// Symlink loop detected while following links
    #[error("Symlink loop detected: {0}")]
    SymlinkLoop(PathBuf),

    /// Maximum directory depth exceeded
    #[error("Maximum depth {max_depth} exceeded at: {path}")]
    MaxDepthExceeded {
        /// The path where max depth was exceeded
        path: PathBuf,
        /// The configured maximum depth
        max_depth: usize,
    },

    /// Some entries failed and were skipped
    ///
    /// Only returned with [`OnEntryError::Continue`](crate::OnEntryError::Continue).
    /// Everything that could be replicated has been; the stats describe
    /// the finished run.
    #[error(
        "Failed to replicate {} of {} entries",
        .stats.failed(),
        .stats.entries_total()
    )]
    PartialReplicate {
        /// Statistics of the completed run
        stats: Box<ReplicateStats>,
    },
}

impl Error {
    pub(crate) fn entry(
        path: impl Into<PathBuf>,
        operation: EntryOperation,
        source: io::Error,
    ) -> Self {
        Self::EntryAccess {
            path: path.into(),
            operation,
            source,
        }
    }

    /// Stable classification of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::SourceNotFound(_) => ErrorCode::SourceNotFound,
            Self::NotADirectory(_) => ErrorCode::NotADirectory,
            Self::DestinationCreate { .. } => ErrorCode::DestinationCreate,
            Self::SourceInsideDestination { .. } => ErrorCode::InvalidInput,
            Self::EntryAccess { source, .. } => ErrorCode::from_io(source),
            Self::SymlinkLoop(_) => ErrorCode::SymlinkLoop,
            Self::MaxDepthExceeded { .. } => ErrorCode::MaxDepthExceeded,
            Self::PartialReplicate { .. } => ErrorCode::PartialFailure,
        }
    }
}
