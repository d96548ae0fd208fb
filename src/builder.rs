//! Builder API for replication runs.
//!
//! The builder pattern provides a fluent interface for configuring and
//! executing a run. This is often more convenient than manually constructing
//! [`ReplicateOptions`].
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use skeltree::ReplicateBuilder;
//!
//! let stats = ReplicateBuilder::new("src", "dst").run()?;
//! println!("{} folders, {} files", stats.dirs_total, stats.files_total);
//! # Ok::<(), skeltree::Error>(())
//! ```
//!
//! ## With Progress
//!
//! ```no_run
//! use skeltree::ReplicateBuilder;
//!
//! let stats = ReplicateBuilder::new("src", "dst")
//!     .parallel(8)
//!     .file_report_every(1000)
//!     .on_progress(|snapshot| eprintln!("{snapshot}"))
//!     .run()?;
//! # Ok::<(), skeltree::Error>(())
//! ```

use crate::error::Result;
use crate::options::{OnEntryError, ReplicateOptions};
use crate::progress::ProgressSnapshot;
use crate::replicate::{ReplicateStats, replicate_tree};
use std::path::{Path, PathBuf};

/// A builder for configuring and executing a replication run.
///
/// # Example
///
/// ```no_run
/// use skeltree::ReplicateBuilder;
///
/// let stats = ReplicateBuilder::new("/data/project", "/tmp/project-skeleton")
///     .keep_going()
///     .max_depth(64)
///     .run()?;
/// # Ok::<(), skeltree::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReplicateBuilder {
    src: PathBuf,
    dst: PathBuf,
    options: ReplicateOptions,
}

impl ReplicateBuilder {
    /// Create a new `ReplicateBuilder` for the given source and destination roots.
    ///
    /// Uses default options (sequential, abort on error, report every
    /// 100 folders and 500 files).
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            options: ReplicateOptions::default(),
        }
    }

    /// Set the number of worker threads for the file pass.
    ///
    /// Default is 1. The directory pass is always sequential.
    #[must_use]
    pub fn parallel(mut self, threads: usize) -> Self {
        self.options = self.options.with_parallel(threads);
        self
    }

    /// Skip entries that fail instead of stopping.
    ///
    /// The run then ends with [`Error::PartialReplicate`](crate::Error::PartialReplicate)
    /// if anything was skipped.
    #[must_use]
    pub fn keep_going(mut self) -> Self {
        self.options = self.options.with_on_error(OnEntryError::Continue);
        self
    }

    /// Stop at the first failing entry (default behavior).
    #[must_use]
    pub fn abort_on_error(mut self) -> Self {
        self.options = self.options.with_on_error(OnEntryError::Abort);
        self
    }

    /// Emit a directory-pass snapshot every `n` folders.
    #[must_use]
    pub fn dir_report_every(mut self, n: u64) -> Self {
        self.options = self.options.with_dir_report_every(n);
        self
    }

    /// Emit a file-pass snapshot every `n` files.
    #[must_use]
    pub fn file_report_every(mut self, n: u64) -> Self {
        self.options = self.options.with_file_report_every(n);
        self
    }

    /// Descend into symlinked directories.
    #[must_use]
    pub fn follow_symlinks(mut self) -> Self {
        self.options = self.options.with_follow_symlinks();
        self
    }

    /// Set maximum directory depth.
    ///
    /// A directory one level past the limit is still created (empty), but
    /// entering it is an entry error
    /// ([`Error::MaxDepthExceeded`](crate::Error::MaxDepthExceeded)).
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options = self.options.with_max_depth(depth);
        self
    }

    /// Keep dotfiles on platforms without a native hidden attribute.
    #[must_use]
    pub fn keep_dotfiles(mut self) -> Self {
        self.options = self.options.without_dotfile_hiding();
        self
    }

    /// Receive progress snapshots for both passes.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use skeltree::ReplicateBuilder;
    ///
    /// let stats = ReplicateBuilder::new("src", "dst")
    ///     .on_progress(|s| println!("{}: {}/{}", s.pass, s.processed, s.total))
    ///     .run()?;
    /// # Ok::<(), skeltree::Error>(())
    /// ```
    #[must_use]
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ProgressSnapshot) + Send + Sync + 'static,
    {
        self.options = self.options.with_progress(callback);
        self
    }

    /// Set a warning handler for skipped entries and other non-fatal issues.
    #[must_use]
    pub fn on_warning(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_warn_handler(handler);
        self
    }

    /// Set a handler for per-entry notes (created, excluded, skipped).
    #[must_use]
    pub fn verbose(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_verbose_handler(handler);
        self
    }

    /// Get a reference to the current options.
    pub fn options(&self) -> &ReplicateOptions {
        &self.options
    }

    /// Execute the run.
    ///
    /// # Errors
    ///
    /// See [`replicate_tree`].
    pub fn run(self) -> Result<ReplicateStats> {
        replicate_tree(&self.src, &self.dst, &self.options)
    }
}
