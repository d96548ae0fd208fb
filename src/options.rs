//! Configuration options for replication.
//!
//! This module provides [`ReplicateOptions`] for configuring a run and
//! [`OnEntryError`] for choosing what happens when a single entry fails.
//!
//! # Example
//!
//! ```
//! use skeltree::{OnEntryError, ReplicateOptions};
//!
//! let options = ReplicateOptions::default()
//!     .with_parallel(8)
//!     .with_on_error(OnEntryError::Continue)
//!     .with_file_report_every(1000);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::progress::{ProgressCallback, ProgressSnapshot};

/// Default progress cadence for the directory pass.
pub const DEFAULT_DIR_REPORT_EVERY: u64 = 100;

/// Default progress cadence for the file pass.
pub const DEFAULT_FILE_REPORT_EVERY: u64 = 500;

/// Behavior when a single entry cannot be enumerated or created.
///
/// # Default
///
/// The default is [`OnEntryError::Abort`]: the first failing entry stops
/// the run and its error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OnEntryError {
    /// Stop at the first failing entry (default).
    #[default]
    Abort,
    /// Warn, count the failure, and carry on with the next entry.
    ///
    /// An unreadable directory is skipped together with its subtree. If
    /// anything failed, the run ends with
    /// [`Error::PartialReplicate`](crate::Error::PartialReplicate).
    Continue,
}

/// Options for a replication run.
///
/// Use [`Default::default()`] to get sensible defaults, then customize
/// using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `parallel` | 1 | Worker threads for the file pass |
/// | `on_error` | `Abort` | Stop at the first failing entry |
/// | `dir_report_every` | 100 | Directory-pass progress cadence |
/// | `file_report_every` | 500 | File-pass progress cadence |
/// | `follow_symlinks` | `false` | Do not descend into linked directories |
/// | `max_depth` | `None` | No depth limit |
/// | `dotfiles_hidden` | `true` | Dotfiles count as hidden where no hidden bit exists |
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplicateOptions {
    /// Number of worker threads used by the file pass (default: 1)
    ///
    /// The directory pass is always sequential.
    pub parallel: usize,

    /// What to do when an entry fails
    pub on_error: OnEntryError,

    /// Emit a directory-pass progress snapshot every N directories
    pub dir_report_every: u64,

    /// Emit a file-pass progress snapshot every N files
    pub file_report_every: u64,

    /// Descend into symlinked directories (default: false)
    ///
    /// Loops are detected by (device, inode) and reported as
    /// [`Error::SymlinkLoop`](crate::Error::SymlinkLoop).
    pub follow_symlinks: bool,

    /// Maximum directory depth to traverse (default: None = unlimited)
    ///
    /// Directories one level past the limit are still created, empty;
    /// entering them fails with
    /// [`Error::MaxDepthExceeded`](crate::Error::MaxDepthExceeded).
    pub max_depth: Option<usize>,

    /// Treat names starting with `.` as hidden (default: true)
    ///
    /// Only consulted on platforms without a native hidden attribute.
    /// Windows ignores it and uses `FILE_ATTRIBUTE_HIDDEN` alone.
    pub dotfiles_hidden: bool,

    /// Callback for warnings (optional)
    ///
    /// If not set and `tracing` feature is enabled, warnings are logged via tracing.
    /// Otherwise, warnings are silently ignored.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,

    /// Callback for per-entry notes (optional)
    #[cfg_attr(feature = "serde", serde(skip))]
    pub verbose_handler: Option<fn(&str)>,

    /// Receives progress snapshots at the configured cadence
    #[cfg_attr(feature = "serde", serde(skip))]
    pub on_progress: Option<ProgressCallback>,
}

impl Default for ReplicateOptions {
    fn default() -> Self {
        Self {
            parallel: 1,
            on_error: OnEntryError::Abort,
            dir_report_every: DEFAULT_DIR_REPORT_EVERY,
            file_report_every: DEFAULT_FILE_REPORT_EVERY,
            follow_symlinks: false,
            max_depth: None,
            dotfiles_hidden: true,
            warn_handler: None,
            verbose_handler: None,
            on_progress: None,
        }
    }
}

impl fmt::Debug for ReplicateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplicateOptions")
            .field("parallel", &self.parallel)
            .field("on_error", &self.on_error)
            .field("dir_report_every", &self.dir_report_every)
            .field("file_report_every", &self.file_report_every)
            .field("follow_symlinks", &self.follow_symlinks)
            .field("max_depth", &self.max_depth)
            .field("dotfiles_hidden", &self.dotfiles_hidden)
            .field("warn_handler", &self.warn_handler.is_some())
            .field("verbose_handler", &self.verbose_handler.is_some())
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

impl ReplicateOptions {
    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Create options with a handler for per-entry notes
    #[must_use]
    pub fn with_verbose_handler(mut self, handler: fn(&str)) -> Self {
        self.verbose_handler = Some(handler);
        self
    }

    /// Set the number of worker threads for the file pass
    ///
    /// Value is clamped to at least 1 to prevent panics.
    #[must_use]
    pub fn with_parallel(mut self, n: usize) -> Self {
        self.parallel = n.max(1);
        self
    }

    /// Set the per-entry error policy
    #[must_use]
    pub fn with_on_error(mut self, on_error: OnEntryError) -> Self {
        self.on_error = on_error;
        self
    }

    /// Set the directory-pass progress cadence (clamped to at least 1)
    #[must_use]
    pub fn with_dir_report_every(mut self, n: u64) -> Self {
        self.dir_report_every = n.max(1);
        self
    }

    /// Set the file-pass progress cadence (clamped to at least 1)
    #[must_use]
    pub fn with_file_report_every(mut self, n: u64) -> Self {
        self.file_report_every = n.max(1);
        self
    }

    /// Descend into symlinked directories
    #[must_use]
    pub fn with_follow_symlinks(mut self) -> Self {
        self.follow_symlinks = true;
        self
    }

    /// Set maximum directory depth
    ///
    /// The first directory past the limit is still created but not entered.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Keep dotfiles on platforms without a native hidden attribute
    #[must_use]
    pub fn without_dotfile_hiding(mut self) -> Self {
        self.dotfiles_hidden = false;
        self
    }

    /// Install a progress callback
    #[must_use]
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ProgressSnapshot) + Send + Sync + 'static,
    {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }

    pub(crate) fn verbose(&self, msg: &str) {
        if let Some(handler) = self.verbose_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!("{}", msg);
        }
    }

    pub(crate) fn report(&self, snapshot: &ProgressSnapshot) {
        if let Some(callback) = &self.on_progress {
            callback(snapshot);
        }
    }
}
