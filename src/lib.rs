//! # skeltree
//!
//! Replicate a directory tree as a skeleton: every folder recreated empty,
//! every file recreated as a zero-length placeholder.
//!
//! ## Core Features
//!
//! - **Two passes**: all folders first, then all files, each with a known total
//! - **Progress estimation**: periodic snapshots with a projected time remaining
//! - **Attribute filtering**: hidden and system entries are left out, subtrees included
//! - **Parallel file pass**: placeholders created on a rayon pool
//! - **Idempotent**: a second run over the same destination changes nothing
//! - **Symlink aware**: links are not followed unless asked, loops are detected
//! - **Never reads file contents**: source files are only ever `stat`ed
//!
//! ## Quick Start with Builder API
//!
//! ```no_run
//! use skeltree::ReplicateBuilder;
//!
//! let stats = ReplicateBuilder::new("/mnt/archive", "archive-index").run()?;
//! println!("Created {} folders and {} files", stats.dirs_total, stats.files_total);
//! # Ok::<(), skeltree::Error>(())
//! ```
//!
//! ### Unattended Run
//!
//! ```no_run
//! use skeltree::ReplicateBuilder;
//!
//! // Skip unreadable entries instead of stopping, 8 workers for files
//! let result = ReplicateBuilder::new("/srv/share", "/tmp/share-skeleton")
//!     .keep_going()
//!     .parallel(8)
//!     .run();
//!
//! match result {
//!     Ok(stats) => println!("{} files", stats.files_total),
//!     Err(skeltree::Error::PartialReplicate { stats }) => {
//!         eprintln!("{} entries skipped", stats.failed());
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok::<(), skeltree::Error>(())
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use skeltree::{replicate_tree, OnEntryError, ReplicateOptions};
//! use std::path::Path;
//!
//! let options = ReplicateOptions::default()
//!     .with_on_error(OnEntryError::Continue)
//!     .with_dir_report_every(50)
//!     .with_progress(|snapshot| println!("{snapshot}"));
//!
//! let stats = replicate_tree(Path::new("src"), Path::new("dst"), &options)?;
//! # Ok::<(), skeltree::Error>(())
//! ```
//!
//! ## What Counts as Hidden
//!
//! | Platform | Hidden | System |
//! |----------|--------|--------|
//! | Windows | `FILE_ATTRIBUTE_HIDDEN` | `FILE_ATTRIBUTE_SYSTEM` |
//! | macOS | `UF_HIDDEN` flag or leading `.` | sockets, FIFOs, devices |
//! | Other Unix | leading `.` | sockets, FIFOs, devices |
//!
//! The leading-dot rule can be turned off with
//! [`ReplicateOptions::without_dotfile_hiding`]. The source root itself is
//! never filtered.
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `progress` | Progress bar support with indicatif |
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`ReplicateOptions`], Serialize for [`ReplicateStats`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod attrs;
mod builder;
mod error;
mod options;
mod progress;
mod replicate;
mod utils;

#[cfg(windows)]
mod win_attrs;

pub use attrs::{AttributeFilter, EntryAttributes};
pub use builder::ReplicateBuilder;
pub use error::{EntryOperation, Error, ErrorCode, Result, is_no_space_error};
pub use options::{
    DEFAULT_DIR_REPORT_EVERY, DEFAULT_FILE_REPORT_EVERY, OnEntryError, ReplicateOptions,
};
pub use progress::{Pass, ProgressCallback, ProgressEstimator, ProgressSnapshot};
pub use replicate::{
    EntryKind, Enumeration, PassStats, ReplicateStats, SourceEntry, TreeRoots, enumerate,
    replicate_dirs, replicate_files, replicate_tree,
};

#[cfg(feature = "progress")]
#[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
pub use progress::create_progress_bar;
