//! Directory pass.
//!
//! Sequential on purpose: entries arrive parent-first from the walk, and
//! the file pass relies on the whole structure existing before it starts.

use crate::error::Result;
use crate::options::ReplicateOptions;
use crate::progress::{Pass, ProgressEstimator};
use crate::utils::path::destination_for;

use super::enumerate::SourceEntry;
use super::utils::{absorb, ensure_dir};
use super::{PassStats, TreeRoots};

/// Create an empty destination directory for every source directory.
///
/// Existing directories are left alone; anything else in the way is
/// replaced. Drives the directory-pass progress estimator once per entry.
///
/// # Errors
///
/// Under [`OnEntryError::Abort`](crate::OnEntryError::Abort), the first
/// directory that cannot be created ([`Error::EntryAccess`](crate::Error::EntryAccess)).
pub fn replicate_dirs(
    roots: &TreeRoots,
    entries: &[SourceEntry],
    options: &ReplicateOptions,
) -> Result<PassStats> {
    let mut stats = PassStats {
        total: entries.len() as u64,
        ..PassStats::default()
    };
    let mut progress =
        ProgressEstimator::start(Pass::Directories, stats.total, options.dir_report_every);

    for entry in entries {
        let dst = destination_for(&roots.destination, &entry.relative);
        match ensure_dir(&dst) {
            Ok(true) => {
                stats.created += 1;
                options.verbose(&format!("created {}", dst.display()));
            }
            Ok(false) => {}
            Err(e) => {
                absorb(options, e)?;
                stats.failed += 1;
            }
        }

        if let Some(snapshot) = progress.record() {
            options.report(&snapshot);
        }
    }

    Ok(stats)
}
