//! File pass.
//!
//! Creates a zero-length placeholder for every source file. Source files
//! are never opened. With `parallel > 1` the entries are spread over a
//! dedicated rayon pool; each task creates its own parent directory before
//! its file, so ordering holds per file without coordination.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use crate::error::Result;
use crate::options::ReplicateOptions;
use crate::progress::{Pass, ProgressEstimator};
use crate::utils::path::destination_for;

use super::enumerate::SourceEntry;
use super::utils::{absorb, create_placeholder};
use super::{PassStats, TreeRoots};

/// Create a zero-length destination file for every source file.
///
/// Existing destination files are truncated. Missing parent directories
/// are created on demand. Drives the file-pass progress estimator once per
/// entry.
///
/// # Errors
///
/// Under [`OnEntryError::Abort`](crate::OnEntryError::Abort), the first
/// file that cannot be created ([`Error::EntryAccess`](crate::Error::EntryAccess)).
/// With parallel workers, entries already in flight still finish.
pub fn replicate_files(
    roots: &TreeRoots,
    entries: &[SourceEntry],
    options: &ReplicateOptions,
) -> Result<PassStats> {
    let total = entries.len() as u64;
    let progress = Mutex::new(ProgressEstimator::start(
        Pass::Files,
        total,
        options.file_report_every,
    ));
    let created = AtomicU64::new(0);
    let failed = AtomicU64::new(0);

    let process = |entry: &SourceEntry| -> Result<()> {
        let dst = destination_for(&roots.destination, &entry.relative);
        match create_placeholder(&dst) {
            Ok(()) => {
                created.fetch_add(1, Ordering::Relaxed);
                options.verbose(&format!(
                    "placeholder {} -> {}",
                    entry.path.display(),
                    dst.display()
                ));
            }
            Err(e) => {
                absorb(options, e)?;
                failed.fetch_add(1, Ordering::Relaxed);
            }
        }

        let snapshot = progress.lock().ok().and_then(|mut p| p.record());
        if let Some(snapshot) = snapshot {
            options.report(&snapshot);
        }
        Ok(())
    };

    if options.parallel > 1 && entries.len() > 1 {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(options.parallel)
            .build()
        {
            Ok(pool) => pool.install(|| entries.par_iter().try_for_each(&process))?,
            Err(e) => {
                options.warn(&format!(
                    "Failed to create thread pool ({e}), creating files sequentially"
                ));
                entries.iter().try_for_each(&process)?;
            }
        }
    } else {
        entries.iter().try_for_each(&process)?;
    }

    Ok(PassStats {
        total,
        created: created.into_inner(),
        failed: failed.into_inner(),
    })
}
