//! Progress estimation for the two replication passes.
//!
//! Each pass owns a [`ProgressEstimator`] created when the pass starts. It
//! counts processed entries against the total known from enumeration and
//! hands out a [`ProgressSnapshot`] every N entries and on the last one.
//! A pass with nothing to do never emits.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Callback receiving progress snapshots
pub type ProgressCallback = Arc<dyn Fn(&ProgressSnapshot) + Send + Sync>;

/// Which replication pass a snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pass {
    Directories,
    Files,
}

impl Pass {
    /// Label used in progress lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Directories => "Folders",
            Self::Files => "Files",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Point-in-time view of a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub pass: Pass,
    pub processed: u64,
    pub total: u64,
    /// Time since the pass started
    pub elapsed: Duration,
    /// Mean time per processed entry
    pub average: Duration,
    /// Linear projection of the time left
    pub remaining: Duration,
}

impl ProgressSnapshot {
    /// Compute a snapshot from raw counters.
    ///
    /// `average` is zero until something has been processed, and `remaining`
    /// is zero once `processed` reaches `total`.
    pub fn compute(pass: Pass, processed: u64, total: u64, elapsed: Duration) -> Self {
        let average_nanos = if processed == 0 {
            0
        } else {
            elapsed.as_nanos() / u128::from(processed)
        };
        let left = u128::from(total.saturating_sub(processed));
        Self {
            pass,
            processed,
            total,
            elapsed,
            average: nanos_to_duration(average_nanos),
            remaining: nanos_to_duration(average_nanos.saturating_mul(left)),
        }
    }

    /// Percentage complete, 100 for an empty pass.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.processed as f64 * 100.0 / self.total as f64
        }
    }

    pub fn is_final(&self) -> bool {
        self.processed >= self.total
    }
}

impl fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} ({:.1}%) - about {}s remaining",
            self.pass,
            self.processed,
            self.total,
            self.percent(),
            self.remaining.as_secs()
        )
    }
}

/// Per-pass progress state.
#[derive(Debug)]
pub struct ProgressEstimator {
    pass: Pass,
    total: u64,
    processed: u64,
    every: u64,
    started: Instant,
}

impl ProgressEstimator {
    /// Start estimating a pass of `total` entries, emitting every `every`
    /// entries (clamped to at least 1).
    pub fn start(pass: Pass, total: u64, every: u64) -> Self {
        Self {
            pass,
            total,
            processed: 0,
            every: every.max(1),
            started: Instant::now(),
        }
    }

    /// Record one processed entry.
    ///
    /// Returns a snapshot when the count hits the cadence or the last entry.
    pub fn record(&mut self) -> Option<ProgressSnapshot> {
        if self.processed >= self.total {
            return None;
        }
        self.processed += 1;
        if should_emit(self.processed, self.total, self.every) {
            Some(self.snapshot_at(self.started.elapsed()))
        } else {
            None
        }
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn snapshot_at(&self, elapsed: Duration) -> ProgressSnapshot {
        ProgressSnapshot::compute(self.pass, self.processed, self.total, elapsed)
    }
}

fn nanos_to_duration(nanos: u128) -> Duration {
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

fn should_emit(processed: u64, total: u64, every: u64) -> bool {
    processed == total || processed % every == 0
}

/// Create a default progress bar for a pass
#[cfg(feature = "progress")]
#[must_use]
pub fn create_progress_bar(pass: Pass, total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{prefix:>7} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb.set_prefix(pass.label());
    pb
}
