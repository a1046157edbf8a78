//! Structured outcome of a rotation pass — split into actual vs dry-run
//! results so callers can report or preview without separate code paths,
//! and so tests assert on values instead of log text.

use super::discover::Skipped;
use chrono::NaiveDate;
use std::path::PathBuf;

/// What one rotation pass did (or would have done, under dry run).
///
/// `deleted`, `would_delete`, `retained` and `failed` partition the
/// discovered entries; `skipped` covers enumerated files that never parsed.
#[derive(Debug, Default)]
pub struct RotationReport {
    /// Files removed from disk.
    pub deleted: Vec<PathBuf>,
    /// Files a non-dry run would have removed.
    pub would_delete: Vec<PathBuf>,
    /// Files inside the retention window, left alone.
    pub retained: Vec<PathBuf>,
    /// Files selected for deletion whose removal failed, with the reason.
    pub failed: Vec<(PathBuf, String)>,
    /// Enumerated files discovery could not classify.
    pub skipped: Vec<Skipped>,
    /// The cutoff this pass compared against; `None` when the pass never
    /// ran (invalid directory).
    pub cutoff: Option<NaiveDate>,
    /// Whether the pass ran in dry-run mode.
    pub dry_run: bool,
    /// Retention in force during the pass, for log context.
    pub retention_months: u32,
}

impl RotationReport {
    /// Entries past retention, whether actually removed or only selected —
    /// callers comparing dry runs against real runs need one number.
    #[must_use]
    pub fn expired_count(&self) -> usize {
        if self.dry_run {
            self.would_delete.len()
        } else {
            self.deleted.len() + self.failed.len()
        }
    }

    /// Emit the pass summary through tracing.
    pub fn log(&self) {
        match self.cutoff {
            Some(cutoff) => tracing::info!(
                cutoff = %cutoff,
                dry_run = self.dry_run,
                retention_months = self.retention_months,
                expired = self.expired_count(),
                retained = self.retained.len(),
                skipped = self.skipped.len(),
                failed = self.failed.len(),
                "Rotation pass complete"
            ),
            None => tracing::warn!("Rotation pass did not run"),
        }
    }
}
