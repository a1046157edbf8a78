//! Month-stamped log directories grow until the disk fills — this module
//! finds files whose embedded year/month has aged out of the retention
//! window and deletes them, fail-soft on every path so a maintenance pass
//! never crashes its host.

mod config;
mod discover;
mod result;

pub use config::{DEFAULT_PATTERN, RotationConfig};
pub use discover::{DiscoveredEntry, DiscoveryReport, LogGroup, SkipReason, Skipped, discover};
pub use result::RotationReport;

use crate::disk::{Disk, RealDisk};
use crate::error::Error;
use chrono::{Datelike, Local, Months, NaiveDate};
use std::path::PathBuf;

/// Retention cutoff: floor `today` to the first of its month, then step
/// back `retention_months` whole months.
///
/// Flooring first is deliberate — it keeps the boundary stable across the
/// whole month, so a file dated exactly `retention_months` ago is retained
/// on the 1st and on the 31st alike.
#[must_use]
pub fn cutoff(today: NaiveDate, retention_months: u32) -> NaiveDate {
    let month_start = today.with_day(1).unwrap_or(today);
    month_start
        .checked_sub_months(Months::new(retention_months))
        .unwrap_or(NaiveDate::MIN)
}

/// Discovers dated log files in one directory and deletes those past the
/// retention window.
///
/// Construction never fails: an invalid target directory leaves the
/// rotator inert, and every `rotate` call re-validates, so a directory
/// created later is picked up without rebuilding the rotator.
#[derive(Debug)]
pub struct LogRotator<D: Disk = RealDisk> {
    config: RotationConfig,
    disk: D,
}

impl LogRotator {
    /// Rotator over the real filesystem with default settings.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::with_disk(RotationConfig::new(directory), RealDisk)
    }
}

impl<D: Disk> LogRotator<D> {
    /// Rotator over an explicit disk collaborator, for tests or embedding.
    #[must_use]
    pub fn with_disk(config: RotationConfig, disk: D) -> Self {
        let rotator = Self { config, disk };
        if !rotator.directory_usable() {
            tracing::warn!(
                dir = %rotator.config.directory().display(),
                "Target directory missing or unwritable, rotator starts inert"
            );
        }
        rotator
    }

    /// Replace the extension list with a single extension.
    ///
    /// # Errors
    /// See [`RotationConfig::set_extension`].
    pub fn set_extension(&mut self, extension: impl Into<String>) -> Result<(), Error> {
        self.config.set_extension(extension)
    }

    /// Replace the extension list.
    ///
    /// # Errors
    /// See [`RotationConfig::set_extensions`].
    pub fn set_extensions<I, S>(&mut self, extensions: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.set_extensions(extensions)
    }

    /// Replace the base matching pattern.
    ///
    /// # Errors
    /// See [`RotationConfig::set_pattern`].
    pub fn set_pattern(&mut self, pattern: &str) -> Result<(), Error> {
        self.config.set_pattern(pattern)
    }

    /// Months of logs to keep, clamped to at least 1.
    pub fn set_retention_months(&mut self, months: i64) {
        self.config.set_retention_months(months);
    }

    /// Compute and log deletions without removing anything.
    pub const fn set_dry_run(&mut self, dry_run: bool) {
        self.config.set_dry_run(dry_run);
    }

    /// Current settings, for read-back.
    #[must_use]
    pub const fn config(&self) -> &RotationConfig {
        &self.config
    }

    /// Run one rotation pass anchored to today's date.
    ///
    /// Never returns an error: per-file failures land in the report and the
    /// log, and an unusable directory yields an empty report.
    pub fn rotate(&self) -> RotationReport {
        self.rotate_at(Local::now().date_naive())
    }

    /// Run one rotation pass as if `today` were the current date.
    ///
    /// The anchor date is a parameter so retention boundaries are testable
    /// without clock control.
    pub fn rotate_at(&self, today: NaiveDate) -> RotationReport {
        let mut report = RotationReport {
            dry_run: self.config.dry_run(),
            retention_months: self.config.retention_months(),
            ..RotationReport::default()
        };

        if !self.directory_usable() {
            tracing::warn!(
                dir = %self.config.directory().display(),
                "Target directory missing or unwritable, skipping rotation pass"
            );
            report.log();
            return report;
        }

        let discovery = discover(&self.config, &self.disk);
        let cutoff = cutoff(today, self.config.retention_months());
        report.cutoff = Some(cutoff);
        report.skipped = discovery.skipped;

        for (name, entries) in &discovery.groups {
            tracing::debug!(name = %name, files = entries.len(), "Evaluating log group");
            for entry in entries {
                // Discovery rejects out-of-range months, so this is always Some.
                let Some(month_start) = entry.month_start() else {
                    continue;
                };
                if month_start < cutoff {
                    self.expire(entry, &mut report);
                } else {
                    report.retained.push(entry.path.clone());
                }
            }
        }

        report.log();
        report
    }

    /// Delete (or, under dry run, only record) one entry past retention.
    fn expire(&self, entry: &DiscoveredEntry, report: &mut RotationReport) {
        let retention = self.config.retention_months();
        if self.config.dry_run() {
            tracing::info!(
                dry_run = true,
                retention_months = retention,
                file = %entry.file_name,
                path = %entry.path.display(),
                "Would delete expired log file"
            );
            report.would_delete.push(entry.path.clone());
            return;
        }
        match self.disk.remove_file(&entry.path) {
            Ok(()) => {
                tracing::info!(
                    dry_run = false,
                    retention_months = retention,
                    file = %entry.file_name,
                    path = %entry.path.display(),
                    "Deleted expired log file"
                );
                report.deleted.push(entry.path.clone());
            }
            Err(e) => {
                tracing::warn!(
                    dry_run = false,
                    retention_months = retention,
                    file = %entry.file_name,
                    path = %entry.path.display(),
                    error = %e,
                    "Failed to delete expired log file"
                );
                report.failed.push((entry.path.clone(), e.to_string()));
            }
        }
    }

    fn directory_usable(&self) -> bool {
        let dir = self.config.directory();
        self.disk.dir_exists(dir) && self.disk.dir_writable(dir)
    }
}
