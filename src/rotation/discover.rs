//! Discovery pass: enumerate candidate files, parse their names against the
//! effective pattern, and group what parses by logical log name.
//!
//! Built fresh on every call — nothing here survives between rotation
//! passes, so two passes over the same directory classify identically.

use super::config::RotationConfig;
use crate::disk::Disk;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Dated log files sharing a logical name, keyed for deterministic
/// iteration; within a group, enumeration order is preserved.
pub type LogGroup = BTreeMap<String, Vec<DiscoveredEntry>>;

/// One file whose name parsed: the month it covers plus where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredEntry {
    /// The non-date, non-extension portion of the file name.
    pub name: String,
    /// Four-digit year embedded in the file name.
    pub year: i32,
    /// Month embedded in the file name, validated to 1–12 at discovery.
    pub month: u32,
    /// Full path, used for deletion.
    pub path: PathBuf,
    /// Base name, used in log records.
    pub file_name: String,
}

impl DiscoveredEntry {
    /// First day of the month the file covers. Always `Some` for entries
    /// produced by discovery, which rejects out-of-range months.
    #[must_use]
    pub fn month_start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

/// Why an enumerated file was left out of the grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Base name did not match the effective pattern.
    PatternMismatch,
    /// Pattern matched but the named group captured nothing.
    EmptyCapture(&'static str),
    /// The `year` capture did not parse as an integer.
    InvalidYear(String),
    /// The `month` capture did not parse or fell outside 1–12.
    InvalidMonth(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PatternMismatch => write!(f, "does not match the effective pattern"),
            Self::EmptyCapture(group) => write!(f, "capture group `{group}` is empty"),
            Self::InvalidYear(y) => write!(f, "invalid year {y:?}"),
            Self::InvalidMonth(m) => write!(f, "invalid month {m:?}"),
        }
    }
}

/// A file the glob enumerated but discovery could not classify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub file_name: String,
    pub reason: SkipReason,
}

/// Everything one discovery pass found.
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    /// Parsed entries, grouped by logical name.
    pub groups: LogGroup,
    /// Enumerated files that failed classification, with the reason.
    pub skipped: Vec<Skipped>,
}

impl DiscoveryReport {
    /// Total parsed entries across all groups.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Scan the configured directory and classify every enumerated file.
///
/// Fail-soft: files that match the glob but not the structured pattern are
/// recorded in `skipped` and logged, never fatal. Zero glob matches logs a
/// single diagnostic and yields an empty report.
#[must_use]
pub fn discover(config: &RotationConfig, disk: &dyn Disk) -> DiscoveryReport {
    let mut report = DiscoveryReport::default();
    let files = disk.list_files(config.directory(), config.extensions());

    if files.is_empty() {
        tracing::info!(
            glob = %config.glob_pattern(),
            pattern = %config.effective_pattern(),
            extensions = ?config.extensions(),
            "No files matched, nothing to rotate"
        );
        return report;
    }

    tracing::debug!(count = files.len(), dir = %config.directory().display(), "Enumerated candidate files");

    for path in files {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            tracing::warn!(path = %path.display(), "Skipping file with non-UTF-8 name");
            continue;
        };
        match classify(config, file_name) {
            Ok((name, year, month)) => {
                report.groups.entry(name.clone()).or_default().push(DiscoveredEntry {
                    name,
                    year,
                    month,
                    path: path.clone(),
                    file_name: file_name.to_string(),
                });
            }
            Err(reason) => {
                tracing::debug!(file = file_name, reason = %reason, "Skipping file");
                report.skipped.push(Skipped {
                    file_name: file_name.to_string(),
                    reason,
                });
            }
        }
    }

    report
}

/// Apply the effective pattern to one base name and pull out the three
/// captures. The pattern itself is trusted to carry exactly the required
/// groups; the config setters enforce that at compile time.
fn classify(config: &RotationConfig, file_name: &str) -> Result<(String, i32, u32), SkipReason> {
    let caps = config
        .effective_pattern()
        .captures(file_name)
        .ok_or(SkipReason::PatternMismatch)?;

    let name = capture(&caps, "name")?.to_string();
    let year_text = capture(&caps, "year")?;
    let month_text = capture(&caps, "month")?;

    let year: i32 = year_text
        .parse()
        .map_err(|_| SkipReason::InvalidYear(year_text.to_string()))?;
    let month: u32 = month_text
        .parse()
        .map_err(|_| SkipReason::InvalidMonth(month_text.to_string()))?;

    // A month token like "00" or "13" matches \d{2} but names no real month.
    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        return Err(SkipReason::InvalidMonth(month_text.to_string()));
    }

    Ok((name, year, month))
}

/// A named group that did not participate, or captured the empty string,
/// makes the whole match invalid.
fn capture<'t>(
    caps: &regex::Captures<'t>,
    group: &'static str,
) -> Result<&'t str, SkipReason> {
    let text = caps
        .name(group)
        .map(|m| m.as_str())
        .ok_or(SkipReason::EmptyCapture(group))?;
    if text.is_empty() {
        return Err(SkipReason::EmptyCapture(group));
    }
    Ok(text)
}
