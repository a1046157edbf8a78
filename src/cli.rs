//! Command-line interface: configure a rotator from flags, run one pass,
//! render the report. Kept thin — all decisions live in [`crate::rotation`].

use crate::rotation::LogRotator;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Delete month-stamped log files past a retention window.
#[derive(Debug, Parser)]
#[command(name = "logsweep", version, about)]
pub struct Cli {
    /// Directory containing the dated log files
    pub directory: PathBuf,

    /// File extension to match; repeat for several (bare, no leading dot)
    #[arg(long = "ext", value_name = "EXT", default_values_t = [String::from("log")])]
    pub extensions: Vec<String>,

    /// Months of logs to keep (values below 1 clamp to 1)
    #[arg(long, value_name = "MONTHS", default_value_t = 6)]
    pub retention: i64,

    /// Base matching pattern with named captures `name`, `year`, `month`
    #[arg(long, value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Compute and log deletions without removing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Flag validation failures exit non-zero; everything past that point is
/// fail-soft and reported through the rendered summary instead.
#[must_use]
pub fn run(cli: &Cli) -> ExitCode {
    let mut rotator = LogRotator::new(&cli.directory);

    if let Err(e) = rotator.set_extensions(cli.extensions.iter().map(String::as_str)) {
        eprintln!("logsweep: {e}");
        return ExitCode::FAILURE;
    }
    if let Some(pattern) = &cli.pattern {
        if let Err(e) = rotator.set_pattern(pattern) {
            eprintln!("logsweep: {e}");
            return ExitCode::FAILURE;
        }
    }
    rotator.set_retention_months(cli.retention);
    rotator.set_dry_run(cli.dry_run);

    let report = rotator.rotate();

    if cli.dry_run {
        println!(
            "Would delete {} file(s) (retention: {} months)",
            report.would_delete.len(),
            report.retention_months
        );
        for path in &report.would_delete {
            println!("  {}", path.display());
        }
    } else {
        println!(
            "Deleted {} file(s) (retention: {} months)",
            report.deleted.len(),
            report.retention_months
        );
        for path in &report.deleted {
            println!("  {}", path.display());
        }
    }

    // Individual failures shouldn't abort or fail the run — surface and move on
    for (path, reason) in &report.failed {
        eprintln!("logsweep: failed to delete {}: {reason}", path.display());
    }
    for skipped in &report.skipped {
        eprintln!("logsweep: skipped {}: {}", skipped.file_name, skipped.reason);
    }

    ExitCode::SUCCESS
}
