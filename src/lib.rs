//! `logsweep` - delete month-stamped log files past a retention window.
//!
//! Scans a directory for files named like `name-YYYY-MM.ext`, parses the
//! embedded year/month, and removes files whose month falls strictly before
//! the retention cutoff. One-shot and fail-soft: a pass runs to completion,
//! reports per-file outcomes, and never propagates an error to the caller.
//!
//! # Example
//!
//! ```no_run
//! use logsweep::LogRotator;
//!
//! let mut rotator = LogRotator::new("/var/log/myapp");
//! rotator.set_extensions(["log", "txt"]).unwrap();
//! rotator.set_retention_months(6);
//! rotator.set_dry_run(true);
//!
//! let report = rotator.rotate();
//! println!("{} file(s) past retention", report.expired_count());
//! ```
//!
//! # Features
//!
//! - `cli` (default): enables the `logsweep` command-line binary

pub mod disk;
pub mod error;
pub mod rotation;

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use disk::{Disk, RealDisk};
pub use error::Error;
pub use rotation::{
    DEFAULT_PATTERN, DiscoveredEntry, DiscoveryReport, LogGroup, LogRotator, RotationConfig,
    RotationReport, SkipReason, Skipped, cutoff, discover,
};
