//! Tests for retention evaluation and deletion.

use chrono::NaiveDate;
use logsweep::{Disk, LogRotator, RotationConfig, cutoff};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), "log line\n").unwrap();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn deletes_only_entries_strictly_older_than_the_cutoff() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "billing-2023-01.log");
    touch(dir.path(), "billing-2024-02.log");
    touch(dir.path(), "audit-2023-01.log");

    let mut rotator = LogRotator::new(dir.path());
    rotator.set_retention_months(6);
    let report = rotator.rotate_at(date(2024, 3, 1));

    assert_eq!(report.cutoff, Some(date(2023, 9, 1)));
    assert_eq!(report.deleted.len(), 2);
    assert_eq!(report.retained.len(), 1);
    assert!(report.failed.is_empty());

    assert!(!dir.path().join("billing-2023-01.log").exists());
    assert!(!dir.path().join("audit-2023-01.log").exists());
    assert!(dir.path().join("billing-2024-02.log").exists());
}

#[test]
fn entry_dated_exactly_at_the_cutoff_month_is_retained() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "app-2023-09.log");
    touch(dir.path(), "app-2023-08.log");

    let mut rotator = LogRotator::new(dir.path());
    rotator.set_retention_months(6);
    // Last day of the month exercises the floor-then-subtract anchor.
    let report = rotator.rotate_at(date(2024, 3, 31));

    assert!(dir.path().join("app-2023-09.log").exists());
    assert!(!dir.path().join("app-2023-08.log").exists());
    assert_eq!(report.deleted, vec![dir.path().join("app-2023-08.log")]);
    assert_eq!(report.retained, vec![dir.path().join("app-2023-09.log")]);
}

#[test]
fn dry_run_records_decisions_but_removes_nothing() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "app-2020-01.log");
    touch(dir.path(), "app-2024-02.log");

    let mut rotator = LogRotator::new(dir.path());
    rotator.set_retention_months(6);
    rotator.set_dry_run(true);
    let report = rotator.rotate_at(date(2024, 3, 1));

    assert_eq!(report.would_delete, vec![dir.path().join("app-2020-01.log")]);
    assert!(report.deleted.is_empty());
    assert_eq!(report.expired_count(), 1);
    assert!(dir.path().join("app-2020-01.log").exists());
    assert!(dir.path().join("app-2024-02.log").exists());
}

#[test]
fn consecutive_dry_runs_make_identical_decisions() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "a-2020-01.log");
    touch(dir.path(), "b-2020-02.log");
    touch(dir.path(), "b-2024-02.log");

    let mut rotator = LogRotator::new(dir.path());
    rotator.set_retention_months(6);
    rotator.set_dry_run(true);

    let first = rotator.rotate_at(date(2024, 3, 1));
    let second = rotator.rotate_at(date(2024, 3, 1));

    assert_eq!(first.would_delete, second.would_delete);
    assert_eq!(first.retained, second.retained);
}

#[test]
fn missing_directory_yields_an_inert_pass_until_it_appears() {
    let base = tempdir().unwrap();
    let target = base.path().join("later");

    let mut rotator = LogRotator::new(&target);
    rotator.set_retention_months(6);

    let report = rotator.rotate_at(date(2024, 3, 1));
    assert_eq!(report.cutoff, None);
    assert!(report.deleted.is_empty());
    assert!(report.retained.is_empty());

    // Each pass re-validates, so the rotator recovers without rebuilding.
    fs::create_dir(&target).unwrap();
    touch(&target, "app-2020-01.log");
    let report = rotator.rotate_at(date(2024, 3, 1));
    assert_eq!(report.deleted.len(), 1);
    assert!(!target.join("app-2020-01.log").exists());
}

#[test]
fn retention_clamps_through_the_rotator() {
    let rotator = {
        let mut r = LogRotator::new("/var/log/app");
        r.set_retention_months(-3);
        r
    };
    assert_eq!(rotator.config().retention_months(), 1);
}

/// Disk whose deletions always fail, to exercise the fail-soft path.
struct ReadOnlyDisk {
    files: Vec<PathBuf>,
}

impl Disk for ReadOnlyDisk {
    fn dir_exists(&self, _dir: &Path) -> bool {
        true
    }
    fn dir_writable(&self, _dir: &Path) -> bool {
        true
    }
    fn list_files(&self, _dir: &Path, _extensions: &[String]) -> Vec<PathBuf> {
        self.files.clone()
    }
    fn remove_file(&self, path: &Path) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            format!("cannot delete {}", path.display()),
        ))
    }
}

#[test]
fn deletion_failures_are_recorded_and_do_not_abort_the_pass() {
    let disk = ReadOnlyDisk {
        files: vec![
            PathBuf::from("/virtual/a-2020-01.log"),
            PathBuf::from("/virtual/b-2020-01.log"),
            PathBuf::from("/virtual/b-2024-02.log"),
        ],
    };
    let mut config = RotationConfig::new("/virtual");
    config.set_retention_months(6);
    let rotator = LogRotator::with_disk(config, disk);

    let report = rotator.rotate_at(date(2024, 3, 1));

    // Both expired entries were attempted despite the first failure.
    assert_eq!(report.failed.len(), 2);
    assert!(report.deleted.is_empty());
    assert_eq!(report.retained, vec![PathBuf::from("/virtual/b-2024-02.log")]);
    assert_eq!(report.expired_count(), 2);
}

#[test]
fn cutoff_is_a_pure_function_of_today_and_retention() {
    assert_eq!(cutoff(date(2024, 3, 15), 6), date(2023, 9, 1));
    assert_eq!(cutoff(date(2024, 3, 15), 1), date(2024, 2, 1));
    assert_eq!(cutoff(date(2024, 1, 31), 2), date(2023, 11, 1));
}
