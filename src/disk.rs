//! Filesystem access lives behind a trait so the matching and retention
//! logic can run against a fake disk in tests, without touching real files.

use std::io;
use std::path::{Path, PathBuf};

/// The only four filesystem operations the core performs.
pub trait Disk {
    /// Whether `dir` exists and is a directory.
    fn dir_exists(&self, dir: &Path) -> bool;

    /// Whether files inside `dir` can be deleted.
    fn dir_writable(&self, dir: &Path) -> bool;

    /// Files directly under `dir` whose extension is in `extensions`.
    ///
    /// Order is extension-list order, alphabetical within one extension,
    /// so a rotation pass enumerates deterministically.
    fn list_files(&self, dir: &Path, extensions: &[String]) -> Vec<PathBuf>;

    /// Delete a single file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// Production implementation backed by `std::fs` and glob enumeration.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealDisk;

impl Disk for RealDisk {
    fn dir_exists(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    fn dir_writable(&self, dir: &Path) -> bool {
        std::fs::metadata(dir).is_ok_and(|m| !m.permissions().readonly())
    }

    fn list_files(&self, dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
        let mut files = Vec::new();
        // The glob crate has no brace alternation, so multiple extensions
        // become one glob pass per extension.
        for ext in extensions {
            let pattern = dir.join(format!("*.{ext}")).display().to_string();
            match glob::glob(&pattern) {
                Ok(paths) => files.extend(paths.flatten().filter(|p| p.is_file())),
                Err(e) => {
                    tracing::warn!(pattern = %pattern, error = %e, "Skipping unusable glob pattern");
                }
            }
        }
        files
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}
