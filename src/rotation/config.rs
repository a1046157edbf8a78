//! Rotation settings, separated from the sweep engine so callers can build
//! and inspect a policy without touching the filesystem.
//!
//! The compiled effective pattern is part of the config: it is recompiled
//! eagerly whenever the base pattern or the extension list changes, so a
//! config whose setters all succeeded always carries a usable matcher.

use crate::error::Error;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Capture names every base pattern must expose.
pub(crate) const REQUIRED_CAPTURES: [&str; 3] = ["name", "year", "month"];

/// Matches `name-YYYY-MM` base names, the shape produced by monthly rotation.
pub const DEFAULT_PATTERN: &str = r"(?P<name>.+)-(?P<year>\d{4})-(?P<month>\d{2})";

const DEFAULT_RETENTION_MONTHS: u32 = 6;

/// Everything a rotation pass needs to know, read-only while the pass runs.
#[derive(Debug, Clone)]
pub struct RotationConfig {
    directory: PathBuf,
    extensions: Vec<String>,
    base_pattern: String,
    /// Base pattern plus extension alternation, anchored. Rebuilt by the
    /// pattern and extension setters, never stale.
    effective: Regex,
    retention_months: u32,
    dry_run: bool,
}

impl RotationConfig {
    /// Defaults: `.log` files, `name-YYYY-MM` base names, six months kept,
    /// real deletions.
    ///
    /// Infallible because the default pattern and extension list always
    /// compile; only caller-supplied replacements can be rejected.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        let extensions = vec!["log".to_string()];
        let effective = compile_effective(DEFAULT_PATTERN, &extensions)
            .unwrap_or_else(|_| unreachable!("default pattern is valid"));
        Self {
            directory: directory.into(),
            extensions,
            base_pattern: DEFAULT_PATTERN.to_string(),
            effective,
            retention_months: DEFAULT_RETENTION_MONTHS,
            dry_run: false,
        }
    }

    /// Replace the extension list with a single extension.
    ///
    /// # Errors
    /// Rejects an extension that is empty after trimming any leading dot.
    pub fn set_extension(&mut self, extension: impl Into<String>) -> Result<(), Error> {
        self.set_extensions([extension.into()])
    }

    /// Replace the extension list, preserving the supplied order and
    /// dropping duplicates.
    ///
    /// # Errors
    /// Rejects an empty list or any entry that is empty after trimming a
    /// leading dot. On error the previous list and matcher stay in force.
    pub fn set_extensions<I, S>(&mut self, extensions: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cleaned: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.into();
            let bare = ext.trim().trim_start_matches('.').to_string();
            if bare.is_empty() {
                return Err(Error::InvalidExtensions(format!("empty extension {ext:?}")));
            }
            if !cleaned.contains(&bare) {
                cleaned.push(bare);
            }
        }
        if cleaned.is_empty() {
            return Err(Error::InvalidExtensions("extension list is empty".into()));
        }
        self.effective = compile_effective(&self.base_pattern, &cleaned)?;
        self.extensions = cleaned;
        Ok(())
    }

    /// Replace the base matching pattern.
    ///
    /// The pattern must expose exactly three capture groups, named `name`,
    /// `year` and `month`, and must not be anchored (anchors and the
    /// extension alternation are appended here).
    ///
    /// # Errors
    /// Rejects patterns that fail to compile or violate the capture
    /// contract. On error the previous pattern and matcher stay in force.
    pub fn set_pattern(&mut self, pattern: &str) -> Result<(), Error> {
        self.effective = compile_effective(pattern, &self.extensions)?;
        self.base_pattern = pattern.to_string();
        Ok(())
    }

    /// Months of logs to keep. Values below 1 clamp to 1 — a maintenance
    /// task should degrade to "keep the current month" rather than refuse
    /// to run.
    pub fn set_retention_months(&mut self, months: i64) {
        self.retention_months = u32::try_from(months.max(1)).unwrap_or(u32::MAX);
    }

    /// When enabled, deletion decisions are computed and logged but no file
    /// is removed.
    pub const fn set_dry_run(&mut self, dry_run: bool) {
        self.dry_run = dry_run;
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// The base pattern as supplied by the caller, without extension suffix.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.base_pattern
    }

    /// The anchored matcher actually applied to file names.
    #[must_use]
    pub const fn effective_pattern(&self) -> &Regex {
        &self.effective
    }

    #[must_use]
    pub const fn retention_months(&self) -> u32 {
        self.retention_months
    }

    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// The collaborator-facing enumeration pattern: `dir/*.ext` for one
    /// extension, `dir/*.{ext1,ext2}` for several. Diagnostic text only;
    /// enumeration itself runs one glob per extension.
    #[must_use]
    pub fn glob_pattern(&self) -> String {
        let suffix = if self.extensions.len() == 1 {
            self.extensions[0].clone()
        } else {
            format!("{{{}}}", self.extensions.join(","))
        };
        self.directory.join(format!("*.{suffix}")).display().to_string()
    }
}

/// Append a literal dot plus a non-capturing extension alternation to the
/// base pattern and anchor the whole thing, then enforce the capture
/// contract on the result.
fn compile_effective(base: &str, extensions: &[String]) -> Result<Regex, Error> {
    let alternation = extensions
        .iter()
        .map(|e| regex::escape(e))
        .collect::<Vec<_>>()
        .join("|");
    let re = Regex::new(&format!(r"^{base}\.(?:{alternation})$"))?;

    // captures_len counts the implicit whole-match group 0.
    if re.captures_len() != REQUIRED_CAPTURES.len() + 1 {
        return Err(Error::CaptureContract(format!(
            "pattern has {} capture group(s), expected exactly {}",
            re.captures_len() - 1,
            REQUIRED_CAPTURES.len(),
        )));
    }
    for required in REQUIRED_CAPTURES {
        if !re.capture_names().flatten().any(|n| n == required) {
            return Err(Error::CaptureContract(format!(
                "pattern is missing the `{required}` capture group"
            )));
        }
    }
    Ok(re)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_pattern_is_anchored_and_non_capturing_on_extensions() {
        let mut config = RotationConfig::new("/var/log/app");
        config.set_extensions(["log", "txt"]).unwrap();

        let re = config.effective_pattern();
        assert_eq!(re.captures_len(), 4);
        assert!(re.is_match("billing-2023-01.log"));
        assert!(re.is_match("billing-2023-01.txt"));
        assert!(!re.is_match("billing-2023-01.csv"));
        assert!(!re.is_match("prefix billing-2023-01.log"));
    }

    #[test]
    fn rejected_pattern_keeps_previous_matcher() {
        let mut config = RotationConfig::new("/var/log/app");
        let before = config.effective_pattern().as_str().to_string();

        // Unnamed groups violate the capture contract.
        let err = config.set_pattern(r"(.+)-(\d{4})-(\d{2})").unwrap_err();
        assert!(matches!(err, Error::CaptureContract(_)));
        assert_eq!(config.effective_pattern().as_str(), before);

        // So does a fourth capture group.
        let err = config
            .set_pattern(r"(?P<name>.+)-(?P<year>\d{4})-(?P<month>\d{2})(-(?P<day>\d{2}))?")
            .unwrap_err();
        assert!(matches!(err, Error::CaptureContract(_)));
        assert_eq!(config.effective_pattern().as_str(), before);
    }

    #[test]
    fn retention_clamps_to_one() {
        let mut config = RotationConfig::new("/var/log/app");
        config.set_retention_months(0);
        assert_eq!(config.retention_months(), 1);
        config.set_retention_months(-4);
        assert_eq!(config.retention_months(), 1);
        config.set_retention_months(12);
        assert_eq!(config.retention_months(), 12);
    }

    #[test]
    fn extensions_normalize_and_keep_order() {
        let mut config = RotationConfig::new("/var/log/app");
        config.set_extensions([".txt", "log", "txt"]).unwrap();
        assert_eq!(config.extensions(), ["txt", "log"]);

        assert!(config.set_extensions(Vec::<String>::new()).is_err());
        assert!(config.set_extension("  . ").is_err());
        // Failed setters leave the accepted list untouched.
        assert_eq!(config.extensions(), ["txt", "log"]);
    }

    #[test]
    fn glob_pattern_uses_brace_alternation_for_multiple_extensions() {
        let mut config = RotationConfig::new("/var/log/app");
        assert!(config.glob_pattern().ends_with("*.log"));
        config.set_extensions(["log", "txt"]).unwrap();
        assert!(config.glob_pattern().ends_with("*.{log,txt}"));
    }
}
