//! Unified error type for all logsweep operations.

/// Error type for logsweep configuration and I/O.
#[derive(Debug)]
pub enum Error {
    /// I/O error.
    Io(std::io::Error),
    /// Base pattern failed to compile as a regular expression.
    InvalidPattern(regex::Error),
    /// Pattern does not expose exactly the `name`, `year` and `month` captures.
    CaptureContract(String),
    /// Extension list was empty or an entry reduced to the empty string.
    InvalidExtensions(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidPattern(e) => write!(f, "invalid pattern: {e}"),
            Self::CaptureContract(s) => write!(f, "capture contract violated: {s}"),
            Self::InvalidExtensions(s) => write!(f, "invalid extensions: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidPattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Self {
        Self::InvalidPattern(e)
    }
}
