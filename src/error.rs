//! Error types for the sync-log reorg scanner.
//!
//! This module provides a unified error type [`ScanError`] covering every way a
//! scan can fail: a missing filename, an unreadable log file, a bad
//! configuration value, or a failed write of the report.
//!
//! # Design
//!
//! - [`ScanError::Usage`]: no filename given; the CLI answers with a usage line
//! - [`ScanError::FileAccess`]: the log file could not be opened or read
//! - [`ScanError::Config`]: an environment or flag value could not be parsed
//! - [`ScanError::Output`]: the report could not be written
//!
//! Lines that do not match the sync-height pattern are never errors.
//!
//! # Example
//!
//! ```
//! use reorg_scan::error::{ScanError, ScanResult};
//!
//! fn require_path(arg: Option<&str>) -> ScanResult<&str> {
//!     arg.ok_or(ScanError::Usage)
//! }
//!
//! assert!(require_path(None).is_err());
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

/// Result type alias using [`ScanError`].
pub type ScanResult<T> = Result<T, ScanError>;

/// Unified error type for the reorg scanner.
#[derive(Debug)]
pub enum ScanError {
    /// No log file argument was supplied.
    Usage,

    /// The log file is missing, unreadable, or a read failed mid-scan.
    FileAccess {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Configuration or environment variable errors.
    ///
    /// Variants include:
    /// - Unknown detection mode
    /// - Unknown comparison rule
    Config {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Writing a notice to the output stream failed.
    Output {
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl ScanError {
    /// Create a new file access error.
    ///
    /// # Example
    ///
    /// ```
    /// use reorg_scan::error::ScanError;
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    /// let err = ScanError::file_access("sync.log", io);
    /// assert!(matches!(err, ScanError::FileAccess { .. }));
    /// ```
    #[must_use]
    pub fn file_access(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a new configuration error.
    ///
    /// # Example
    ///
    /// ```
    /// use reorg_scan::error::ScanError;
    ///
    /// let err = ScanError::config("REORG_SCAN_MODE must be 'legacy' or 'span'", None);
    /// assert!(matches!(err, ScanError::Config { .. }));
    /// ```
    #[must_use]
    pub fn config(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source,
        }
    }

    /// Create a new output error.
    #[must_use]
    pub const fn output(source: std::io::Error) -> Self {
        Self::Output { source }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage => write!(f, "Usage error: no log file given"),
            Self::FileAccess { path, source } => {
                write!(f, "File access error: {}: {source}", path.display())
            }
            Self::Config { message, .. } => write!(f, "Configuration error: {message}"),
            Self::Output { source } => write!(f, "Output error: {source}"),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Usage => None,
            Self::FileAccess { source, .. } | Self::Output { source } => Some(source),
            Self::Config { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &dyn std::error::Error),
        }
    }
}
