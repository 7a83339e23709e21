//! Error types for ingestion runs.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `IngestError`.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Failure while retrieving the dataset archive.
#[derive(Error, Debug)]
pub enum TransferError {
    /// The request could not be completed (DNS, connect, TLS, body read).
    #[error("download failed for {url}: {reason}")]
    Http {
        /// The requested URL.
        url: String,
        /// Human-readable failure description.
        reason: String,
    },

    /// The server answered with a non-2xx status.
    #[error("download failed for {url}: server returned HTTP {status}")]
    Status {
        /// The requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be written to the local archive path.
    #[error("failed to write download to {path}: {source}")]
    Io {
        /// Local archive path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Coarse grouping of [`IngestError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network or download write failure.
    Transfer,
    /// The archive is unreadable or contains a rejected entry.
    Archive,
    /// Local directory or file creation failed.
    Filesystem,
    /// Configuration is missing or invalid.
    Config,
    /// The training subprocess failed.
    Training,
}

/// Errors that can occur during an ingestion run.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Fetching the archive failed.
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// Archive cannot be opened or parsed.
    #[error("archive {path} is corrupt: {reason}")]
    ArchiveCorrupt {
        /// Archive path.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// Directory or file creation or write failed during extraction.
    #[error("filesystem error at {path}: {source}")]
    Filesystem {
        /// The path being created or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Two distinct entry names sanitize to the same path.
    #[error("entries '{first}' and '{second}' both sanitize to '{sanitized}'")]
    NameCollision {
        /// The shared sanitized name.
        sanitized: String,
        /// The raw name seen first.
        first: String,
        /// The raw name seen second.
        second: String,
    },

    /// Entry would resolve outside the destination directory.
    #[error("entry '{name}' escapes the destination directory")]
    UnsafeEntryPath {
        /// Raw entry name.
        name: String,
    },

    /// Archive format could not be determined from the path.
    #[error("unsupported archive format: {path}")]
    UnsupportedFormat {
        /// Archive path.
        path: PathBuf,
    },

    /// Configuration is missing or invalid.
    #[error("invalid configuration: {reason}")]
    Config {
        /// What is wrong.
        reason: String,
    },

    /// The training program could not be started.
    #[error("failed to start training program '{program}': {source}")]
    TrainingSpawn {
        /// Program name.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The training program exited unsuccessfully.
    #[error("training program '{program}' failed with {}: {stderr}", describe_exit(.code))]
    TrainingFailed {
        /// Program name.
        program: String,
        /// Exit code, `None` if terminated by a signal.
        code: Option<i32>,
        /// Tail of captured stderr.
        stderr: String,
    },
}

#[allow(clippy::ref_option)]
fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_string(), |c| format!("exit code {c}"))
}

impl IngestError {
    /// Wraps an I/O error with the path it occurred at.
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Builds an `ArchiveCorrupt` error from any displayable parser error.
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::ArchiveCorrupt {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns the category this error belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use summa_core::IngestError;
    /// use summa_core::error::ErrorCategory;
    ///
    /// let err = IngestError::UnsafeEntryPath {
    ///     name: "../etc/passwd".to_string(),
    /// };
    /// assert_eq!(err.category(), ErrorCategory::Archive);
    /// ```
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Transfer(_) => ErrorCategory::Transfer,
            Self::ArchiveCorrupt { .. }
            | Self::NameCollision { .. }
            | Self::UnsafeEntryPath { .. }
            | Self::UnsupportedFormat { .. } => ErrorCategory::Archive,
            Self::Filesystem { .. } => ErrorCategory::Filesystem,
            Self::Config { .. } => ErrorCategory::Config,
            Self::TrainingSpawn { .. } | Self::TrainingFailed { .. } => ErrorCategory::Training,
        }
    }

    /// Returns the path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Transfer(TransferError::Io { path, .. })
            | Self::ArchiveCorrupt { path, .. }
            | Self::Filesystem { path, .. }
            | Self::UnsupportedFormat { path } => Some(path),
            _ => None,
        }
    }
}
