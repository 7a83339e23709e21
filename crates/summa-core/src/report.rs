//! Fetch, unpack, and ingestion reporting.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// Response metadata from a completed download.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferInfo {
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header, if sent.
    pub content_type: Option<String>,
    /// `Content-Length` header, if sent.
    pub content_length: Option<u64>,
    /// Bytes written to the local file.
    pub bytes_written: u64,
}

/// What the fetcher did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The archive was already on disk; nothing was transferred.
    AlreadyPresent {
        /// Local archive path.
        path: PathBuf,
        /// Size of the existing file in bytes.
        size: u64,
    },
    /// The archive was downloaded.
    Downloaded {
        /// Local archive path.
        path: PathBuf,
        /// Response metadata.
        info: TransferInfo,
    },
}

impl FetchOutcome {
    /// Local archive path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::AlreadyPresent { path, .. } | Self::Downloaded { path, .. } => path,
        }
    }

    /// Whether a network transfer happened.
    #[must_use]
    pub const fn was_downloaded(&self) -> bool {
        matches!(self, Self::Downloaded { .. })
    }

    /// Size of the local archive in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        match self {
            Self::AlreadyPresent { size, .. } => *size,
            Self::Downloaded { info, .. } => info.bytes_written,
        }
    }
}

/// Report of an archive unpack operation.
#[derive(Debug, Clone, Default)]
pub struct UnpackReport {
    /// Number of files written.
    pub files_extracted: usize,

    /// Number of directory entries created.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Entries whose names contained forbidden characters.
    pub names_sanitized: usize,

    /// Sanitization collisions encountered.
    pub collisions: usize,

    /// Duration of the operation.
    pub duration: Duration,

    /// Warnings generated during extraction.
    pub warnings: Vec<String>,
}

impl UnpackReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns total number of entries processed.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Report of a complete fetch-then-unpack run.
#[derive(Debug, Clone)]
pub struct IngestionReport {
    /// Fetch result.
    pub fetch: FetchOutcome,
    /// Unpack result.
    pub unpack: UnpackReport,
    /// Directory the archive was unpacked into.
    pub unzip_dir: PathBuf,
}

/// Callback trait for progress reporting during unpacking.
///
/// # Examples
///
/// ```
/// use summa_core::ProgressCallback;
/// use std::path::Path;
///
/// struct Counter(usize);
///
/// impl ProgressCallback for Counter {
///     fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///     fn on_entry_complete(&mut self, _path: &Path) {
///         self.0 += 1;
///     }
///     fn on_complete(&mut self) {}
/// }
/// ```
pub trait ProgressCallback {
    /// Called before an entry is processed.
    ///
    /// `total` is the number of entries when the format knows it up front
    /// (zip), or 0 otherwise. `current` is 1-indexed.
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called as file bytes are written.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called after an entry has been written.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called when the whole archive has been processed.
    fn on_complete(&mut self);
}

/// `ProgressCallback` that ignores every event.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}

/// Formats a byte count the way the fetcher logs file sizes (`~ N KB`).
///
/// # Examples
///
/// ```
/// use summa_core::report::approx_kb;
///
/// assert_eq!(approx_kb(2048), "~ 2 KB");
/// assert_eq!(approx_kb(100), "~ 0 KB");
/// ```
#[must_use]
pub fn approx_kb(bytes: u64) -> String {
    format!("~ {} KB", bytes.saturating_add(512) / 1024)
}
