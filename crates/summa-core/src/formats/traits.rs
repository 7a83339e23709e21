//! Common trait for archive unpackers.

use std::path::Path;

use crate::ProgressCallback;
use crate::Result;
use crate::UnpackReport;

/// Extracts an archive file into a directory.
pub trait Unpacker {
    /// Extracts every entry of `archive_path` into `destination_dir`.
    ///
    /// `destination_dir` is created if missing. Entries are processed in
    /// archive order; nothing is rolled back if a later entry fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive is corrupt, an entry is unsafe or
    /// collides under a rejecting policy, or a filesystem write fails.
    fn extract(
        &self,
        archive_path: &Path,
        destination_dir: &Path,
        progress: &mut dyn ProgressCallback,
    ) -> Result<UnpackReport>;

    /// Returns the archive format name.
    fn format_name(&self) -> &str;
}
