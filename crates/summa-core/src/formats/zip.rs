//! ZIP archive unpacker.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::common::UnpackSession;
use super::traits::Unpacker;
use crate::IngestError;
use crate::ProgressCallback;
use crate::Result;
use crate::UnpackReport;
use crate::config::UnpackOptions;
use crate::types::ArchiveEntry;

/// ZIP archive unpacker.
///
/// A name ending in `/` is a directory entry; everything else is written
/// as a regular file.
#[derive(Debug, Clone, Default)]
pub struct ZipUnpacker {
    options: UnpackOptions,
}

impl ZipUnpacker {
    /// Creates a ZIP unpacker with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ZIP unpacker with the given options.
    #[must_use]
    pub const fn with_options(options: UnpackOptions) -> Self {
        Self { options }
    }
}

impl Unpacker for ZipUnpacker {
    fn extract(
        &self,
        archive_path: &Path,
        destination_dir: &Path,
        progress: &mut dyn ProgressCallback,
    ) -> Result<UnpackReport> {
        let mut session = UnpackSession::begin(archive_path, destination_dir, self.options)?;

        let file = File::open(archive_path)
            .map_err(|e| IngestError::corrupt(archive_path, format!("cannot open: {e}")))?;
        let mut archive = zip::ZipArchive::new(BufReader::new(file))
            .map_err(|e| IngestError::corrupt(archive_path, e))?;

        let total = archive.len();
        tracing::debug!(archive = %archive_path.display(), entries = total, "opened zip archive");

        for index in 0..total {
            let mut zip_entry = archive
                .by_index(index)
                .map_err(|e| IngestError::corrupt(archive_path, e))?;
            let entry = ArchiveEntry::new(zip_entry.name());
            let display_path = Path::new(entry.sanitized_name());

            progress.on_entry_start(display_path, total, index + 1);
            if entry.is_directory() {
                session.create_directory(&entry)?;
            } else {
                session.write_file(&entry, &mut zip_entry, progress)?;
            }
            progress.on_entry_complete(display_path);
        }

        progress.on_complete();
        Ok(session.finish())
    }

    fn format_name(&self) -> &str {
        "zip"
    }
}
