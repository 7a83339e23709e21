//! Gzip-compressed TAR unpacker.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use flate2::read::GzDecoder;

use super::common::UnpackSession;
use super::traits::Unpacker;
use crate::IngestError;
use crate::ProgressCallback;
use crate::Result;
use crate::UnpackReport;
use crate::config::UnpackOptions;
use crate::types::ArchiveEntry;

/// `.tar.gz` unpacker.
///
/// Directory entries are taken from the header type. Links and special
/// files are skipped with a report warning.
#[derive(Debug, Clone, Default)]
pub struct TarGzUnpacker {
    options: UnpackOptions,
}

impl TarGzUnpacker {
    /// Creates a TAR.GZ unpacker with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a TAR.GZ unpacker with the given options.
    #[must_use]
    pub const fn with_options(options: UnpackOptions) -> Self {
        Self { options }
    }
}

impl Unpacker for TarGzUnpacker {
    fn extract(
        &self,
        archive_path: &Path,
        destination_dir: &Path,
        progress: &mut dyn ProgressCallback,
    ) -> Result<UnpackReport> {
        let mut session = UnpackSession::begin(archive_path, destination_dir, self.options)?;

        let file = File::open(archive_path)
            .map_err(|e| IngestError::corrupt(archive_path, format!("cannot open: {e}")))?;
        let mut archive = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
        let entries = archive
            .entries()
            .map_err(|e| IngestError::corrupt(archive_path, e))?;

        for (index, item) in entries.enumerate() {
            let mut tar_entry = item.map_err(|e| IngestError::corrupt(archive_path, e))?;
            let raw_name = String::from_utf8_lossy(&tar_entry.path_bytes()).into_owned();
            let kind = tar_entry.header().entry_type();

            let entry = if kind.is_dir() {
                ArchiveEntry::with_kind(raw_name, true)
            } else if kind.is_file() {
                ArchiveEntry::with_kind(raw_name, false)
            } else {
                session.skip(&raw_name, "links and special files are not extracted");
                continue;
            };
            let display_path = Path::new(entry.sanitized_name());

            progress.on_entry_start(display_path, 0, index + 1);
            if entry.is_directory() {
                session.create_directory(&entry)?;
            } else {
                session.write_file(&entry, &mut tar_entry, progress)?;
            }
            progress.on_entry_complete(display_path);
        }

        progress.on_complete();
        Ok(session.finish())
    }

    fn format_name(&self) -> &str {
        "tar.gz"
    }
}
