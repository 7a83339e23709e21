//! Archive format detection.

use std::path::Path;

use super::tar::TarGzUnpacker;
use super::traits::Unpacker;
use super::zip::ZipUnpacker;
use crate::IngestError;
use crate::Result;
use crate::config::UnpackOptions;

/// Supported archive formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveType {
    /// ZIP archive.
    Zip,
    /// Gzip-compressed tar archive.
    TarGz,
}

/// Detects the archive type from a file path.
///
/// # Errors
///
/// Returns [`IngestError::UnsupportedFormat`] if the extension is not
/// recognized.
pub fn detect_format(path: &Path) -> Result<ArchiveType> {
    let unsupported = || IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    };
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(unsupported)?;

    match extension.to_ascii_lowercase().as_str() {
        "zip" => Ok(ArchiveType::Zip),
        "tgz" => Ok(ArchiveType::TarGz),
        "gz" => {
            let stem = path.file_stem().map(|s| s.to_string_lossy().to_ascii_lowercase());
            match stem {
                Some(stem) if stem.ends_with(".tar") => Ok(ArchiveType::TarGz),
                _ => Err(unsupported()),
            }
        }
        _ => Err(unsupported()),
    }
}

/// Returns the unpacker for `format`.
#[must_use]
pub fn unpacker_for(format: ArchiveType, options: UnpackOptions) -> Box<dyn Unpacker> {
    match format {
        ArchiveType::Zip => Box::new(ZipUnpacker::with_options(options)),
        ArchiveType::TarGz => Box::new(TarGzUnpacker::with_options(options)),
    }
}
