//! High-level ingestion API.

use std::fs::create_dir_all;
use std::path::Path;

use crate::IngestError;
use crate::IngestionConfig;
use crate::IngestionReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::UnpackReport;
use crate::config::UnpackOptions;
use crate::fetch::Fetcher;
use crate::fetch::HttpFetcher;
use crate::formats::Unpacker;
use crate::formats::detect_format;
use crate::formats::unpacker_for;

/// Extracts an archive into `output_dir`, detecting the format from the
/// file extension.
///
/// # Errors
///
/// Returns an error if:
/// - The extension is not a supported archive format
/// - The archive cannot be opened or parsed
/// - An entry name escapes `output_dir`
/// - A name collision occurs under [`crate::CollisionPolicy::Reject`]
/// - Writing to disk fails
///
/// # Examples
///
/// ```no_run
/// use summa_core::NoopProgress;
/// use summa_core::UnpackOptions;
/// use summa_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract_archive(
///     "artifacts/data.zip",
///     "artifacts/data",
///     UnpackOptions::default(),
///     &mut NoopProgress,
/// )?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    options: UnpackOptions,
    progress: &mut dyn ProgressCallback,
) -> Result<UnpackReport> {
    let archive_path = archive_path.as_ref();
    let format = detect_format(archive_path)?;
    let unpacker = unpacker_for(format, options);
    tracing::debug!(
        archive = %archive_path.display(),
        format = unpacker.format_name(),
        "selected unpacker"
    );
    unpacker.extract(archive_path, output_dir.as_ref(), progress)
}

/// Runs one ingestion: fetch the archive if absent, then unpack it.
///
/// Creates the configured root directory and the archive's parent
/// directory before fetching. The unpack step always runs, so re-running
/// over an existing archive refreshes the extracted tree.
///
/// # Errors
///
/// Propagates the first error from directory creation, fetching or
/// unpacking. Files written before the failure are left in place.
pub fn run_ingestion(
    config: &IngestionConfig,
    fetcher: &dyn Fetcher,
    unpacker: &dyn Unpacker,
    progress: &mut dyn ProgressCallback,
) -> Result<IngestionReport> {
    if let Some(root) = config.root_dir() {
        create_dir_all(root).map_err(|e| IngestError::filesystem(root, e))?;
        tracing::info!(path = %root.display(), "created directory");
    }
    if let Some(parent) = config
        .local_data_file()
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        create_dir_all(parent).map_err(|e| IngestError::filesystem(parent, e))?;
    }

    let fetch = fetcher.ensure_local(config)?;
    tracing::info!(
        archive = %fetch.path().display(),
        dest = %config.unzip_dir().display(),
        format = unpacker.format_name(),
        "unpacking archive"
    );
    let unpack = unpacker.extract(fetch.path(), config.unzip_dir(), progress)?;

    Ok(IngestionReport {
        fetch,
        unpack,
        unzip_dir: config.unzip_dir().to_path_buf(),
    })
}

/// Runs ingestion with the default HTTP fetcher and an unpacker chosen from
/// the extension of `local_data_file`.
///
/// # Errors
///
/// Returns [`IngestError::UnsupportedFormat`] before any network access if
/// the archive extension is not recognized, otherwise as
/// [`run_ingestion`].
///
/// # Examples
///
/// ```no_run
/// use summa_core::ConfigFile;
/// use summa_core::ingest;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let file = ConfigFile::load(Path::new("config/config.toml"))?;
/// let report = ingest(&file.ingestion()?)?;
/// println!("{} files in {}", report.unpack.files_extracted, report.unzip_dir.display());
/// # Ok(())
/// # }
/// ```
pub fn ingest(config: &IngestionConfig) -> Result<IngestionReport> {
    let format = detect_format(config.local_data_file())?;
    let unpacker = unpacker_for(format, config.unpack_options());
    run_ingestion(config, &HttpFetcher::new(), unpacker.as_ref(), &mut NoopProgress)
}
