//! Dataset archive retrieval.
//!
//! The fetcher makes sure the archive named by an [`IngestionConfig`] is on
//! disk, downloading it only when it is absent. An existing file is never
//! re-validated or replaced.

pub mod transport;

use std::fs;
use std::io;

pub use transport::Transport;
pub use transport::UreqTransport;

use crate::FetchOutcome;
use crate::IngestionConfig;
use crate::Result;
use crate::TransferError;
use crate::report::approx_kb;

/// Ensures a dataset archive exists locally.
pub trait Fetcher {
    /// Downloads `config.source_url()` to `config.local_data_file()` unless
    /// that path already exists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::IngestError::Transfer`] if the download or write
    /// fails. No retry is attempted and partial files are left in place.
    fn ensure_local(&self, config: &IngestionConfig) -> Result<FetchOutcome>;
}

/// Fetcher that downloads through a [`Transport`].
///
/// # Examples
///
/// ```no_run
/// use summa_core::IngestionConfig;
/// use summa_core::fetch::Fetcher;
/// use summa_core::fetch::HttpFetcher;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = IngestionConfig::new(
///     "https://example.com/data.zip",
///     "artifacts/data.zip",
///     "artifacts/data",
/// );
/// let outcome = HttpFetcher::new().ensure_local(&config)?;
/// println!("archive at {} ({} bytes)", outcome.path().display(), outcome.size());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher<T = UreqTransport> {
    transport: T,
}

impl HttpFetcher {
    /// Creates a fetcher using the default `ureq` transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Transport> HttpFetcher<T> {
    /// Creates a fetcher using the given transport.
    pub const fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> Fetcher for HttpFetcher<T> {
    fn ensure_local(&self, config: &IngestionConfig) -> Result<FetchOutcome> {
        let path = config.local_data_file();

        match fs::metadata(path) {
            Ok(metadata) => {
                tracing::info!(
                    path = %path.display(),
                    "File already exists of size: {}",
                    approx_kb(metadata.len())
                );
                return Ok(FetchOutcome::AlreadyPresent {
                    path: path.to_path_buf(),
                    size: metadata.len(),
                });
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(TransferError::Io {
                    path: path.to_path_buf(),
                    source,
                }
                .into());
            }
        }

        tracing::info!(url = config.source_url(), path = %path.display(), "downloading archive");
        let info = self.transport.download(config.source_url(), path)?;
        tracing::info!(
            path = %path.display(),
            status = info.status,
            content_type = info.content_type.as_deref().unwrap_or("-"),
            content_length = ?info.content_length,
            bytes = info.bytes_written,
            "downloaded archive"
        );

        Ok(FetchOutcome::Downloaded {
            path: path.to_path_buf(),
            info,
        })
    }
}
