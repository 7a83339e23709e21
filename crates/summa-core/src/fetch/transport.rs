//! Blocking HTTP transport.
//!
//! The [`Transport`] trait is the seam between the fetcher and the network
//! so tests can substitute the download without a server.

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use ureq::http::header::CONTENT_LENGTH;
use ureq::http::header::CONTENT_TYPE;

use crate::TransferError;
use crate::copy::CopyBuffer;
use crate::copy::CopyError;
use crate::copy::copy_entry;
use crate::report::TransferInfo;

/// Retrieves a remote resource into a local file.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// Downloads `url` and writes the body verbatim to `dest`.
    ///
    /// `dest` is created or truncated. A partially written file is left in
    /// place on failure.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Status`] for non-2xx responses,
    /// [`TransferError::Http`] for network failures and
    /// [`TransferError::Io`] if `dest` cannot be written.
    fn download(&self, url: &str, dest: &Path) -> Result<TransferInfo, TransferError>;
}

/// Transport backed by a blocking `ureq` agent.
///
/// No timeout is applied unless one is configured with
/// [`UreqTransport::with_timeout`].
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Creates a transport with no global timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(ureq::Agent::config_builder().build())
    }

    /// Creates a transport that fails requests exceeding `timeout`.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::from_config(
            ureq::Agent::config_builder()
                .timeout_global(Some(timeout))
                .build(),
        )
    }

    fn from_config(config: ureq::config::Config) -> Self {
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn download(&self, url: &str, dest: &Path) -> Result<TransferInfo, TransferError> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;

        let status = response.status().as_u16();
        let headers = response.headers();
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_length = headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let io_error = |source| TransferError::Io {
            path: dest.to_path_buf(),
            source,
        };

        let file = File::create(dest).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        let mut body = response.into_body();
        let mut buffer = CopyBuffer::new();
        let bytes_written = copy_entry(&mut body.as_reader(), &mut writer, &mut buffer, |_| {})
            .map_err(|err| match err {
                CopyError::Read(e) => TransferError::Http {
                    url: url.to_string(),
                    reason: e.to_string(),
                },
                CopyError::Write(e) => io_error(e),
            })?;
        writer.flush().map_err(io_error)?;

        Ok(TransferInfo {
            status,
            content_type,
            content_length,
            bytes_written,
        })
    }
}

/// Map a ureq error to a [`TransferError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> TransferError {
    match err {
        ureq::Error::StatusCode(status) => TransferError::Status {
            url: url.to_string(),
            status: *status,
        },
        other => TransferError::Http {
            url: url.to_string(),
            reason: other.to_string(),
        },
    }
}
