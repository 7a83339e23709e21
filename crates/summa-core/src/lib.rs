//! Dataset ingestion for training pipelines.
//!
//! `summa-core` fetches a dataset archive over HTTP when it is not already
//! on disk and unpacks it into a working directory. Entry names are
//! sanitized on the way out: `:`, `?`, `*` and `|` are replaced with `_`
//! so the extracted tree is valid on every common filesystem.
//!
//! # Examples
//!
//! ```no_run
//! use summa_core::IngestionConfig;
//! use summa_core::ingest;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IngestionConfig::new(
//!     "https://example.com/data.zip",
//!     "artifacts/data_ingestion/data.zip",
//!     "artifacts/data_ingestion",
//! )
//! .with_root_dir("artifacts/data_ingestion");
//! let report = ingest(&config)?;
//! println!("Extracted {} files", report.unpack.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod error;
pub mod fetch;
pub mod formats;
pub mod report;
pub mod training;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use api::extract_archive;
pub use api::ingest;
pub use api::run_ingestion;
pub use config::CollisionPolicy;
pub use config::ConfigFile;
pub use config::IngestionConfig;
pub use config::IngestionSection;
pub use config::UnpackOptions;
pub use error::ErrorCategory;
pub use error::IngestError;
pub use error::Result;
pub use error::TransferError;
pub use fetch::Fetcher;
pub use fetch::HttpFetcher;
pub use fetch::Transport;
pub use fetch::UreqTransport;
pub use formats::TarGzUnpacker;
pub use formats::Unpacker;
pub use formats::ZipUnpacker;
pub use report::FetchOutcome;
pub use report::IngestionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use report::TransferInfo;
pub use report::UnpackReport;
pub use training::TrainingConfig;
pub use training::TrainingOutcome;
pub use training::run_training;
pub use types::ArchiveEntry;
pub use types::sanitize_name;
