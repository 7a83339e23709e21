//! Subcommand implementations.

pub mod completion;
pub mod extract;
pub mod fetch;
pub mod ingest;
pub mod train;

use crate::cli::DEFAULT_CONFIG;
use crate::cli::SourceArgs;
use crate::error::add_ingest_context;
use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use summa_core::ConfigFile;
use summa_core::HttpFetcher;
use summa_core::IngestionConfig;
use summa_core::IngestionSection;
use summa_core::UreqTransport;

/// Builds the ingestion config from the config file and flag overrides.
///
/// Flags fill in or replace individual `[data_ingestion]` keys before the
/// result is validated, so the file may leave out keys given on the
/// command line. Without `--config`, a missing default file is tolerated
/// when the source URL, archive and unzip dir are all given as flags.
pub fn resolve_ingestion_config(args: &SourceArgs) -> Result<IngestionConfig> {
    let flags_complete =
        args.source_url.is_some() && args.archive.is_some() && args.unzip_dir.is_some();
    let default_path = Path::new(DEFAULT_CONFIG);

    let section = match &args.config {
        Some(path) => add_ingest_context(ConfigFile::load(path))?
            .data_ingestion
            .unwrap_or_default(),
        None if flags_complete && !default_path.exists() => IngestionSection::default(),
        None => add_ingest_context(ConfigFile::load(default_path))?
            .data_ingestion
            .unwrap_or_default(),
    };

    let merged = IngestionSection {
        source_url: args.source_url.clone().or(section.source_url),
        local_data_file: args.archive.clone().or(section.local_data_file),
        unzip_dir: args.unzip_dir.clone().or(section.unzip_dir),
        ..section
    };

    add_ingest_context(merged.resolve())
}

/// Builds the HTTP fetcher, applying `--timeout` when given.
pub fn http_fetcher(args: &SourceArgs) -> HttpFetcher {
    let transport = args
        .timeout
        .map_or_else(UreqTransport::new, |secs| {
            UreqTransport::with_timeout(Duration::from_secs(secs))
        });
    HttpFetcher::with_transport(transport)
}
