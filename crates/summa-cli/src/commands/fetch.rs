//! Fetch command implementation.

use super::http_fetcher;
use super::resolve_ingestion_config;
use crate::cli::FetchArgs;
use crate::error::add_ingest_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use std::fs;
use summa_core::Fetcher;

pub fn execute(args: &FetchArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = resolve_ingestion_config(&args.source)?;

    if let Some(parent) = config
        .local_data_file()
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory '{}'", parent.display()))?;
    }

    let outcome = add_ingest_context(http_fetcher(&args.source).ensure_local(&config))?;
    formatter.format_fetch_result(&outcome)
}
