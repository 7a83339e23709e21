//! Ingest command implementation.

use super::http_fetcher;
use super::resolve_ingestion_config;
use crate::cli::IngestArgs;
use crate::error::add_ingest_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use summa_core::NoopProgress;
use summa_core::ProgressCallback;
use summa_core::formats::detect_format;
use summa_core::formats::unpacker_for;
use summa_core::run_ingestion;

pub fn execute(args: &IngestArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let mut config = resolve_ingestion_config(&args.source)?;
    if let Some(policy) = args.on_collision {
        config = config.with_collision_policy(policy);
    }

    // Reject unknown archive types before touching the network.
    let format = add_ingest_context(detect_format(config.local_data_file()))?;
    let unpacker = unpacker_for(format, config.unpack_options());
    let fetcher = http_fetcher(&args.source);
    tracing::debug!(
        url = config.source_url(),
        archive = %config.local_data_file().display(),
        ?format,
        policy = config.collision_policy().as_str(),
        "resolved ingestion config"
    );

    let mut progress: Box<dyn ProgressCallback> = if show_progress {
        Box::new(CliProgress::new("Extracting"))
    } else {
        Box::new(NoopProgress)
    };
    let report = add_ingest_context(run_ingestion(
        &config,
        &fetcher,
        unpacker.as_ref(),
        progress.as_mut(),
    ))?;
    drop(progress);

    formatter.format_ingestion_result(&report)
}
