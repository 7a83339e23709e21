//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_ingest_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use std::env;
use summa_core::NoopProgress;
use summa_core::UnpackOptions;
use summa_core::extract_archive;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let options = UnpackOptions {
        collision_policy: args.on_collision,
    };

    let report = if show_progress {
        let mut progress = CliProgress::new("Extracting");
        add_ingest_context(extract_archive(
            &args.archive,
            &output_dir,
            options,
            &mut progress,
        ))?
    } else {
        add_ingest_context(extract_archive(
            &args.archive,
            &output_dir,
            options,
            &mut NoopProgress,
        ))?
    };

    formatter.format_unpack_result(&output_dir, &report)
}
