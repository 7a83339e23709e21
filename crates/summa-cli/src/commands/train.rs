//! Train command implementation.

use crate::cli::TrainArgs;
use crate::error::add_ingest_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use summa_core::ConfigFile;
use summa_core::run_training;

pub fn execute(args: &TrainArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let file = add_ingest_context(ConfigFile::load(&args.config))?;
    let training = add_ingest_context(file.training())?;

    let outcome = add_ingest_context(run_training(training))?;
    formatter.format_training_result(&training.program, &outcome)
}
