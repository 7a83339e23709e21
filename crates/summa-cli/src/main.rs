//! Summa CLI - fetch and unpack summarization datasets, then run training.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use progress::CliProgress;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    logging::init(cli.verbose, cli.quiet);
    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let show_progress = !cli.quiet && !cli.json && CliProgress::should_show();

    match &cli.command {
        cli::Commands::Ingest(args) => commands::ingest::execute(args, &*formatter, show_progress),
        cli::Commands::Fetch(args) => commands::fetch::execute(args, &*formatter),
        cli::Commands::Extract(args) => {
            commands::extract::execute(args, &*formatter, show_progress)
        }
        cli::Commands::Train(args) => commands::train::execute(args, &*formatter),
        cli::Commands::Completion { shell } => {
            commands::completion::execute(*shell);
            Ok(())
        }
    }
}
