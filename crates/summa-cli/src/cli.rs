//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;
use summa_core::CollisionPolicy;

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "config/config.toml";

#[derive(Parser)]
#[command(name = "summa")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the dataset archive if absent, then unpack it
    Ingest(IngestArgs),
    /// Download the dataset archive if absent, without unpacking
    Fetch(FetchArgs),
    /// Unpack a local archive with filename sanitization
    Extract(ExtractArgs),
    /// Run the configured training program
    Train(TrainArgs),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config file selection and per-field overrides of `[data_ingestion]`.
#[derive(clap::Args, Default)]
pub struct SourceArgs {
    /// Configuration file [default: config/config.toml]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override data_ingestion.source_url
    #[arg(long, value_name = "URL")]
    pub source_url: Option<String>,

    /// Override data_ingestion.local_data_file
    #[arg(long, value_name = "FILE")]
    pub archive: Option<PathBuf>,

    /// Override data_ingestion.unzip_dir
    #[arg(long, value_name = "DIR")]
    pub unzip_dir: Option<PathBuf>,

    /// Fail downloads that take longer than this many seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

#[derive(clap::Args)]
pub struct IngestArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Override data_ingestion.collision_policy
    #[arg(long, value_name = "POLICY", value_parser = parse_collision_policy)]
    pub on_collision: Option<CollisionPolicy>,
}

#[derive(clap::Args)]
pub struct FetchArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// What to do when two entries sanitize to the same name
    #[arg(
        long,
        value_name = "POLICY",
        default_value = "last-write-wins",
        value_parser = parse_collision_policy
    )]
    pub on_collision: CollisionPolicy,
}

#[derive(clap::Args)]
pub struct TrainArgs {
    /// Configuration file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Parse a collision policy name (last-write-wins, reject, rename)
fn parse_collision_policy(s: &str) -> Result<CollisionPolicy, String> {
    s.trim().parse().map_err(|e: summa_core::IngestError| e.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_collision_policy() {
        assert_eq!(
            parse_collision_policy("rename").unwrap(),
            CollisionPolicy::Rename
        );
        assert_eq!(
            parse_collision_policy(" reject ").unwrap(),
            CollisionPolicy::Reject
        );
        assert!(parse_collision_policy("overwrite").is_err());
    }

    #[test]
    fn test_ingest_overrides_parse() {
        let cli = Cli::try_parse_from([
            "summa",
            "ingest",
            "--source-url",
            "https://example.test/d.zip",
            "--archive",
            "d.zip",
            "--unzip-dir",
            "out",
            "--on-collision",
            "reject",
        ])
        .unwrap();
        let Commands::Ingest(args) = cli.command else {
            panic!("expected ingest");
        };
        assert_eq!(args.source.archive.unwrap(), PathBuf::from("d.zip"));
        assert_eq!(args.on_collision, Some(CollisionPolicy::Reject));
        assert!(args.source.config.is_none());
    }

    #[test]
    fn test_extract_defaults() {
        let cli = Cli::try_parse_from(["summa", "extract", "data.zip"]).unwrap();
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.on_collision, CollisionPolicy::LastWriteWins);
        assert!(args.output_dir.is_none());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["summa", "-q", "-v", "extract", "a.zip"]).is_err());
    }
}
