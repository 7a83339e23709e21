//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use summa_core::FetchOutcome;
use summa_core::IngestionReport;
use summa_core::TrainingOutcome;
use summa_core::UnpackReport;

pub struct JsonFormatter;

#[derive(Serialize)]
struct FetchData {
    path: String,
    downloaded: bool,
    size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    http_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
}

impl From<&FetchOutcome> for FetchData {
    fn from(outcome: &FetchOutcome) -> Self {
        let (http_status, content_type) = match outcome {
            FetchOutcome::AlreadyPresent { .. } => (None, None),
            FetchOutcome::Downloaded { info, .. } => (Some(info.status), info.content_type.clone()),
        };
        Self {
            path: outcome.path().display().to_string(),
            downloaded: outcome.was_downloaded(),
            size: outcome.size(),
            http_status,
            content_type,
        }
    }
}

#[derive(Serialize)]
struct UnpackData {
    output_dir: String,
    files_extracted: usize,
    directories_created: usize,
    bytes_written: u64,
    names_sanitized: usize,
    collisions: usize,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl UnpackData {
    fn new(output_dir: &Path, report: &UnpackReport) -> Self {
        Self {
            output_dir: output_dir.display().to_string(),
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            names_sanitized: report.names_sanitized,
            collisions: report.collisions,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_fetch_result(&self, outcome: &FetchOutcome) -> Result<()> {
        Self::output(&JsonOutput::success("fetch", FetchData::from(outcome)))
    }

    fn format_unpack_result(&self, output_dir: &Path, report: &UnpackReport) -> Result<()> {
        Self::output(&JsonOutput::success(
            "extract",
            UnpackData::new(output_dir, report),
        ))
    }

    fn format_ingestion_result(&self, report: &IngestionReport) -> Result<()> {
        #[derive(Serialize)]
        struct IngestionData {
            fetch: FetchData,
            unpack: UnpackData,
        }

        let data = IngestionData {
            fetch: FetchData::from(&report.fetch),
            unpack: UnpackData::new(&report.unzip_dir, &report.unpack),
        };
        Self::output(&JsonOutput::success("ingest", data))
    }

    fn format_training_result(&self, program: &str, outcome: &TrainingOutcome) -> Result<()> {
        #[derive(Serialize)]
        struct TrainingData<'a> {
            program: &'a str,
            exit_code: i32,
            duration_ms: u128,
            stdout: &'a str,
        }

        let data = TrainingData {
            program,
            exit_code: outcome.exit_code,
            duration_ms: outcome.duration.as_millis(),
            stdout: &outcome.stdout,
        };
        Self::output(&JsonOutput::success("train", data))
    }
}
