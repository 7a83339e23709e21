//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use summa_core::FetchOutcome;
use summa_core::IngestionReport;
use summa_core::TrainingOutcome;
use summa_core::UnpackReport;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the result of a fetch
    fn format_fetch_result(&self, outcome: &FetchOutcome) -> Result<()>;

    /// Format the result of a standalone unpack
    fn format_unpack_result(&self, output_dir: &Path, report: &UnpackReport) -> Result<()>;

    /// Format the result of a full ingestion run
    fn format_ingestion_result(&self, report: &IngestionReport) -> Result<()>;

    /// Format the result of a training run
    fn format_training_result(&self, program: &str, outcome: &TrainingOutcome) -> Result<()>;
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
        }
    }
}
