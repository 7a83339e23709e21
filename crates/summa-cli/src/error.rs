//! Error conversion utilities for CLI.
//!
//! Converts summa-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use summa_core::IngestError;
use summa_core::TransferError;

/// Converts `IngestError` to user-friendly anyhow error with context
pub fn convert_ingest_error(err: IngestError) -> anyhow::Error {
    match err {
        IngestError::Transfer(TransferError::Status { url, status }) => {
            anyhow!(
                "Download of '{url}' failed with HTTP status {status}\n\
                 HINT: Check data_ingestion.source_url or pass --source-url."
            )
        }
        IngestError::Transfer(TransferError::Http { url, reason }) => {
            anyhow!(
                "Download of '{url}' failed: {reason}\n\
                 HINT: Check network connectivity, or use --timeout for slow links."
            )
        }
        IngestError::Transfer(TransferError::Io { path, source }) => {
            anyhow!(
                "Cannot write downloaded archive to '{}': {source}\n\
                 HINT: Check that the directory exists and is writable.",
                path.display()
            )
        }
        IngestError::ArchiveCorrupt { path, reason } => {
            let hint = if path.exists() {
                "The file may be a partial download. Delete it and run again."
            } else {
                "Check the archive path, or run `summa fetch` first."
            };
            anyhow!("Invalid archive '{}': {reason}\nHINT: {hint}", path.display())
        }
        IngestError::NameCollision {
            sanitized,
            first,
            second,
        } => {
            anyhow!(
                "Entries '{first}' and '{second}' both sanitize to '{sanitized}'\n\
                 HINT: Use --on-collision rename to keep both files."
            )
        }
        IngestError::UnsafeEntryPath { name } => {
            anyhow!(
                "Archive entry '{name}' points outside the output directory\n\
                 HINT: This archive may be malicious. Do not extract from untrusted sources."
            )
        }
        IngestError::UnsupportedFormat { path } => {
            anyhow!(
                "Archive format not supported: {}\n\
                 HINT: Supported formats: zip, tar.gz, tgz",
                path.display()
            )
        }
        IngestError::Config { reason } => {
            anyhow!(
                "Configuration error: {reason}\n\
                 HINT: Pass --config <FILE> or the --source-url, --archive and --unzip-dir flags."
            )
        }
        IngestError::TrainingSpawn { program, source } => {
            anyhow!(
                "Cannot start training program '{program}': {source}\n\
                 HINT: Check that training.program is installed and on PATH."
            )
        }
        other => anyhow::Error::from(other),
    }
}

/// Converts the error of a core result
pub fn add_ingest_context<T>(result: Result<T, IngestError>) -> anyhow::Result<T> {
    result.map_err(convert_ingest_error)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_convert_status_error() {
        let err = IngestError::Transfer(TransferError::Status {
            url: "https://example.test/data.zip".to_string(),
            status: 404,
        });
        let msg = format!("{:?}", convert_ingest_error(err));
        assert!(msg.contains("404"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_collision_error() {
        let err = IngestError::NameCollision {
            sanitized: "a_b.txt".to_string(),
            first: "a:b.txt".to_string(),
            second: "a?b.txt".to_string(),
        };
        let msg = format!("{:?}", convert_ingest_error(err));
        assert!(msg.contains("a?b.txt"));
        assert!(msg.contains("--on-collision"));
    }

    #[test]
    fn test_convert_corrupt_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("data.zip");
        std::fs::write(&path, b"junk").unwrap();
        let err = IngestError::ArchiveCorrupt {
            path,
            reason: "invalid Zip archive".to_string(),
        };
        let msg = format!("{:?}", convert_ingest_error(err));
        assert!(msg.contains("data.zip"));
        assert!(msg.contains("partial download"));
    }

    #[test]
    fn test_convert_missing_archive_error() {
        let err = IngestError::ArchiveCorrupt {
            path: PathBuf::from("definitely/not/here.zip"),
            reason: "cannot open: No such file or directory".to_string(),
        };
        let msg = format!("{:?}", convert_ingest_error(err));
        assert!(msg.contains("summa fetch"));
    }

    #[test]
    fn test_training_failure_keeps_core_message() {
        let err = IngestError::TrainingFailed {
            program: "python".to_string(),
            code: Some(2),
            stderr: "boom".to_string(),
        };
        let msg = convert_ingest_error(err).to_string();
        assert!(msg.contains("python"));
        assert!(msg.contains("boom"));
    }
}
