//! Supervised invocation of the external training routine.
//!
//! The training program is spawned directly (no shell), its output is
//! captured, and a non-zero exit status is reported as an error.

use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use std::time::Instant;

use serde::Deserialize;

use crate::IngestError;
use crate::Result;

/// Maximum number of stderr bytes carried in a `TrainingFailed` error.
const STDERR_TAIL_BYTES: usize = 4 * 1024;

/// How to launch the training program.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainingConfig {
    /// Program to execute.
    pub program: String,
    /// Arguments passed verbatim.
    #[serde(default)]
    pub args: Vec<String>,
    /// Working directory (inherits the current one when unset).
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

impl TrainingConfig {
    /// Creates a config for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// Result of a successful training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// Process exit code.
    pub exit_code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Wall-clock time of the run.
    pub duration: Duration,
}

/// Runs the training program to completion.
///
/// # Errors
///
/// Returns [`IngestError::TrainingSpawn`] if the program cannot be started
/// and [`IngestError::TrainingFailed`] if it exits unsuccessfully.
pub fn run_training(config: &TrainingConfig) -> Result<TrainingOutcome> {
    let start = Instant::now();

    let mut command = Command::new(&config.program);
    command.args(&config.args);
    if let Some(dir) = &config.working_dir {
        command.current_dir(dir);
    }

    tracing::info!(program = %config.program, args = ?config.args, "starting training");

    let output = command
        .output()
        .map_err(|source| IngestError::TrainingSpawn {
            program: config.program.clone(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let duration = start.elapsed();

    if !output.status.success() {
        tracing::error!(program = %config.program, status = %output.status, "training failed");
        return Err(IngestError::TrainingFailed {
            program: config.program.clone(),
            code: output.status.code(),
            stderr: tail(&stderr, STDERR_TAIL_BYTES).to_string(),
        });
    }

    tracing::info!(program = %config.program, ?duration, "training finished");

    Ok(TrainingOutcome {
        exit_code: output.status.code().unwrap_or_default(),
        stdout,
        stderr,
        duration,
    })
}

/// Returns at most the last `max` bytes of `text`, on a char boundary.
fn tail(text: &str, max: usize) -> &str {
    let trimmed = text.trim_end();
    if trimmed.len() <= max {
        return trimmed;
    }
    let mut start = trimmed.len() - max;
    while !trimmed.is_char_boundary(start) {
        start += 1;
    }
    &trimmed[start..]
}
