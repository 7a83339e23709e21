//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use summa_core::FetchOutcome;
use summa_core::IngestionReport;
use summa_core::TrainingOutcome;
use summa_core::UnpackReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn headline(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }

    fn fetch_line(outcome: &FetchOutcome) -> String {
        match outcome {
            FetchOutcome::AlreadyPresent { path, size } => format!(
                "  Archive: {} (already present, {})",
                path.display(),
                humanize_bytes(*size)
            ),
            FetchOutcome::Downloaded { path, info } => format!(
                "  Archive: {} (downloaded, {}, HTTP {})",
                path.display(),
                humanize_bytes(info.bytes_written),
                info.status
            ),
        }
    }

    fn unpack_lines(&self, report: &UnpackReport) {
        let _ = self
            .term
            .write_line(&format!("  Files extracted: {}", report.files_extracted));
        let _ = self
            .term
            .write_line(&format!("  Directories: {}", report.directories_created));
        let _ = self.term.write_line(&format!(
            "  Total size: {}",
            humanize_bytes(report.bytes_written)
        ));
        if report.names_sanitized > 0 {
            let _ = self
                .term
                .write_line(&format!("  Names sanitized: {}", report.names_sanitized));
        }

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Collisions: {}", report.collisions));
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
        }

        if report.has_warnings() {
            let _ = self.term.write_line("");
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                let _ = self.term.write_line("Warnings:");
            }
            for warning in &report.warnings {
                let _ = self.term.write_line(&format!("  - {warning}"));
            }
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_fetch_result(&self, outcome: &FetchOutcome) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline("Fetch complete");
        let _ = self.term.write_line(&Self::fetch_line(outcome));
        Ok(())
    }

    fn format_unpack_result(&self, output_dir: &Path, report: &UnpackReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!("Extraction complete: {}", output_dir.display()));
        self.unpack_lines(report);
        Ok(())
    }

    fn format_ingestion_result(&self, report: &IngestionReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!(
            "Ingestion complete: {}",
            report.unzip_dir.display()
        ));
        let _ = self.term.write_line(&Self::fetch_line(&report.fetch));
        self.unpack_lines(&report.unpack);
        Ok(())
    }

    fn format_training_result(&self, program: &str, outcome: &TrainingOutcome) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!("Training complete: {program}"));
        let _ = self
            .term
            .write_line(&format!("  Exit code: {}", outcome.exit_code));
        let _ = self
            .term
            .write_line(&format!("  Duration: {:.1}s", outcome.duration.as_secs_f64()));

        if self.verbose && !outcome.stdout.is_empty() {
            let _ = self.term.write_line("");
            let _ = self.term.write_line(outcome.stdout.trim_end());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use summa_core::TransferInfo;

    #[test]
    fn test_fetch_line_already_present() {
        let line = HumanFormatter::fetch_line(&FetchOutcome::AlreadyPresent {
            path: PathBuf::from("data.zip"),
            size: 2048,
        });
        assert_eq!(line, "  Archive: data.zip (already present, 2.0 KB)");
    }

    #[test]
    fn test_fetch_line_downloaded() {
        let line = HumanFormatter::fetch_line(&FetchOutcome::Downloaded {
            path: PathBuf::from("data.zip"),
            info: TransferInfo {
                status: 200,
                bytes_written: 10,
                ..TransferInfo::default()
            },
        });
        assert!(line.contains("downloaded"));
        assert!(line.contains("HTTP 200"));
    }
}
