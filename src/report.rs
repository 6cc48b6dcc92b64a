//! End-of-batch reporting.
//!
//! Two renderings of the same [`BatchOutcome`]: a human-readable block
//! written to stdout/stderr, and a serializable [`BatchReport`] for the
//! CLI's `--json` mode and for library callers that want structured data.

use crate::convert::{BatchOutcome, Converted, Failed};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Print the batch result in the canonical two-block form.
///
/// Successes go to stdout:
///
/// ```text
/// Converted:
///   a.pdf -> out/a.md
/// ```
///
/// Failures, if any, go to stderr after a blank line:
///
/// ```text
/// Errors:
///   b.pdf: Failed to convert 'b.pdf': ...
/// ```
///
/// Skipped files count as successes and are marked as such.
pub fn print_report(outcome: &BatchOutcome) {
    if !outcome.converted.is_empty() {
        println!("Converted:");
        for entry in &outcome.converted {
            println!("{}", converted_line(entry));
        }
    }

    if !outcome.failed.is_empty() {
        eprintln!();
        eprintln!("Errors:");
        for entry in &outcome.failed {
            eprintln!("{}", failed_line(entry));
        }
    }
}

fn source_name(source: &Path) -> String {
    source
        .file_name()
        .unwrap_or(source.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// One success line: `  <name> -> <destination>`.
fn converted_line(entry: &Converted) -> String {
    if entry.skipped {
        format!(
            "  {} -> {} (skipped, already exists)",
            source_name(&entry.source),
            entry.destination.display()
        )
    } else {
        format!(
            "  {} -> {}",
            source_name(&entry.source),
            entry.destination.display()
        )
    }
}

/// One failure line: `  <name>: <error>`.
fn failed_line(entry: &Failed) -> String {
    format!("  {}: {}", source_name(&entry.source), entry.error)
}

/// Structured form of a finished batch, for `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub converted: Vec<ConvertedEntry>,
    pub failed: Vec<FailedEntry>,
    pub total_files: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub total_duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConvertedEntry {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub skipped: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedEntry {
    pub source: PathBuf,
    pub error: String,
}

impl BatchReport {
    pub fn from_outcome(outcome: &BatchOutcome) -> Self {
        let converted: Vec<_> = outcome
            .converted
            .iter()
            .map(|c| ConvertedEntry {
                source: c.source.clone(),
                destination: c.destination.clone(),
                skipped: c.skipped,
            })
            .collect();
        let failed: Vec<_> = outcome
            .failed
            .iter()
            .map(|f| FailedEntry {
                source: f.source.clone(),
                error: f.error.to_string(),
            })
            .collect();

        Self {
            total_files: converted.len() + failed.len(),
            success_count: converted.len(),
            failure_count: failed.len(),
            total_duration_ms: outcome.total_duration_ms,
            converted,
            failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{Converted, Failed};
    use crate::error::Pdf2MdError;

    fn sample_outcome() -> BatchOutcome {
        BatchOutcome {
            converted: vec![
                Converted {
                    source: PathBuf::from("in/a.pdf"),
                    destination: PathBuf::from("out/a.md"),
                    skipped: false,
                },
                Converted {
                    source: PathBuf::from("in/b.pdf"),
                    destination: PathBuf::from("out/b.md"),
                    skipped: true,
                },
            ],
            failed: vec![Failed {
                source: PathBuf::from("in/c.pdf"),
                error: Pdf2MdError::Internal("engine exploded".to_string()),
            }],
            total_duration_ms: 42,
        }
    }

    #[test]
    fn converted_line_has_name_arrow_destination_shape() {
        let entry = Converted {
            source: PathBuf::from("/pdfs/a.pdf"),
            destination: PathBuf::from("/data/out/a.md"),
            skipped: false,
        };
        assert_eq!(converted_line(&entry), "  a.pdf -> /data/out/a.md");
    }

    #[test]
    fn converted_line_marks_skipped_entries() {
        let entry = Converted {
            source: PathBuf::from("b.pdf"),
            destination: PathBuf::from("out/b.md"),
            skipped: true,
        };
        assert_eq!(
            converted_line(&entry),
            "  b.pdf -> out/b.md (skipped, already exists)"
        );
    }

    #[test]
    fn failed_line_has_name_colon_error_shape() {
        let entry = Failed {
            source: PathBuf::from("/pdfs/broken.pdf"),
            error: Pdf2MdError::Internal("engine exploded".to_string()),
        };
        assert_eq!(
            failed_line(&entry),
            "  broken.pdf: Internal error: engine exploded"
        );
    }

    #[test]
    fn report_counts_match_outcome() {
        let report = BatchReport::from_outcome(&sample_outcome());
        assert_eq!(report.total_files, 3);
        assert_eq!(report.success_count, 2);
        assert_eq!(report.failure_count, 1);
        assert_eq!(report.total_duration_ms, 42);
        assert!(report.converted[1].skipped);
        assert_eq!(report.failed[0].error, "Internal error: engine exploded");
    }

    #[test]
    fn report_serializes_to_json() {
        let report = BatchReport::from_outcome(&sample_outcome());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success_count"], 2);
        assert_eq!(json["failure_count"], 1);
        assert_eq!(json["converted"][0]["destination"], "out/a.md");
        assert_eq!(json["failed"][0]["source"], "in/c.pdf");
    }
}
