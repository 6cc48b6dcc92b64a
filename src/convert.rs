//! Conversion orchestration: one file at a time, failures isolated.
//!
//! [`convert_file`] handles a single target end to end (directory setup,
//! skip-existing short-circuit, engine invocation, output write).
//! [`convert_batch`] drives it over the whole target list, strictly
//! sequentially, recording per-file outcomes instead of aborting: a
//! failure on one PDF must never cost the caller the rest of the batch.

use crate::config::ConversionConfig;
use crate::engine::MarkdownEngine;
use crate::error::Pdf2MdError;
use crate::paths;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Everything needed to convert one PDF, fixed for the lifetime of that
/// conversion.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// The source PDF.
    pub source: PathBuf,
    /// Directory receiving the destination Markdown file.
    pub outdir: PathBuf,
    /// Extract embedded images alongside the text.
    pub extract_images: bool,
    /// Effective images directory (already resolved; only used when
    /// `extract_images` is set).
    pub images_dir: PathBuf,
    /// Treat an existing destination as a successful no-op.
    pub skip_existing: bool,
}

impl ConversionRequest {
    /// Build the request for one target from the run configuration.
    pub fn from_config(source: PathBuf, config: &ConversionConfig) -> Self {
        Self {
            source,
            outdir: config.outdir.clone(),
            extract_images: config.extract_images,
            images_dir: config.resolved_images_dir(),
            skip_existing: config.skip_existing,
        }
    }
}

/// How a single target reached success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The engine ran and the Markdown was written to this path.
    Written(PathBuf),
    /// `skip_existing` was set and this destination already existed; no
    /// engine work was performed.
    SkippedExisting(PathBuf),
}

impl ConversionOutcome {
    /// The destination Markdown path, however it was reached.
    pub fn destination(&self) -> &Path {
        match self {
            ConversionOutcome::Written(p) | ConversionOutcome::SkippedExisting(p) => p,
        }
    }

    pub fn was_skipped(&self) -> bool {
        matches!(self, ConversionOutcome::SkippedExisting(_))
    }
}

/// A successful target in a finished batch.
#[derive(Debug, Clone)]
pub struct Converted {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// True when the skip-existing short-circuit applied.
    pub skipped: bool,
}

/// A failed target in a finished batch.
#[derive(Debug)]
pub struct Failed {
    pub source: PathBuf,
    pub error: Pdf2MdError,
}

/// All outcomes of one batch run, in target order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub converted: Vec<Converted>,
    pub failed: Vec<Failed>,
    /// Wall-clock duration of the whole batch in milliseconds.
    pub total_duration_ms: u64,
}

impl BatchOutcome {
    /// True when at least one target failed. Drives the process exit code.
    pub fn had_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn total_files(&self) -> usize {
        self.converted.len() + self.failed.len()
    }
}

/// Convert one PDF to Markdown.
///
/// The engine runs under `spawn_blocking` (pdfium work is CPU-bound and
/// not async-safe); any failure it raises is wrapped into
/// [`Pdf2MdError::ConversionFailed`] with the source path. On success the
/// Markdown is written UTF-8 to `<outdir>/<basename>.md`, overwriting any
/// existing file unless `skip_existing` short-circuited first.
pub async fn convert_file(
    engine: &Arc<dyn MarkdownEngine>,
    request: &ConversionRequest,
) -> Result<ConversionOutcome, Pdf2MdError> {
    paths::ensure_dir(&request.outdir).await?;

    let destination = paths::markdown_destination(&request.outdir, &request.source);

    if request.skip_existing && destination.exists() {
        debug!(
            "Skipping {} (destination exists: {})",
            request.source.display(),
            destination.display()
        );
        return Ok(ConversionOutcome::SkippedExisting(destination));
    }

    if request.extract_images {
        paths::ensure_dir(&request.images_dir).await?;
    }

    let engine = Arc::clone(engine);
    let source = request.source.clone();
    let images_dir = request.extract_images.then(|| request.images_dir.clone());

    let markdown =
        tokio::task::spawn_blocking(move || engine.to_markdown(&source, images_dir.as_deref()))
            .await
            .map_err(|e| Pdf2MdError::Internal(format!("Conversion task panicked: {e}")))?
            .map_err(|cause| Pdf2MdError::ConversionFailed {
                path: request.source.clone(),
                source: cause,
            })?;

    tokio::fs::write(&destination, markdown.as_bytes())
        .await
        .map_err(|e| Pdf2MdError::OutputWriteFailed {
            path: destination.clone(),
            source: e,
        })?;

    debug!(
        "Converted {} -> {}",
        request.source.display(),
        destination.display()
    );
    Ok(ConversionOutcome::Written(destination))
}

/// Convert every target, in order, collecting outcomes.
///
/// Per-file failures are recorded and the loop continues; only pre-loop
/// setup failures (the destructive images-dir clean) abort the batch,
/// since the clean must complete before the first conversion may write
/// into the directory.
pub async fn convert_batch(
    engine: &Arc<dyn MarkdownEngine>,
    targets: &[PathBuf],
    config: &ConversionConfig,
) -> Result<BatchOutcome, Pdf2MdError> {
    let start = Instant::now();

    // One-time destructive pre-run step, never per file.
    if config.extract_images && config.clean_images {
        paths::clean_images_dir(&config.resolved_images_dir()).await?;
    }

    if let Some(cb) = &config.progress_callback {
        cb.on_batch_start(targets.len());
    }
    info!("Converting {} target(s)", targets.len());

    let mut outcome = BatchOutcome::default();

    for (index, source) in targets.iter().enumerate() {
        let file_num = index + 1;
        if let Some(cb) = &config.progress_callback {
            cb.on_file_start(file_num, targets.len(), source);
        }

        let request = ConversionRequest::from_config(source.clone(), config);
        match convert_file(engine, &request).await {
            Ok(result) => {
                if let Some(cb) = &config.progress_callback {
                    cb.on_file_complete(
                        file_num,
                        targets.len(),
                        result.destination(),
                        result.was_skipped(),
                    );
                }
                outcome.converted.push(Converted {
                    source: source.clone(),
                    destination: result.destination().to_path_buf(),
                    skipped: result.was_skipped(),
                });
            }
            Err(error) => {
                warn!("{error}");
                if let Some(cb) = &config.progress_callback {
                    cb.on_file_error(file_num, targets.len(), error.to_string());
                }
                outcome.failed.push(Failed {
                    source: source.clone(),
                    error,
                });
            }
        }
    }

    if let Some(cb) = &config.progress_callback {
        cb.on_batch_complete(targets.len(), outcome.converted.len());
    }

    outcome.total_duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Batch complete: {}/{} succeeded in {}ms",
        outcome.converted.len(),
        targets.len(),
        outcome.total_duration_ms
    );

    Ok(outcome)
}
