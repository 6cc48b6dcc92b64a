//! # pdf2md
//!
//! Convert PDF files to Markdown, one file or a whole directory at a time.
//!
//! The crate is a thin orchestrator around a pluggable conversion engine:
//! it classifies the input (single `.pdf` file or a directory scanned one
//! level deep), resolves destination paths (`<outdir>/<basename>.md`),
//! runs each conversion in sequence, and collects per-file successes and
//! failures into a [`BatchOutcome`]. A failing file never aborts the rest
//! of the batch.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use pdf2md::{convert_batch, discover_targets, ConversionConfig, MarkdownEngine, PdfiumEngine};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), pdf2md::Pdf2MdError> {
//! let targets = discover_targets(Path::new("papers/")).await?;
//! let config = ConversionConfig::builder()
//!     .outdir("out")
//!     .extract_images(true)
//!     .skip_existing(true)
//!     .build();
//!
//! let engine: Arc<dyn MarkdownEngine> = Arc::new(PdfiumEngine::new());
//! let outcome = convert_batch(&engine, &targets, &config).await?;
//! println!("{}/{} succeeded", outcome.converted.len(), outcome.total_files());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`discover`]: input classification and target listing
//! - [`paths`]: destination resolution and directory setup
//! - [`engine`]: the [`MarkdownEngine`] trait and the pdfium-backed
//!   production implementation
//! - [`convert`]: single-file conversion and the batch loop
//! - [`report`]: human-readable and JSON renderings of a finished batch
//! - [`progress`]: optional per-file progress callbacks
//!
//! The engine trait is the testing seam: the orchestration layer is fully
//! exercisable with a stub engine and never requires a real PDF or a
//! pdfium build.

pub mod config;
pub mod convert;
pub mod discover;
pub mod engine;
pub mod error;
pub mod paths;
pub mod progress;
pub mod report;

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{
    convert_batch, convert_file, BatchOutcome, ConversionOutcome, ConversionRequest, Converted,
    Failed,
};
pub use discover::{discover_targets, is_pdf};
pub use engine::{EngineError, MarkdownEngine, PdfiumEngine};
pub use error::Pdf2MdError;
pub use progress::{BatchProgress, BatchProgressCallback, NoopBatchCallback};
pub use report::{print_report, BatchReport};
