//! The conversion engine seam: everything pdf2md knows about turning one
//! PDF into Markdown text.
//!
//! ## Why a trait?
//!
//! The orchestrator (discovery, directory setup, batch loop, reporting) is
//! the part of this crate worth testing, and it should be testable without
//! parsing a single real PDF. [`MarkdownEngine`] is the boundary: the batch
//! code only ever sees `path in, Markdown out`, so tests can substitute a
//! stub engine and production code can swap backends without touching the
//! orchestration.
//!
//! The production implementation, [`PdfiumEngine`], wraps the pdfium C++
//! library via `pdfium-render`. pdfium uses thread-local state internally
//! and is not safe to call from async contexts, so the trait is synchronous
//! and callers run it under `tokio::task::spawn_blocking`.

use image::ImageFormat;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Opaque error raised by a conversion engine.
///
/// The orchestrator wraps it into
/// [`crate::error::Pdf2MdError::ConversionFailed`] together with the source
/// path; nothing downstream inspects the concrete type.
pub type EngineError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Converts a single PDF file into Markdown text.
///
/// When `images_dir` is `Some`, the engine writes any embedded images it
/// extracts into that directory (which the caller guarantees exists) and
/// embeds local references to them in the returned Markdown. When `None`,
/// the engine runs in text-only mode and touches no files.
pub trait MarkdownEngine: Send + Sync {
    fn to_markdown(&self, pdf: &Path, images_dir: Option<&Path>) -> Result<String, EngineError>;
}

/// Production engine backed by pdfium.
///
/// Text is extracted page by page and joined with blank lines; embedded
/// image objects are decoded via pdfium's image API and written as PNG
/// files named `<stem>-p<page>-<index>.png`.
#[derive(Debug, Default)]
pub struct PdfiumEngine;

impl PdfiumEngine {
    pub fn new() -> Self {
        Self
    }

    /// Bind to a pdfium shared library.
    ///
    /// Tries the executable's directory first (the common deployment layout,
    /// where libpdfium sits next to the binary), then the system library
    /// paths.
    fn bind() -> Result<Pdfium, EngineError> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| {
                format!(
                    "failed to bind to a pdfium library ({e:?}); \
                     install pdfium or place libpdfium next to the binary"
                )
            })?;
        Ok(Pdfium::new(bindings))
    }
}

impl MarkdownEngine for PdfiumEngine {
    fn to_markdown(&self, pdf: &Path, images_dir: Option<&Path>) -> Result<String, EngineError> {
        let pdfium = Self::bind()?;

        let document = pdfium
            .load_pdf_from_file(pdf, None)
            .map_err(|e| format!("failed to load PDF: {e:?}"))?;

        let stem = pdf
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "page".to_string());

        let mut parts: Vec<String> = Vec::new();

        for (page_index, page) in document.pages().iter().enumerate() {
            let text = page
                .text()
                .map_err(|e| format!("failed to read text of page {}: {e:?}", page_index + 1))?
                .all();

            let mut section = text.trim_end().to_string();

            if let Some(dir) = images_dir {
                for reference in extract_page_images(&page, page_index, &stem, dir) {
                    section.push_str("\n\n");
                    section.push_str(&reference);
                }
            }

            if !section.trim().is_empty() {
                parts.push(section);
            }
        }

        debug!(
            "Extracted {} non-empty pages from {}",
            parts.len(),
            pdf.display()
        );

        let mut markdown = parts.join("\n\n");
        if !markdown.ends_with('\n') {
            markdown.push('\n');
        }
        Ok(markdown)
    }
}

/// Write the embedded images of one page as PNG files and return Markdown
/// references to them.
///
/// An image that pdfium cannot decode is logged and skipped; a partially
/// illustrated document is more useful than a failed one.
fn extract_page_images(
    page: &PdfPage,
    page_index: usize,
    stem: &str,
    images_dir: &Path,
) -> Vec<String> {
    let mut references = Vec::new();

    for (object_index, object) in page.objects().iter().enumerate() {
        let Some(image_object) = object.as_image_object() else {
            continue;
        };

        let image = match image_object.get_raw_image() {
            Ok(image) => image,
            Err(e) => {
                warn!(
                    "Skipping undecodable image {} on page {}: {e:?}",
                    object_index + 1,
                    page_index + 1
                );
                continue;
            }
        };

        let file_name = format!(
            "{stem}-p{:03}-{:02}.png",
            page_index + 1,
            object_index + 1
        );
        let destination: PathBuf = images_dir.join(&file_name);

        if let Err(e) = image.save_with_format(&destination, ImageFormat::Png) {
            warn!("Failed to write {}: {e}", destination.display());
            continue;
        }

        debug!(
            "Extracted image {}x{} -> {}",
            image.width(),
            image.height(),
            destination.display()
        );
        references.push(format!("![{file_name}]({})", destination.display()));
    }

    references
}
