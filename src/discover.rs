//! Input classification: turn the user-supplied path into an ordered list
//! of conversion targets.
//!
//! A target is a regular file with a case-insensitive `.pdf` extension.
//! Directories are scanned one level deep only, and the resulting list is
//! sorted by file name so repeated runs over the same directory always
//! process (and report) files in the same order.

use crate::error::Pdf2MdError;
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Is this path a regular file with a `.pdf` extension (any case)?
pub fn is_pdf(path: &Path) -> bool {
    path.is_file() && has_pdf_extension(path)
}

/// Resolve the input path to the ordered list of PDFs to convert.
///
/// * A directory yields its immediate `.pdf` entries sorted by file name;
///   an empty result is an error, not an empty batch.
/// * A single PDF file yields a one-element list.
/// * Anything else is rejected before any conversion work starts.
pub async fn discover_targets(input: &Path) -> Result<Vec<PathBuf>, Pdf2MdError> {
    let metadata = match tokio::fs::metadata(input).await {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Pdf2MdError::InputNotFound {
                path: input.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(Pdf2MdError::ReadDirFailed {
                path: input.to_path_buf(),
                source: e,
            });
        }
    };

    if metadata.is_dir() {
        let mut targets = Vec::new();
        let mut entries =
            tokio::fs::read_dir(input)
                .await
                .map_err(|e| Pdf2MdError::ReadDirFailed {
                    path: input.to_path_buf(),
                    source: e,
                })?;

        while let Some(entry) =
            entries
                .next_entry()
                .await
                .map_err(|e| Pdf2MdError::ReadDirFailed {
                    path: input.to_path_buf(),
                    source: e,
                })?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| Pdf2MdError::ReadDirFailed {
                    path: input.to_path_buf(),
                    source: e,
                })?;
            let path = entry.path();
            // file_type() does not follow symlinks; resolve those so a
            // symlinked PDF still counts and a dangling one does not.
            let is_file = if file_type.is_symlink() {
                tokio::fs::metadata(&path)
                    .await
                    .map(|m| m.is_file())
                    .unwrap_or(false)
            } else {
                file_type.is_file()
            };
            if is_file && has_pdf_extension(&path) {
                targets.push(path);
            }
        }

        if targets.is_empty() {
            return Err(Pdf2MdError::NoPdfsFound {
                dir: input.to_path_buf(),
            });
        }

        targets.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        debug!("Discovered {} PDFs in {}", targets.len(), input.display());
        return Ok(targets);
    }

    if metadata.is_file() && has_pdf_extension(input) {
        debug!("Single PDF target: {}", input.display());
        Ok(vec![input.to_path_buf()])
    } else {
        Err(Pdf2MdError::UnsupportedInput {
            path: input.to_path_buf(),
        })
    }
}
