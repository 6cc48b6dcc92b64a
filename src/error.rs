//! Error types for the pdf2md library.
//!
//! Two failure modes exist and they are handled differently:
//!
//! * **Input-level** errors ([`InputNotFound`], [`UnsupportedInput`],
//!   [`NoPdfsFound`]): the run cannot produce a target list at all. These
//!   abort the whole run before any conversion is attempted.
//!
//! * **File-level** errors ([`ConversionFailed`], [`OutputWriteFailed`]):
//!   a single target failed. The batch loop records them in
//!   [`crate::convert::BatchOutcome`] and continues with the remaining
//!   targets, so one bad PDF never sinks a directory run.
//!
//! [`InputNotFound`]: Pdf2MdError::InputNotFound
//! [`UnsupportedInput`]: Pdf2MdError::UnsupportedInput
//! [`NoPdfsFound`]: Pdf2MdError::NoPdfsFound
//! [`ConversionFailed`]: Pdf2MdError::ConversionFailed
//! [`OutputWriteFailed`]: Pdf2MdError::OutputWriteFailed

use crate::engine::EngineError;
use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf2md library.
#[derive(Debug, Error)]
pub enum Pdf2MdError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The supplied input path does not exist on the filesystem.
    #[error("Input not found: '{}'", .path.display())]
    InputNotFound { path: PathBuf },

    /// Input exists but is neither a `.pdf` file nor a directory.
    #[error("Input must be a .pdf file or a directory of PDFs: '{}'", .path.display())]
    UnsupportedInput { path: PathBuf },

    /// Input is a directory containing no `.pdf` files.
    #[error("No PDFs found in: '{}'", .dir.display())]
    NoPdfsFound { dir: PathBuf },

    /// Could not enumerate the entries of the input directory.
    #[error("Failed to read directory '{}': {source}", .path.display())]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Conversion errors ─────────────────────────────────────────────────
    /// The conversion engine raised for a specific file.
    ///
    /// Engine failures are always wrapped here with the offending source
    /// path; a raw engine error never propagates past [`crate::convert`].
    #[error("Failed to convert '{}': {source}", .path.display())]
    ConversionFailed {
        path: PathBuf,
        #[source]
        source: EngineError,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not write the destination Markdown file.
    #[error("Failed to write output file '{}': {source}", .path.display())]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create the output or images directory.
    #[error("Failed to create directory '{}': {source}", .path.display())]
    DirCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The pre-run destructive clean of the images directory failed.
    #[error("Failed to clean images directory '{}': {source}", .path.display())]
    CleanImagesFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error (e.g. a panicked blocking task).
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_not_found_display() {
        let e = Pdf2MdError::InputNotFound {
            path: PathBuf::from("/tmp/missing.pdf"),
        };
        assert_eq!(e.to_string(), "Input not found: '/tmp/missing.pdf'");
    }

    #[test]
    fn no_pdfs_found_display() {
        let e = Pdf2MdError::NoPdfsFound {
            dir: PathBuf::from("/tmp/empty"),
        };
        assert!(e.to_string().contains("/tmp/empty"), "got: {e}");
    }

    #[test]
    fn unsupported_input_display() {
        let e = Pdf2MdError::UnsupportedInput {
            path: PathBuf::from("notes.txt"),
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.txt"));
        assert!(msg.contains(".pdf file or a directory"));
    }

    #[test]
    fn conversion_failed_carries_cause() {
        let cause: EngineError = "page tree is corrupt".into();
        let e = Pdf2MdError::ConversionFailed {
            path: PathBuf::from("bad.pdf"),
            source: cause,
        };
        let msg = e.to_string();
        assert!(msg.contains("bad.pdf"));
        assert!(msg.contains("page tree is corrupt"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pdf2MdError>();
    }
}
