//! Filesystem side effects as explicit, named operations.
//!
//! Two of the operations here are idempotent ([`ensure_dir`],
//! [`markdown_destination`] has no side effect at all) and one is
//! destructive ([`clean_images_dir`]). Keeping them in one place, instead
//! of scattering `create_dir_all`/`remove_dir_all` calls through the
//! control flow, makes the destructive one easy to audit and to test in
//! isolation.

use crate::error::Pdf2MdError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Destination Markdown path for a source PDF: `<outdir>/<basename>.md`.
///
/// The full stem is preserved, so `report.v2.pdf` maps to `report.v2.md`.
pub fn markdown_destination(outdir: &Path, source: &Path) -> PathBuf {
    let mut name = source
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    name.push(".md");
    outdir.join(name)
}

/// Create a directory and any missing parents. Safe no-op when it exists.
pub async fn ensure_dir(dir: &Path) -> Result<(), Pdf2MdError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| Pdf2MdError::DirCreateFailed {
            path: dir.to_path_buf(),
            source: e,
        })
}

/// Recursively delete the images directory if it exists.
///
/// Destructive and irreversible. The batch orchestrator calls this at most
/// once, before the first conversion; nothing else in the crate deletes
/// anything.
pub async fn clean_images_dir(dir: &Path) -> Result<(), Pdf2MdError> {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => {
            info!("Cleaned images directory: {}", dir.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Images directory absent, nothing to clean: {}", dir.display());
            Ok(())
        }
        Err(e) => Err(Pdf2MdError::CleanImagesFailed {
            path: dir.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn destination_keeps_dotted_stems_intact() {
        let dest = markdown_destination(Path::new("out"), Path::new("in/report.v2.pdf"));
        assert_eq!(dest, PathBuf::from("out/report.v2.md"));
    }

    #[test]
    fn destination_is_flat_under_outdir() {
        let dest = markdown_destination(Path::new("/data/md"), Path::new("/pdfs/sub/doc.pdf"));
        assert_eq!(dest, PathBuf::from("/data/md/doc.md"));
    }

    #[tokio::test]
    async fn ensure_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b/c");
        ensure_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
        // Second call must be a no-op, not an error.
        ensure_dir(&nested).await.unwrap();
    }

    #[tokio::test]
    async fn clean_images_dir_removes_contents() {
        let dir = TempDir::new().unwrap();
        let images = dir.path().join("images");
        std::fs::create_dir_all(images.join("old")).unwrap();
        std::fs::write(images.join("stale.png"), b"png").unwrap();

        clean_images_dir(&images).await.unwrap();
        assert!(!images.exists());
    }

    #[tokio::test]
    async fn clean_images_dir_tolerates_absence() {
        let dir = TempDir::new().unwrap();
        clean_images_dir(&dir.path().join("never-created"))
            .await
            .unwrap();
    }
}
