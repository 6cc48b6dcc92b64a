//! Configuration for a conversion run.
//!
//! Every knob lives in [`ConversionConfig`], built via its
//! [`ConversionConfigBuilder`]. One struct shared by the CLI and library
//! keeps the two surfaces from drifting apart and makes a run's behaviour
//! trivial to log and diff.

use crate::progress::BatchProgress;
use std::fmt;
use std::path::{Path, PathBuf};

/// Configuration for a PDF-to-Markdown conversion run.
///
/// # Example
/// ```rust
/// use pdf2md::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .outdir("out")
///     .extract_images(true)
///     .skip_existing(true)
///     .build();
/// assert_eq!(config.resolved_images_dir(), std::path::PathBuf::from("out/images"));
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Directory receiving one `<basename>.md` per converted PDF. Default: `out`.
    pub outdir: PathBuf,

    /// Extract embedded images and reference them from the Markdown. Default: false.
    pub extract_images: bool,

    /// Destination for extracted images. `None` means `<outdir>/images`.
    pub images_dir: Option<PathBuf>,

    /// Treat an existing destination `.md` as a successful no-op conversion. Default: false.
    pub skip_existing: bool,

    /// Recursively delete the images directory before the batch starts.
    /// Only takes effect together with `extract_images`; the delete is
    /// destructive and happens exactly once, never per file. Default: false.
    pub clean_images: bool,

    /// Optional per-file progress callback.
    pub progress_callback: Option<BatchProgress>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            outdir: PathBuf::from("out"),
            extract_images: false,
            images_dir: None,
            skip_existing: false,
            clean_images: false,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("outdir", &self.outdir)
            .field("extract_images", &self.extract_images)
            .field("images_dir", &self.images_dir)
            .field("skip_existing", &self.skip_existing)
            .field("clean_images", &self.clean_images)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// The effective images directory: the configured one, or `<outdir>/images`.
    pub fn resolved_images_dir(&self) -> PathBuf {
        match &self.images_dir {
            Some(dir) => dir.clone(),
            None => self.outdir.join("images"),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn outdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.outdir = dir.into();
        self
    }

    pub fn extract_images(mut self, v: bool) -> Self {
        self.config.extract_images = v;
        self
    }

    pub fn images_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.images_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn skip_existing(mut self, v: bool) -> Self {
        self.config.skip_existing = v;
        self
    }

    pub fn clean_images(mut self, v: bool) -> Self {
        self.config.clean_images = v;
        self
    }

    pub fn progress_callback(mut self, cb: BatchProgress) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    pub fn build(self) -> ConversionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ConversionConfig::default();
        assert_eq!(config.outdir, PathBuf::from("out"));
        assert!(!config.extract_images);
        assert!(!config.skip_existing);
        assert!(!config.clean_images);
        assert!(config.images_dir.is_none());
    }

    #[test]
    fn images_dir_defaults_under_outdir() {
        let config = ConversionConfig::builder().outdir("/data/md").build();
        assert_eq!(config.resolved_images_dir(), PathBuf::from("/data/md/images"));
    }

    #[test]
    fn explicit_images_dir_wins() {
        let config = ConversionConfig::builder()
            .outdir("out")
            .images_dir("/assets/figures")
            .build();
        assert_eq!(config.resolved_images_dir(), PathBuf::from("/assets/figures"));
    }

    #[test]
    fn debug_does_not_require_callback_debug() {
        use crate::progress::NoopBatchCallback;
        use std::sync::Arc;

        let config = ConversionConfig::builder()
            .progress_callback(Arc::new(NoopBatchCallback))
            .build();
        let rendered = format!("{config:?}");
        assert!(rendered.contains("BatchProgressCallback"), "got: {rendered}");
    }
}
