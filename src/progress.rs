//! Progress-callback trait for per-file batch events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! an event as the batch loop starts and finishes each target. The CLI uses
//! this to drive its progress bar; library callers can forward events to
//! whatever channel suits the host application. The trait is `Send + Sync`
//! so a single callback can be shared across tasks.

use std::path::Path;
use std::sync::Arc;

/// Called by the batch orchestrator as it works through the target list.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. The batch loop is strictly sequential, so events
/// for one file never interleave with another's.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once before the first target is converted.
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a target's conversion begins.
    ///
    /// `file_num` is 1-indexed.
    fn on_file_start(&self, file_num: usize, total_files: usize, source: &Path) {
        let _ = (file_num, total_files, source);
    }

    /// Called when a target converted successfully (or was skipped because
    /// its destination already existed).
    fn on_file_complete(
        &self,
        file_num: usize,
        total_files: usize,
        destination: &Path,
        skipped: bool,
    ) {
        let _ = (file_num, total_files, destination, skipped);
    }

    /// Called when a target's conversion failed.
    fn on_file_error(&self, file_num: usize, total_files: usize, error: String) {
        let _ = (file_num, total_files, error);
    }

    /// Called once after every target has been attempted.
    fn on_batch_complete(&self, total_files: usize, success_count: usize) {
        let _ = (total_files, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopBatchCallback;

impl BatchProgressCallback for NoopBatchCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type BatchProgress = Arc<dyn BatchProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        final_successes: AtomicUsize,
    }

    impl BatchProgressCallback for TrackingCallback {
        fn on_file_start(&self, _file_num: usize, _total: usize, _source: &Path) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_complete(&self, _file_num: usize, _total: usize, _dest: &Path, _skipped: bool) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_error(&self, _file_num: usize, _total: usize, _error: String) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_batch_complete(&self, _total: usize, success_count: usize) {
            self.final_successes.store(success_count, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopBatchCallback;
        cb.on_batch_start(3);
        cb.on_file_start(1, 3, Path::new("a.pdf"));
        cb.on_file_complete(1, 3, Path::new("out/a.md"), false);
        cb.on_file_error(2, 3, "boom".to_string());
        cb.on_batch_complete(3, 2);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            starts: AtomicUsize::new(0),
            completes: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
            final_successes: AtomicUsize::new(0),
        };

        tracker.on_batch_start(2);
        tracker.on_file_start(1, 2, Path::new("a.pdf"));
        tracker.on_file_complete(1, 2, Path::new("out/a.md"), false);
        tracker.on_file_start(2, 2, Path::new("b.pdf"));
        tracker.on_file_error(2, 2, "engine failure".to_string());
        tracker.on_batch_complete(2, 1);

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.final_successes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: BatchProgress = Arc::new(NoopBatchCallback);
        cb.on_batch_start(1);
        cb.on_file_complete(1, 1, Path::new("out/a.md"), true);
    }
}
