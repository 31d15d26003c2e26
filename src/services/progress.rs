//! Progress reporting service
//!
//! This module separates progress reporting concerns from the batch driver,
//! allowing the CLI to render a progress bar while library callers log or
//! discard updates.
//!
//! An "item" is an input file in per-input mode and a generated output in
//! cycle mode.

use std::path::Path;
use tracing::{debug, error, info};

/// Trait for reporting progress during a colorizing batch
pub trait ProgressReporter {
    /// Report the number of items the batch will work through
    fn report_batch_started(&self, _total_items: usize) {}

    /// Report that an item is about to be processed
    ///
    /// # Arguments
    /// * `item` - Input file the item is derived from
    /// * `position` - 1-based position of the item
    /// * `total` - Total number of items
    fn report_item_started(&self, item: &Path, position: usize, total: usize);

    /// Report that an item finished and how many files it produced
    fn report_item_completed(&self, item: &Path, outputs: usize);

    /// Report a per-item failure; the batch continues afterwards
    fn report_error(&self, item: &Path, error: &str);

    /// Report the end of the batch
    fn report_batch_completed(&self, _outputs: usize, _failures: usize) {}
}

/// No-op progress reporter that discards all progress updates
pub struct NoOpProgressReporter;

impl ProgressReporter for NoOpProgressReporter {
    fn report_item_started(&self, _item: &Path, _position: usize, _total: usize) {}

    fn report_item_completed(&self, _item: &Path, _outputs: usize) {}

    fn report_error(&self, _item: &Path, _error: &str) {}
}

/// Progress reporter that emits tracing events
pub struct LoggingProgressReporter;

impl ProgressReporter for LoggingProgressReporter {
    fn report_batch_started(&self, total_items: usize) {
        info!(total_items, "Starting colorizing batch");
    }

    fn report_item_started(&self, item: &Path, position: usize, total: usize) {
        debug!("[{}/{}] {}", position, total, item.display());
    }

    fn report_item_completed(&self, item: &Path, outputs: usize) {
        info!("Processed {} ({} output(s))", item.display(), outputs);
    }

    fn report_error(&self, item: &Path, error: &str) {
        error!("Failed to process {}: {}", item.display(), error);
    }

    fn report_batch_completed(&self, outputs: usize, failures: usize) {
        info!(outputs, failures, "Colorizing batch finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingReporter {
        started: RefCell<Vec<(PathBuf, usize, usize)>>,
        errors: RefCell<Vec<String>>,
    }

    impl ProgressReporter for RecordingReporter {
        fn report_item_started(&self, item: &Path, position: usize, total: usize) {
            self.started
                .borrow_mut()
                .push((item.to_path_buf(), position, total));
        }

        fn report_item_completed(&self, _item: &Path, _outputs: usize) {}

        fn report_error(&self, _item: &Path, error: &str) {
            self.errors.borrow_mut().push(error.to_string());
        }
    }

    #[test]
    fn test_default_hooks_are_optional() {
        let reporter = RecordingReporter::default();
        reporter.report_batch_started(3);
        reporter.report_item_started(Path::new("a.png"), 1, 3);
        reporter.report_error(Path::new("a.png"), "bad");
        reporter.report_batch_completed(0, 1);

        assert_eq!(
            reporter.started.borrow().as_slice(),
            &[(PathBuf::from("a.png"), 1, 3)]
        );
        assert_eq!(reporter.errors.borrow().as_slice(), &["bad".to_string()]);
    }

    #[test]
    fn test_builtin_reporters_accept_updates() {
        for reporter in [
            &NoOpProgressReporter as &dyn ProgressReporter,
            &LoggingProgressReporter,
        ] {
            reporter.report_batch_started(1);
            reporter.report_item_started(Path::new("x.png"), 1, 1);
            reporter.report_item_completed(Path::new("x.png"), 2);
            reporter.report_error(Path::new("x.png"), "oops");
            reporter.report_batch_completed(2, 1);
        }
    }
}
