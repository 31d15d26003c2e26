//! Progress bar reporter for CLI batches

use crate::services::{LoggingProgressReporter, ProgressReporter};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::cell::Cell;
use std::path::Path;
use tracing::error;

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Renders an indicatif bar for batches of more than one item and falls back
/// to log events otherwise
pub(crate) struct CliProgressReporter {
    bar: ProgressBar,
    active: Cell<bool>,
    logger: LoggingProgressReporter,
}

impl CliProgressReporter {
    pub(crate) fn new() -> Self {
        let bar = ProgressBar::hidden();
        if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self {
            bar,
            active: Cell::new(false),
            logger: LoggingProgressReporter,
        }
    }

    fn is_visible(&self) -> bool {
        self.active.get()
    }
}

impl ProgressReporter for CliProgressReporter {
    fn report_batch_started(&self, total_items: usize) {
        if total_items > 1 {
            self.bar.set_length(total_items as u64);
            self.bar.set_draw_target(ProgressDrawTarget::stderr());
            self.active.set(true);
        } else {
            self.logger.report_batch_started(total_items);
        }
    }

    fn report_item_started(&self, item: &Path, position: usize, total: usize) {
        if self.is_visible() {
            self.bar.set_message(format!("Processing {}", item.display()));
        } else {
            self.logger.report_item_started(item, position, total);
        }
    }

    fn report_item_completed(&self, item: &Path, outputs: usize) {
        if self.is_visible() {
            self.bar.inc(1);
        } else {
            self.logger.report_item_completed(item, outputs);
        }
    }

    fn report_error(&self, item: &Path, message: &str) {
        if self.is_visible() {
            self.bar.suspend(|| error!("Failed to process {}: {}", item.display(), message));
            self.bar.inc(1);
        } else {
            self.logger.report_error(item, message);
        }
    }

    fn report_batch_completed(&self, outputs: usize, failures: usize) {
        if self.is_visible() {
            self.bar.finish_with_message(format!(
                "Completed! Outputs: {outputs}, Failed: {failures}"
            ));
        }
    }
}
