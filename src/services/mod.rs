//! Services that keep file I/O and progress reporting out of the compositing logic

pub mod io;
pub mod progress;

pub use io::ImageIOService;
pub use progress::{LoggingProgressReporter, NoOpProgressReporter, ProgressReporter};
