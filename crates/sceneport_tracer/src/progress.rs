//! Progress reporting and cooperative cancellation
//!
//! Long-running loops call their sink between steps. A sink answering
//! [`ProgressControl::Cancel`] stops the loop before the next step; work
//! already done is kept.

/// One step of a long-running operation
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// 1-based index of the current step
    pub current: usize,
    /// Steps known so far; may grow while resolving
    pub total: usize,
    pub label: &'a str,
}

impl Progress<'_> {
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressControl {
    Continue,
    Cancel,
}

pub trait ProgressSink {
    fn on_progress(&mut self, progress: &Progress<'_>) -> ProgressControl;
}

/// Sink that ignores progress and never cancels
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&mut self, _progress: &Progress<'_>) -> ProgressControl {
        ProgressControl::Continue
    }
}

/// Sink that logs every step at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn on_progress(&mut self, progress: &Progress<'_>) -> ProgressControl {
        log::debug!(
            "[{}/{}] {}",
            progress.current,
            progress.total,
            progress.label
        );
        ProgressControl::Continue
    }
}
