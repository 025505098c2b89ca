//! Progress notifications emitted while a video is generated.

/// Message sent before each question segment is built.
pub const MSG_QUESTION: &str = "Creating question clip...";
/// Message sent before each countdown segment is built.
pub const MSG_COUNTDOWN: &str = "Creating countdown animation...";
/// Message sent before each answer segment is built.
pub const MSG_ANSWER: &str = "Creating answer clip...";
/// Message sent once the timeline is complete and encoding starts.
pub const MSG_RENDERING: &str = "Rendering final video...";
/// Message sent after the output file has been verified.
pub const MSG_DONE: &str = "Video generated successfully!";

/// Percent reported when encoding starts.
pub const PERCENT_RENDERING: f64 = 95.0;

/// One progress notification.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ProgressEvent {
    /// Completion in `[0, 100]`, non-decreasing over a run.
    pub percent: f64,
    /// Human-readable phase description.
    pub message: String,
}

/// Wraps a caller callback and enforces the reporting contract: values are clamped to
/// `[0, 100]` and never go backwards.
pub(crate) struct Progress<'a> {
    callback: &'a mut dyn FnMut(&ProgressEvent),
    last: f64,
}

impl<'a> Progress<'a> {
    pub(crate) fn new(callback: &'a mut dyn FnMut(&ProgressEvent)) -> Self {
        Self {
            callback,
            last: 0.0,
        }
    }

    pub(crate) fn emit(&mut self, percent: f64, message: &str) {
        let percent = percent.clamp(0.0, 100.0).max(self.last);
        self.last = percent;
        tracing::debug!(percent, message, "progress");
        (self.callback)(&ProgressEvent {
            percent,
            message: message.to_string(),
        });
    }

    /// Report `done` of `total` steps.
    pub(crate) fn step(&mut self, done: usize, total: usize, message: &str) {
        let percent = if total == 0 {
            0.0
        } else {
            done as f64 / total as f64 * 100.0
        };
        self.emit(percent, message);
    }
}

#[cfg(test)]
#[path = "../tests/unit/progress.rs"]
mod tests;
