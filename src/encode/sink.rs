use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::ShortsResult;
use crate::render::frame::FrameRGBA;

/// Configuration handed to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Output frame rate.
    pub fps: Fps,
}

/// Consumer of rendered frames.
///
/// `push_frame` is called with strictly increasing `FrameIndex` values between one `begin` and
/// one `end`. `end` is also called when rendering stops early on an error.
pub trait FrameSink: Send {
    /// Called once before any frame.
    fn begin(&mut self, cfg: SinkConfig) -> ShortsResult<()>;
    /// Consume one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ShortsResult<()>;
    /// Called once after the last frame, or after a failure.
    fn end(&mut self) -> ShortsResult<()>;
}

/// Sink that keeps every frame in memory. Used by tests and the `frame` CLI command.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// `true` once `end` has been called after the latest `begin`.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ShortsResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ShortsResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ShortsResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
