//! Procedural and asset-backed overlay animations.
//!
//! Every animation is a pure function of time: sampling the same `t` twice yields identical
//! pixels, and no state carries over between calls.

use crate::foundation::error::ShortsResult;
use crate::render::frame::FrameRGBA;

/// Radial clock-hand countdown animation.
pub mod clock;
/// Pulsing bubble fallback for the think animation.
pub mod bubbles;
/// Think animation with asset/procedural dispatch.
pub mod think;

/// A frame generator sampled by time offset within its owning clip.
pub trait Animation: std::fmt::Debug + Send + Sync {
    /// Output frame size `(width, height)`; constant across `t`.
    fn size(&self) -> (u32, u32);

    /// Render the frame at `t` seconds (premultiplied RGBA8).
    fn frame_at(&self, t: f64) -> ShortsResult<FrameRGBA>;
}
