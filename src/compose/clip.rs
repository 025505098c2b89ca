use std::sync::Arc;

use crate::animation::Animation;
use crate::foundation::error::{ShortsError, ShortsResult};
use crate::render::frame::FrameRGBA;

/// Where an overlay sits on its base: horizontally centered, top edge at a fraction of the
/// base height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    /// Top edge as a fraction of the base height.
    pub top_frac: f64,
}

impl Anchor {
    /// Horizontally centered anchor with its top at `top_frac`.
    pub fn centered_at(top_frac: f64) -> Self {
        Self { top_frac }
    }

    /// Top-left pixel position for an overlay of `size` on a base of `base`.
    pub fn position(self, base: (u32, u32), size: (u32, u32)) -> (i64, i64) {
        let x = (i64::from(base.0) - i64::from(size.0)) / 2;
        let y = (f64::from(base.1) * self.top_frac) as i64;
        (x, y)
    }
}

/// An animation drawn over a still base.
#[derive(Clone, Debug)]
pub struct Overlay {
    /// Overlay frames.
    pub animation: Arc<dyn Animation>,
    /// Placement on the base.
    pub anchor: Anchor,
}

/// A timed piece of video, sampled as a pure function of its local time.
#[derive(Clone, Debug)]
pub enum Clip {
    /// One image held for the whole duration.
    Still {
        /// Held image.
        image: Arc<FrameRGBA>,
        /// Length in seconds.
        duration_secs: f64,
    },
    /// A still base with an animated overlay running for the whole duration.
    Layered {
        /// Still background.
        base: Arc<FrameRGBA>,
        /// Animation drawn on top, sampled at the clip's local time.
        overlay: Overlay,
        /// Length in seconds.
        duration_secs: f64,
    },
    /// Children played back to back.
    Sequence(Vec<Clip>),
}

impl Clip {
    /// Still clip; the duration must be finite and positive.
    pub fn still(image: Arc<FrameRGBA>, duration_secs: f64) -> ShortsResult<Self> {
        check_duration(duration_secs)?;
        Ok(Self::Still {
            image,
            duration_secs,
        })
    }

    /// Still base with an overlay; the duration must be finite and positive.
    pub fn layered(
        base: Arc<FrameRGBA>,
        overlay: Overlay,
        duration_secs: f64,
    ) -> ShortsResult<Self> {
        check_duration(duration_secs)?;
        Ok(Self::Layered {
            base,
            overlay,
            duration_secs,
        })
    }

    /// Back-to-back children; must not be empty.
    pub fn sequence(children: Vec<Clip>) -> ShortsResult<Self> {
        if children.is_empty() {
            return Err(ShortsError::validation("clip sequence must not be empty"));
        }
        Ok(Self::Sequence(children))
    }

    /// Total length in seconds.
    pub fn duration_secs(&self) -> f64 {
        match self {
            Self::Still { duration_secs, .. } | Self::Layered { duration_secs, .. } => {
                *duration_secs
            }
            Self::Sequence(children) => children.iter().map(Clip::duration_secs).sum(),
        }
    }

    /// Direct children of a sequence; empty for leaf clips.
    pub fn children(&self) -> &[Clip] {
        match self {
            Self::Sequence(children) => children,
            _ => &[],
        }
    }

    /// Render the frame at local time `t`.
    ///
    /// Times before zero clamp to the start; in a sequence each child owns `[start, end)` and
    /// times at or past the end resolve to the last child.
    pub fn frame_at(&self, t: f64) -> ShortsResult<FrameRGBA> {
        let t = if t.is_finite() { t.max(0.0) } else { 0.0 };
        match self {
            Self::Still { image, .. } => Ok(image.as_ref().clone()),
            Self::Layered { base, overlay, .. } => {
                let mut frame = base.as_ref().clone();
                let top = overlay.animation.frame_at(t)?;
                let (x, y) = overlay
                    .anchor
                    .position((frame.width, frame.height), (top.width, top.height));
                frame.composite_over(&top, x, y)?;
                Ok(frame)
            }
            Self::Sequence(children) => {
                let (child, local) = locate(children, t)
                    .ok_or_else(|| ShortsError::validation("clip sequence is empty"))?;
                child.frame_at(local)
            }
        }
    }
}

fn locate(children: &[Clip], t: f64) -> Option<(&Clip, f64)> {
    let mut start = 0.0;
    for (i, child) in children.iter().enumerate() {
        let end = start + child.duration_secs();
        if t < end || i + 1 == children.len() {
            return Some((child, (t - start).max(0.0)));
        }
        start = end;
    }
    None
}

fn check_duration(secs: f64) -> ShortsResult<()> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ShortsError::validation(format!(
            "clip duration must be finite and > 0 (got {secs})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/clip.rs"]
mod tests;
