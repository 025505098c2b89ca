use std::io::Cursor;
use std::path::Path;

use anyhow::Context as _;
use image::AnimationDecoder as _;

use crate::animation::Animation;
use crate::animation::bubbles::BubbleAnimation;
use crate::config::ShortsConfig;
use crate::foundation::core::Rgb8;
use crate::foundation::error::{ShortsError, ShortsResult};
use crate::foundation::math::{luma01, premultiply_rgba8_in_place};
use crate::render::frame::FrameRGBA;

// GIF frames with a zero delay are shown for the conventional browser default.
const DEFAULT_FRAME_DELAY_SECS: f64 = 0.1;

/// Looping animation decoded from a GIF asset, resized and recolored up front.
///
/// Sampling wraps `t` around the loop period, so the loop extends to any clip duration.
#[derive(Clone, Debug)]
pub struct AssetAnimation {
    frames: Vec<FrameRGBA>,
    starts: Vec<f64>,
    period_secs: f64,
    width: u32,
    height: u32,
}

impl AssetAnimation {
    /// Read and decode a GIF file.
    pub fn load(path: &Path, cfg: &ShortsConfig) -> ShortsResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read think asset '{}'", path.display()))?;
        Self::decode(&bytes, cfg)
    }

    /// Decode GIF bytes.
    pub fn decode(bytes: &[u8], cfg: &ShortsConfig) -> ShortsResult<Self> {
        let decoder = image::codecs::gif::GifDecoder::new(Cursor::new(bytes))
            .context("open gif decoder")?;
        let frames = decoder
            .into_frames()
            .collect_frames()
            .context("decode gif frames")?;
        Self::from_frames(frames, cfg)
    }

    /// Resize, recolor and time already decoded frames.
    ///
    /// Fails when there are no frames or the scaled overlay would be taller than the canvas.
    pub fn from_frames(frames: Vec<image::Frame>, cfg: &ShortsConfig) -> ShortsResult<Self> {
        let Some(first) = frames.first() else {
            return Err(ShortsError::validation("think asset has no frames"));
        };
        let (src_w, src_h) = first.buffer().dimensions();
        if src_w == 0 || src_h == 0 {
            return Err(ShortsError::validation("think asset has an empty canvas"));
        }

        let width = cfg.canvas.width_fraction(cfg.think_width_frac);
        let height = ((u64::from(width) * u64::from(src_h)) / u64::from(src_w)).max(1);
        if height > u64::from(cfg.canvas.height) {
            return Err(ShortsError::validation(format!(
                "think asset {src_w}x{src_h} scales to {width}x{height}, taller than the {}px canvas",
                cfg.canvas.height
            )));
        }
        let height = height as u32;

        let mut out = Vec::with_capacity(frames.len());
        let mut starts = Vec::with_capacity(frames.len());
        let mut clock = 0.0f64;
        for frame in frames {
            let (num, den) = frame.delay().numer_denom_ms();
            let mut delay = if den == 0 {
                0.0
            } else {
                f64::from(num) / f64::from(den) / 1000.0
            };
            if delay <= 0.0 {
                delay = DEFAULT_FRAME_DELAY_SECS;
            }

            let resized = image::imageops::resize(
                frame.buffer(),
                width,
                height,
                image::imageops::FilterType::Lanczos3,
            );
            let mut data = resized.into_raw();
            recolor_in_place(&mut data, cfg.accent);
            premultiply_rgba8_in_place(&mut data);
            let tinted = FrameRGBA {
                width,
                height,
                data,
                premultiplied: true,
            };

            starts.push(clock);
            out.push(tinted.flatten_over(cfg.background));
            clock += delay;
        }

        Ok(Self {
            frames: out,
            starts,
            period_secs: clock,
            width,
            height,
        })
    }

    /// Length of one loop in seconds.
    pub fn period_secs(&self) -> f64 {
        self.period_secs
    }

    /// Number of source frames in one loop.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Index of the source frame shown at `t`.
    pub fn frame_index_at(&self, t: f64) -> usize {
        let u = if t.is_finite() {
            t.rem_euclid(self.period_secs)
        } else {
            0.0
        };
        self.starts
            .partition_point(|s| *s <= u)
            .saturating_sub(1)
    }
}

impl Animation for AssetAnimation {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn frame_at(&self, t: f64) -> ShortsResult<FrameRGBA> {
        Ok(self.frames[self.frame_index_at(t)].clone())
    }
}

// Replace hue with `accent`, keeping source brightness as intensity and alpha untouched.
fn recolor_in_place(rgba: &mut [u8], accent: Rgb8) {
    for px in rgba.chunks_exact_mut(4) {
        let l = luma01(px[0], px[1], px[2]);
        px[0] = (f64::from(accent.r) * l).round() as u8;
        px[1] = (f64::from(accent.g) * l).round() as u8;
        px[2] = (f64::from(accent.b) * l).round() as u8;
    }
}

/// The "thinking" overlay shown under questions.
///
/// Loading never fails: a missing or unreadable asset selects the procedural bubbles.
#[derive(Clone, Debug)]
pub enum ThinkAnimation {
    /// Decoded GIF asset.
    Asset(AssetAnimation),
    /// Bubble fallback.
    Procedural(BubbleAnimation),
}

impl ThinkAnimation {
    /// Use `cfg.think_asset` when it decodes, bubbles otherwise.
    pub fn load(cfg: &ShortsConfig) -> Self {
        let Some(path) = cfg.think_asset.as_deref() else {
            return Self::Procedural(BubbleAnimation::new(cfg));
        };
        match AssetAnimation::load(path, cfg) {
            Ok(anim) => {
                tracing::debug!(
                    path = %path.display(),
                    frames = anim.frame_count(),
                    period_secs = anim.period_secs(),
                    "loaded think asset"
                );
                Self::Asset(anim)
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "could not load think asset, using procedural fallback"
                );
                Self::Procedural(BubbleAnimation::new(cfg))
            }
        }
    }

    /// `true` when the GIF asset is in use.
    pub fn is_asset_backed(&self) -> bool {
        matches!(self, Self::Asset(_))
    }
}

impl Animation for ThinkAnimation {
    fn size(&self) -> (u32, u32) {
        match self {
            Self::Asset(a) => a.size(),
            Self::Procedural(p) => p.size(),
        }
    }

    fn frame_at(&self, t: f64) -> ShortsResult<FrameRGBA> {
        match self {
            Self::Asset(a) => a.frame_at(t),
            Self::Procedural(p) => p.frame_at(t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/think.rs"]
mod tests;
