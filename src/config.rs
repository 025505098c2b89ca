//! Immutable styling and timing configuration shared by every pipeline stage.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Fps, Rgb8};
use crate::foundation::error::{ShortsError, ShortsResult};

/// Styling, timing and asset configuration for one generator.
///
/// Defaults produce a 1080x1920 30 fps video with 6 s questions, a 5 s countdown and 2 s
/// answers. Every component receives this struct by reference; nothing reads global state.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShortsConfig {
    /// Output canvas in pixels.
    pub canvas: Canvas,
    /// Output frame rate (frames per second).
    pub fps: u32,
    /// Canvas background.
    pub background: Rgb8,
    /// Margin from the canvas edges in pixels.
    pub margin_px: u32,

    /// Duration of each question segment in seconds.
    pub question_secs: f64,
    /// Duration of each countdown segment in seconds.
    pub countdown_secs: f64,
    /// Number of numbered ticks in a countdown.
    pub countdown_ticks: u32,
    /// Duration of each answer segment in seconds.
    pub answer_secs: f64,

    /// Question text, numerals and animation color.
    pub accent: Rgb8,
    /// Answer text color.
    pub success: Rgb8,
    /// Drop shadow color.
    pub shadow: Rgb8,

    /// Font size for question and answer cards.
    pub text_font_px: f32,
    /// Font size for countdown numerals.
    pub numeral_font_px: f32,
    /// Drop shadow offset for question and answer cards.
    pub text_shadow_px: f32,
    /// Drop shadow offset for countdown numerals.
    pub numeral_shadow_px: f32,
    /// Extra spacing added to each line's glyph height.
    pub line_leading_px: f32,
    /// Greedy word-wrap width in characters.
    pub wrap_chars: usize,

    /// Clock square size as a fraction of canvas width.
    pub clock_size_frac: f64,
    /// Vertical anchor of the clock's top edge as a fraction of canvas height.
    pub clock_anchor_y: f64,
    /// Inset of the clock ring from the clock square.
    pub clock_ring_margin_px: f64,
    /// Clock ring stroke width.
    pub clock_ring_width_px: f64,
    /// Clock hand stroke width.
    pub clock_hand_width_px: f64,
    /// Hand length as a fraction of `(radius - ring margin)`.
    pub clock_hand_frac: f64,
    /// Radius of the fixed center dot.
    pub clock_dot_radius_px: f64,

    /// Think animation width as a fraction of canvas width.
    pub think_width_frac: f64,
    /// Procedural think animation height as a fraction of canvas width.
    pub think_fallback_height_frac: f64,
    /// Vertical anchor of the think animation's top edge as a fraction of canvas height.
    pub think_anchor_y: f64,
    /// Looping animation asset (GIF). Falls back to the procedural bubbles when absent.
    pub think_asset: Option<PathBuf>,

    /// Preferred font file. Falls back to a system font when absent or unreadable.
    pub font_path: Option<PathBuf>,
}

impl Default for ShortsConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1080,
                height: 1920,
            },
            fps: 30,
            background: Rgb8::BLACK,
            margin_px: 50,

            question_secs: 6.0,
            countdown_secs: 5.0,
            countdown_ticks: 5,
            answer_secs: 2.0,

            accent: Rgb8::new(255, 223, 0),
            success: Rgb8::new(0, 255, 127),
            shadow: Rgb8::BLACK,

            text_font_px: 70.0,
            numeral_font_px: 200.0,
            text_shadow_px: 3.0,
            numeral_shadow_px: 5.0,
            line_leading_px: 10.0,
            wrap_chars: 30,

            clock_size_frac: 0.2,
            clock_anchor_y: 0.6,
            clock_ring_margin_px: 10.0,
            clock_ring_width_px: 3.0,
            clock_hand_width_px: 4.0,
            clock_hand_frac: 0.8,
            clock_dot_radius_px: 5.0,

            think_width_frac: 0.3,
            think_fallback_height_frac: 0.2,
            think_anchor_y: 0.8,
            think_asset: None,

            font_path: None,
        }
    }
}

impl ShortsConfig {
    /// Load a (possibly partial) JSON configuration; missing fields keep their defaults.
    pub fn from_path(path: &Path) -> ShortsResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse a (possibly partial) JSON configuration and validate it.
    pub fn from_json_str(text: &str) -> ShortsResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| ShortsError::validation(format!("invalid config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject sizes, rates and fractions the pipeline cannot render.
    pub fn validate(&self) -> ShortsResult<()> {
        let Canvas { width, height } = self.canvas;
        if width == 0 || height == 0 {
            return Err(ShortsError::validation("canvas width/height must be non-zero"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(ShortsError::validation(format!(
                "canvas {width}x{height} exceeds the raster limit of {}",
                u16::MAX
            )));
        }
        if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
            return Err(ShortsError::validation(
                "canvas width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if self.fps == 0 {
            return Err(ShortsError::validation("fps must be non-zero"));
        }
        for (name, secs) in [
            ("question_secs", self.question_secs),
            ("countdown_secs", self.countdown_secs),
            ("answer_secs", self.answer_secs),
        ] {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(ShortsError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self.countdown_ticks == 0 {
            return Err(ShortsError::validation("countdown_ticks must be > 0"));
        }
        if self.wrap_chars == 0 {
            return Err(ShortsError::validation("wrap_chars must be > 0"));
        }
        for (name, px) in [
            ("text_font_px", self.text_font_px),
            ("numeral_font_px", self.numeral_font_px),
        ] {
            if !px.is_finite() || px <= 0.0 {
                return Err(ShortsError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, frac) in [
            ("clock_size_frac", self.clock_size_frac),
            ("think_width_frac", self.think_width_frac),
            ("think_fallback_height_frac", self.think_fallback_height_frac),
        ] {
            if !(frac > 0.0 && frac <= 1.0) {
                return Err(ShortsError::validation(format!("{name} must be in (0, 1]")));
            }
        }
        Ok(())
    }

    /// Configured frame rate as a rational `Fps`.
    pub fn fps(&self) -> ShortsResult<Fps> {
        Fps::new(self.fps, 1)
    }

    /// Seconds of video produced for each fact.
    pub fn secs_per_fact(&self) -> f64 {
        self.question_secs + self.countdown_secs + self.answer_secs
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
