use crate::foundation::error::{ShortsError, ShortsResult};

pub use kurbo::{Affine, Point};

/// Zero-based frame number within a timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Rational frame rate `num / den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator (must be > 0).
    pub den: u32,
}

impl Fps {
    /// Construct a frame rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> ShortsResult<Self> {
        if den == 0 {
            return Err(ShortsError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ShortsError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Length of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Start time in seconds of frame number `frames`.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Number of frames covering `secs`, rounded to the nearest frame.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round().max(0.0) as u64
    }
}

/// Output canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// `fraction` of the canvas width in whole pixels (at least one).
    pub fn width_fraction(self, fraction: f64) -> u32 {
        ((f64::from(self.width) * fraction) as u32).max(1)
    }
}

/// Opaque RGB8 color as used by the styling configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb8 {
    /// `(0, 0, 0)`.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// `(255, 255, 255)`.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Construct from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Paint color with the given straight alpha.
    pub fn with_alpha(self, a: u8) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, a)
    }

    /// Opaque RGBA8 bytes.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
