use std::f64::consts::{PI, TAU};

use crate::animation::Animation;
use crate::config::ShortsConfig;
use crate::foundation::core::{Point, Rgb8};
use crate::foundation::error::ShortsResult;
use crate::render::frame::FrameRGBA;
use crate::render::raster::Raster;

/// `(x ratio, y ratio, radius px, phase offset)` per bubble, left to right.
const BUBBLES: [(f64, f64, f64, f64); 4] = [
    (0.2, 0.8, 15.0, 0.0),
    (0.4, 0.7, 20.0, PI / 3.0),
    (0.6, 0.6, 25.0, 2.0 * PI / 3.0),
    (0.8, 0.5, 30.0, PI),
];

/// Vertical bob amplitude in pixels.
const BOB_PX: f64 = 20.0;

/// Four bubbles bobbing and pulsing with staggered phases, one cycle per second.
#[derive(Clone, Debug, PartialEq)]
pub struct BubbleAnimation {
    width: u32,
    height: u32,
    color: Rgb8,
    background: Rgb8,
}

/// Center and alpha of one bubble at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubbleState {
    /// Bubble center in frame pixels.
    pub center: Point,
    /// Radius in pixels.
    pub radius: f64,
    /// Opacity, `0..=255`.
    pub alpha: u8,
}

impl BubbleAnimation {
    /// Bubbles sized from the think overlay fractions of `cfg`.
    pub fn new(cfg: &ShortsConfig) -> Self {
        Self {
            width: cfg.canvas.width_fraction(cfg.think_width_frac),
            height: cfg.canvas.width_fraction(cfg.think_fallback_height_frac),
            color: cfg.accent,
            background: cfg.background,
        }
    }

    /// Positions and opacities of all bubbles at `t`.
    pub fn bubbles_at(&self, t: f64) -> [BubbleState; 4] {
        let phase = t * TAU;
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        BUBBLES.map(|(x_ratio, y_ratio, radius, offset)| {
            let wave = (phase + offset).sin();
            let x = (w * x_ratio).trunc();
            let y = (h * y_ratio).trunc() + (BOB_PX * wave).trunc();
            let alpha = (255.0 * (0.5 + 0.5 * wave)) as u8;
            BubbleState {
                center: Point::new(x, y),
                radius,
                alpha,
            }
        })
    }
}

impl Animation for BubbleAnimation {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn frame_at(&self, t: f64) -> ShortsResult<FrameRGBA> {
        let mut raster = Raster::new(self.width, self.height)?;
        for b in self.bubbles_at(t) {
            if b.alpha == 0 {
                continue;
            }
            raster.fill_circle(b.center, b.radius, self.color.with_alpha(b.alpha));
        }
        Ok(raster.finish().flatten_over(self.background))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/bubbles.rs"]
mod tests;
