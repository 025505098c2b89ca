use std::f64::consts::TAU;

use crate::animation::Animation;
use crate::config::ShortsConfig;
use crate::foundation::core::{Point, Rgb8};
use crate::foundation::error::{ShortsError, ShortsResult};
use crate::render::frame::FrameRGBA;
use crate::render::raster::Raster;

/// A ring with one hand sweeping a full revolution over `duration_secs`.
///
/// Frames are flattened onto the background color, so the square is opaque.
#[derive(Clone, Debug, PartialEq)]
pub struct ClockAnimation {
    duration_secs: f64,
    size: u32,
    color: Rgb8,
    background: Rgb8,
    ring_margin: f64,
    ring_width: f64,
    hand_width: f64,
    hand_frac: f64,
    dot_radius: f64,
}

impl ClockAnimation {
    /// Clock sized and styled from `cfg`; `duration_secs` is one full revolution.
    pub fn new(cfg: &ShortsConfig, duration_secs: f64) -> ShortsResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(ShortsError::validation(
                "clock duration must be finite and > 0",
            ));
        }
        Ok(Self {
            duration_secs,
            size: cfg.canvas.width_fraction(cfg.clock_size_frac),
            color: cfg.accent,
            background: cfg.background,
            ring_margin: cfg.clock_ring_margin_px,
            ring_width: cfg.clock_ring_width_px,
            hand_width: cfg.clock_hand_width_px,
            hand_frac: cfg.clock_hand_frac,
            dot_radius: cfg.clock_dot_radius_px,
        })
    }

    /// Length of one revolution in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Hand angle in radians, clockwise from 12 o'clock: `0` at `t = 0`, `2π` at the end.
    pub fn hand_angle(&self, t: f64) -> f64 {
        (t / self.duration_secs) * TAU
    }

    /// Tip of the hand in frame pixels.
    pub fn hand_tip(&self, t: f64) -> Point {
        let c = self.center();
        let angle = self.hand_angle(t);
        let len = self.hand_length();
        Point::new(c.x + len * angle.sin(), c.y - len * angle.cos())
    }

    fn center(&self) -> Point {
        let half = f64::from(self.size) / 2.0;
        Point::new(half, half)
    }

    fn hand_length(&self) -> f64 {
        (f64::from(self.size) / 2.0 - self.ring_margin) * self.hand_frac
    }
}

impl Animation for ClockAnimation {
    fn size(&self) -> (u32, u32) {
        (self.size, self.size)
    }

    fn frame_at(&self, t: f64) -> ShortsResult<FrameRGBA> {
        let mut raster = Raster::new(self.size, self.size)?;
        let paint = self.color.with_alpha(255);
        let c = self.center();

        let ring_radius = (f64::from(self.size) / 2.0 - self.ring_margin).max(0.0);
        raster.stroke_shape(&kurbo::Circle::new(c, ring_radius), self.ring_width, paint);
        raster.stroke_shape(
            &kurbo::Line::new(c, self.hand_tip(t)),
            self.hand_width,
            paint,
        );
        raster.fill_circle(c, self.dot_radius, paint);

        Ok(raster.finish().flatten_over(self.background))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
