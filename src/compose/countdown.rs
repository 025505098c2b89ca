use std::sync::Arc;

use crate::animation::clock::ClockAnimation;
use crate::compose::clip::{Anchor, Clip, Overlay};
use crate::config::ShortsConfig;
use crate::foundation::error::{ShortsError, ShortsResult};
use crate::text::card::TextCardRenderer;

/// One numbered step of a countdown.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CountdownTick {
    /// Number shown, counting down to 1.
    pub numeral: u32,
    /// Offset from the countdown start.
    pub start_secs: f64,
    /// Length of this tick.
    pub duration_secs: f64,
}

/// Split `duration_secs` into `ticks` equal steps numbered `ticks, ticks-1, ..., 1`.
///
/// The split is an exact floating-point division; no step absorbs a remainder.
pub fn plan_countdown(duration_secs: f64, ticks: u32) -> ShortsResult<Vec<CountdownTick>> {
    if ticks == 0 {
        return Err(ShortsError::validation("countdown needs at least one tick"));
    }
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(ShortsError::validation(
            "countdown duration must be finite and > 0",
        ));
    }
    let step = duration_secs / f64::from(ticks);
    Ok((0..ticks)
        .map(|i| CountdownTick {
            numeral: ticks - i,
            start_secs: f64::from(i) * step,
            duration_secs: step,
        })
        .collect())
}

/// Build the countdown clip: for each tick a numeral card with a clock sweeping once over
/// the tick's length, played in descending numeral order.
pub fn build_countdown(
    cfg: &ShortsConfig,
    cards: &mut TextCardRenderer<'_>,
    duration_secs: f64,
) -> ShortsResult<Clip> {
    let ticks = plan_countdown(duration_secs, cfg.countdown_ticks)?;
    let anchor = Anchor::centered_at(cfg.clock_anchor_y);
    let mut children = Vec::with_capacity(ticks.len());
    for tick in ticks {
        let card = cards.render_numeral(tick.numeral)?;
        let clock = ClockAnimation::new(cfg, tick.duration_secs)?;
        children.push(Clip::layered(
            Arc::new(card),
            Overlay {
                animation: Arc::new(clock),
                anchor,
            },
            tick.duration_secs,
        )?);
    }
    Clip::sequence(children)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/countdown.rs"]
mod tests;
