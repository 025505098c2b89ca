use std::sync::Arc;

use crate::animation::Animation;
use crate::compose::clip::{Anchor, Clip, Overlay};
use crate::compose::countdown::build_countdown;
use crate::config::ShortsConfig;
use crate::foundation::core::Rgb8;
use crate::foundation::error::ShortsResult;
use crate::render::frame::FrameRGBA;
use crate::text::card::{CardKind, TextCardRenderer};

/// The role a segment plays within one fact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Question card with the think overlay.
    Question,
    /// Numbered countdown with the clock.
    Countdown,
    /// Answer card.
    Answer,
}

/// A timed unit of the final video.
#[derive(Clone, Debug)]
pub struct Segment {
    /// Question, countdown or answer.
    pub kind: SegmentKind,
    /// Index of the fact this segment belongs to.
    pub fact_index: usize,
    /// Content sampled by local time.
    pub clip: Clip,
}

impl Segment {
    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.clip.duration_secs()
    }

    /// Frame at local time `t`.
    pub fn frame_at(&self, t: f64) -> ShortsResult<FrameRGBA> {
        self.clip.frame_at(t)
    }
}

/// Builds the three segment kinds from shared styling, fonts and the think overlay.
pub struct SegmentComposer<'a> {
    cfg: &'a ShortsConfig,
    cards: TextCardRenderer<'a>,
    think: Arc<dyn Animation>,
}

impl<'a> SegmentComposer<'a> {
    /// Composer sharing one card renderer and think overlay across facts.
    pub fn new(
        cfg: &'a ShortsConfig,
        cards: TextCardRenderer<'a>,
        think: Arc<dyn Animation>,
    ) -> Self {
        Self { cfg, cards, think }
    }

    /// Combine a rendered card with the optional think overlay into one clip.
    ///
    /// Question cards carry the think animation anchored at the horizontal center, 80% down;
    /// answer cards are a plain still.
    pub fn compose_card(
        &self,
        card: FrameRGBA,
        duration_secs: f64,
        is_question: bool,
    ) -> ShortsResult<Clip> {
        let card = Arc::new(card);
        if !is_question {
            return Clip::still(card, duration_secs);
        }
        Clip::layered(
            card,
            Overlay {
                animation: Arc::clone(&self.think),
                anchor: Anchor::centered_at(self.cfg.think_anchor_y),
            },
            duration_secs,
        )
    }

    /// Question card held for `question_secs` in the accent color.
    pub fn question(&mut self, fact_index: usize, text: &str) -> ShortsResult<Segment> {
        let clip = self.text_clip(text, CardKind::Question, self.cfg.accent, self.cfg.question_secs)?;
        Ok(Segment {
            kind: SegmentKind::Question,
            fact_index,
            clip,
        })
    }

    /// Countdown over `countdown_secs`.
    pub fn countdown(&mut self, fact_index: usize) -> ShortsResult<Segment> {
        let clip = build_countdown(self.cfg, &mut self.cards, self.cfg.countdown_secs)?;
        Ok(Segment {
            kind: SegmentKind::Countdown,
            fact_index,
            clip,
        })
    }

    /// Answer card held for `answer_secs` in the success color.
    pub fn answer(&mut self, fact_index: usize, text: &str) -> ShortsResult<Segment> {
        let clip = self.text_clip(text, CardKind::Answer, self.cfg.success, self.cfg.answer_secs)?;
        Ok(Segment {
            kind: SegmentKind::Answer,
            fact_index,
            clip,
        })
    }

    fn text_clip(
        &mut self,
        text: &str,
        kind: CardKind,
        color: Rgb8,
        duration_secs: f64,
    ) -> ShortsResult<Clip> {
        let card = self.cards.render_text(text, kind, color)?;
        self.compose_card(card, duration_secs, kind == CardKind::Question)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/segment.rs"]
mod tests;
