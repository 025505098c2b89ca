use std::sync::Arc;

use super::*;
use crate::animation::bubbles::BubbleAnimation;
use crate::config::ShortsConfig;
use crate::encode::sink::InMemorySink;
use crate::text::card::TextCardRenderer;
use crate::text::fonts::FontLibrary;

fn cfg() -> ShortsConfig {
    ShortsConfig {
        canvas: Canvas {
            width: 108,
            height: 192,
        },
        fps: 2,
        ..ShortsConfig::default()
    }
}

fn build(cfg: &ShortsConfig, facts: &[Fact]) -> (Timeline, Vec<ProgressEvent>) {
    let fonts = FontLibrary::empty();
    let mut composer = SegmentComposer::new(
        cfg,
        TextCardRenderer::new(cfg, &fonts),
        Arc::new(BubbleAnimation::new(cfg)),
    );
    let mut events = Vec::new();
    let timeline = build_timeline(
        &mut composer,
        facts,
        cfg.canvas,
        cfg.fps().unwrap(),
        &mut |ev: &ProgressEvent| events.push(ev.clone()),
    )
    .unwrap();
    (timeline, events)
}

fn facts(n: usize) -> Vec<Fact> {
    (0..n)
        .map(|i| Fact::new(format!("Question {i}?"), format!("Answer {i}")))
        .collect()
}

#[test]
fn duration_is_thirteen_seconds_per_fact() {
    let cfg = cfg();
    for n in 1..=3 {
        let (timeline, _) = build(&cfg, &facts(n));
        assert_eq!(timeline.segments().len(), n * 3);
        assert!((timeline.duration_secs() - 13.0 * n as f64).abs() < 1e-9);
        assert_eq!(timeline.total_frames(), 26 * n as u64);
    }
}

#[test]
fn segments_follow_question_countdown_answer_order() {
    let cfg = cfg();
    let (timeline, _) = build(&cfg, &facts(2));
    let kinds: Vec<(SegmentKind, usize)> = timeline
        .segments()
        .iter()
        .map(|s| (s.kind, s.fact_index))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (SegmentKind::Question, 0),
            (SegmentKind::Countdown, 0),
            (SegmentKind::Answer, 0),
            (SegmentKind::Question, 1),
            (SegmentKind::Countdown, 1),
            (SegmentKind::Answer, 1),
        ]
    );
}

#[test]
fn progress_is_reported_before_each_segment() {
    let cfg = cfg();
    let (_, events) = build(&cfg, &facts(1));
    let got: Vec<(i64, &str)> = events
        .iter()
        .map(|e| ((e.percent * 10.0).round() as i64, e.message.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![
            (0, MSG_QUESTION),
            (333, MSG_COUNTDOWN),
            (667, MSG_ANSWER),
        ]
    );

    let (_, events) = build(&cfg, &facts(3));
    assert_eq!(events.len(), 9);
    assert!(events.windows(2).all(|w| w[0].percent <= w[1].percent));
    assert!((events[8].percent - 800.0 / 9.0).abs() < 1e-9);
}

#[test]
fn empty_facts_is_an_error() {
    let cfg = cfg();
    let fonts = FontLibrary::empty();
    let mut composer = SegmentComposer::new(
        &cfg,
        TextCardRenderer::new(&cfg, &fonts),
        Arc::new(BubbleAnimation::new(&cfg)),
    );
    let mut calls = 0;
    let err = build_timeline(
        &mut composer,
        &[],
        cfg.canvas,
        cfg.fps().unwrap(),
        &mut |_: &ProgressEvent| calls += 1,
    )
    .unwrap_err();
    assert!(matches!(err, ShortsError::NoFacts));
    assert_eq!(calls, 0);
}

#[test]
fn plan_entries_are_contiguous() {
    let cfg = cfg();
    let (timeline, _) = build(&cfg, &facts(2));
    let plan = timeline.plan();
    assert_eq!(plan.len(), 6);
    assert_eq!(plan[0].start_secs, 0.0);
    assert_eq!(plan[1].start_secs, 6.0);
    assert_eq!(plan[2].start_secs, 11.0);
    assert_eq!(plan[3].start_secs, 13.0);
    for w in plan.windows(2) {
        assert_eq!(w[0].start_frame + w[0].frames, w[1].start_frame);
    }
    assert_eq!(plan[5].start_frame + plan[5].frames, timeline.total_frames());
}

#[test]
fn frame_lookup_maps_into_segments() {
    let cfg = cfg();
    let (timeline, _) = build(&cfg, &facts(1));

    // Frame 12 is the first countdown frame; it matches the countdown segment at t = 0.
    let countdown = &timeline.segments()[1];
    assert_eq!(
        timeline.frame(FrameIndex(12)).unwrap(),
        countdown.frame_at(0.0).unwrap()
    );
    assert_eq!(
        timeline.frame_at_secs(6.0).unwrap(),
        countdown.frame_at(0.0).unwrap()
    );
    // Past the end clamps to the last frame.
    assert_eq!(
        timeline.frame_at_secs(100.0).unwrap(),
        timeline.frame(FrameIndex(25)).unwrap()
    );
    assert!(timeline.frame(FrameIndex(26)).is_err());
}

#[test]
fn render_into_pushes_every_frame_in_order() {
    let cfg = cfg();
    let (timeline, _) = build(&cfg, &facts(1));
    let mut sink = InMemorySink::new();
    let stats = timeline.render_into(&mut sink).unwrap();

    assert_eq!(stats.frames_rendered, 26);
    let sink_cfg = sink.config().unwrap();
    assert_eq!((sink_cfg.width, sink_cfg.height), (108, 192));
    assert_eq!(sink_cfg.fps, Fps::new(2, 1).unwrap());
    assert!(sink.is_ended());
    for (i, (idx, frame)) in sink.frames().iter().enumerate() {
        assert_eq!(idx.0, i as u64);
        assert!(frame.is_opaque());
    }
}

struct FailingSink {
    pushed: u64,
    ended: bool,
}

impl FrameSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> ShortsResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, _frame: &FrameRGBA) -> ShortsResult<()> {
        self.pushed += 1;
        if self.pushed == 3 {
            return Err(ShortsError::render("disk full"));
        }
        Ok(())
    }

    fn end(&mut self) -> ShortsResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[test]
fn render_into_ends_the_sink_on_failure() {
    let cfg = cfg();
    let (timeline, _) = build(&cfg, &facts(1));
    let mut sink = FailingSink {
        pushed: 0,
        ended: false,
    };
    let err = timeline.render_into(&mut sink).unwrap_err();
    assert!(err.to_string().contains("disk full"));
    assert_eq!(sink.pushed, 3);
    assert!(sink.ended);
}
