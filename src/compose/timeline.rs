use crate::compose::segment::{Segment, SegmentComposer, SegmentKind};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::facts::model::Fact;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{ShortsError, ShortsResult};
use crate::progress::{MSG_ANSWER, MSG_COUNTDOWN, MSG_QUESTION, Progress, ProgressEvent};
use crate::render::frame::FrameRGBA;

/// One row of the timeline plan: where a segment starts and how many frames it spans.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlanEntry {
    /// Segment role.
    pub kind: SegmentKind,
    /// Fact the segment belongs to.
    pub fact_index: usize,
    /// Start time in the video.
    pub start_secs: f64,
    /// Length in seconds.
    pub duration_secs: f64,
    /// First frame index.
    pub start_frame: u64,
    /// Number of frames.
    pub frames: u64,
}

/// Counters returned by [`Timeline::render_into`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed into the sink.
    pub frames_rendered: u64,
}

/// Ordered segments across all facts.
///
/// Each segment spans `round(duration * fps)` frames and frame `i` of a segment samples its clip
/// at `i / fps`.
#[derive(Clone, Debug)]
pub struct Timeline {
    segments: Vec<Segment>,
    canvas: Canvas,
    fps: Fps,
    frame_starts: Vec<u64>,
    total_frames: u64,
}

impl Timeline {
    /// Timeline over `segments` in playback order.
    pub fn new(segments: Vec<Segment>, canvas: Canvas, fps: Fps) -> Self {
        let mut frame_starts = Vec::with_capacity(segments.len());
        let mut total_frames = 0u64;
        for seg in &segments {
            frame_starts.push(total_frames);
            total_frames += fps.secs_to_frames_round(seg.duration_secs());
        }
        Self {
            segments,
            canvas,
            fps,
            frame_starts,
            total_frames,
        }
    }

    /// Segments in playback order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Frame size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Sum of segment durations in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.segments.iter().map(Segment::duration_secs).sum()
    }

    /// Number of frames across all segments.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Start, length and frame span of every segment.
    pub fn plan(&self) -> Vec<PlanEntry> {
        let mut start_secs = 0.0;
        self.segments
            .iter()
            .enumerate()
            .map(|(i, seg)| {
                let entry = PlanEntry {
                    kind: seg.kind,
                    fact_index: seg.fact_index,
                    start_secs,
                    duration_secs: seg.duration_secs(),
                    start_frame: self.frame_starts[i],
                    frames: self.segment_frames(i),
                };
                start_secs += entry.duration_secs;
                entry
            })
            .collect()
    }

    /// Render the frame at timeline index `idx`.
    pub fn frame(&self, idx: FrameIndex) -> ShortsResult<FrameRGBA> {
        if idx.0 >= self.total_frames {
            return Err(ShortsError::validation(format!(
                "frame {} is outside the timeline ({} frames)",
                idx.0, self.total_frames
            )));
        }
        let seg_i = self
            .frame_starts
            .partition_point(|start| *start <= idx.0)
            .saturating_sub(1);
        let local = idx.0 - self.frame_starts[seg_i];
        self.segments[seg_i].frame_at(self.fps.frames_to_secs(local))
    }

    /// Render the frame shown at `secs` into the video.
    pub fn frame_at_secs(&self, secs: f64) -> ShortsResult<FrameRGBA> {
        if self.total_frames == 0 {
            return Err(ShortsError::validation("timeline is empty"));
        }
        let idx = (secs.max(0.0) * self.fps.as_f64()).floor() as u64;
        self.frame(FrameIndex(idx.min(self.total_frames - 1)))
    }

    /// Stream every frame in order into `sink`.
    ///
    /// The sink is always ended, also when a frame fails; the first error wins.
    #[tracing::instrument(skip(self, sink), fields(frames = self.total_frames))]
    pub fn render_into(&self, sink: &mut dyn FrameSink) -> ShortsResult<RenderStats> {
        sink.begin(SinkConfig {
            width: self.canvas.width,
            height: self.canvas.height,
            fps: self.fps,
        })?;

        let mut stats = RenderStats::default();
        let pushed = (0..self.total_frames).try_for_each(|i| {
            let idx = FrameIndex(i);
            let frame = self.frame(idx)?;
            sink.push_frame(idx, &frame)?;
            stats.frames_rendered += 1;
            Ok::<(), ShortsError>(())
        });

        if let Err(err) = pushed {
            if let Err(end_err) = sink.end() {
                tracing::warn!(error = %end_err, "sink failed to finish after render error");
            }
            return Err(err);
        }
        sink.end()?;
        tracing::info!(frames = stats.frames_rendered, "timeline rendered");
        Ok(stats)
    }

    fn segment_frames(&self, i: usize) -> u64 {
        let end = self
            .frame_starts
            .get(i + 1)
            .copied()
            .unwrap_or(self.total_frames);
        end - self.frame_starts[i]
    }
}

/// Build question, countdown and answer segments for every fact, in order.
///
/// Before each segment is built, `progress` receives the share of segments completed so far
/// with the phase message. Fact text is HTML-unescaped here.
pub fn build_timeline(
    composer: &mut SegmentComposer<'_>,
    facts: &[Fact],
    canvas: Canvas,
    fps: Fps,
    progress: &mut dyn FnMut(&ProgressEvent),
) -> ShortsResult<Timeline> {
    if facts.is_empty() {
        return Err(ShortsError::NoFacts);
    }

    let mut progress = Progress::new(progress);
    let total = facts.len() * 3;
    let mut done = 0usize;
    let mut segments = Vec::with_capacity(total);

    for (i, fact) in facts.iter().enumerate() {
        let fact = fact.decoded();

        progress.step(done, total, MSG_QUESTION);
        segments.push(composer.question(i, &fact.question)?);
        done += 1;

        progress.step(done, total, MSG_COUNTDOWN);
        segments.push(composer.countdown(i)?);
        done += 1;

        progress.step(done, total, MSG_ANSWER);
        segments.push(composer.answer(i, &fact.correct_answer)?);
        done += 1;

        tracing::debug!(fact = i, "segments built");
    }

    Ok(Timeline::new(segments, canvas, fps))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/timeline.rs"]
mod tests;
