use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::animation::Animation;
use crate::animation::think::ThinkAnimation;
use crate::compose::segment::SegmentComposer;
use crate::compose::timeline::{PlanEntry, Timeline, build_timeline};
use crate::config::ShortsConfig;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::FrameSink;
use crate::facts::model::Fact;
use crate::foundation::error::{ShortsError, ShortsResult};
use crate::generate::output::{
    check_output_dir_writable, output_dir_of, remove_leftover, timestamped_output_path,
};
use crate::progress::{MSG_DONE, MSG_RENDERING, PERCENT_RENDERING, Progress, ProgressEvent};
use crate::render::frame::FrameRGBA;
use crate::text::card::TextCardRenderer;
use crate::text::fonts::FontLibrary;

/// Turns facts into a finished video.
///
/// Fonts and the think overlay are resolved once in [`VideoGenerator::new`] and reused by every
/// call. Generation is synchronous; run it on a worker thread to keep a UI responsive.
#[derive(Debug)]
pub struct VideoGenerator {
    cfg: ShortsConfig,
    fonts: FontLibrary,
    think: Arc<ThinkAnimation>,
}

impl VideoGenerator {
    /// Validate `cfg` and resolve the font and think overlay.
    pub fn new(cfg: ShortsConfig) -> ShortsResult<Self> {
        cfg.validate()?;
        let fonts = FontLibrary::load(&cfg);
        let think = Arc::new(ThinkAnimation::load(&cfg));
        Ok(Self { cfg, fonts, think })
    }

    /// Configuration in use.
    pub fn config(&self) -> &ShortsConfig {
        &self.cfg
    }

    /// `true` when cards will carry glyphs.
    pub fn has_font(&self) -> bool {
        self.fonts.face().is_some()
    }

    /// `true` when the think overlay comes from the configured asset rather than the bubbles.
    pub fn think_is_asset_backed(&self) -> bool {
        self.think.is_asset_backed()
    }

    /// Build the full timeline for `facts`, reporting segment progress.
    pub fn timeline(
        &self,
        facts: &[Fact],
        progress: &mut dyn FnMut(&ProgressEvent),
    ) -> ShortsResult<Timeline> {
        let think: Arc<dyn Animation> = self.think.clone();
        let mut composer = SegmentComposer::new(
            &self.cfg,
            TextCardRenderer::new(&self.cfg, &self.fonts),
            think,
        );
        build_timeline(
            &mut composer,
            facts,
            self.cfg.canvas,
            self.cfg.fps()?,
            progress,
        )
    }

    /// Encode `facts` to `out_dir/trivia_video_YYYYmmdd_HHMMSS.mp4` with the system `ffmpeg`.
    pub fn generate_video(
        &self,
        facts: &[Fact],
        out_dir: &Path,
        progress: impl FnMut(&ProgressEvent),
    ) -> ShortsResult<PathBuf> {
        let out_path = timestamped_output_path(out_dir);
        let mut sink = FfmpegSink::new(
            FfmpegSinkOpts::new(&out_path).with_background(self.cfg.background),
        );
        self.generate_with_sink(facts, &out_path, &mut sink, progress)
    }

    /// Run the whole pipeline into `sink`, which is expected to write `out_path`.
    ///
    /// Order of checks: empty input, output directory permission, then timeline assembly and
    /// encoding. Encode failures are reported as [`ShortsError::Render`] and any partial file is
    /// removed; a sink that succeeds without producing `out_path` yields
    /// [`ShortsError::OutputMissing`].
    #[tracing::instrument(skip(self, facts, sink, progress), fields(facts = facts.len()))]
    pub fn generate_with_sink(
        &self,
        facts: &[Fact],
        out_path: &Path,
        sink: &mut dyn FrameSink,
        mut progress: impl FnMut(&ProgressEvent),
    ) -> ShortsResult<PathBuf> {
        if facts.is_empty() {
            return Err(ShortsError::NoFacts);
        }
        check_output_dir_writable(output_dir_of(out_path))?;

        let timeline = self.timeline(facts, &mut progress)?;
        let mut progress = Progress::new(&mut progress);
        progress.emit(PERCENT_RENDERING, MSG_RENDERING);

        tracing::info!(
            out = %out_path.display(),
            frames = timeline.total_frames(),
            duration_secs = timeline.duration_secs(),
            "rendering video"
        );
        if let Err(err) = timeline.render_into(sink) {
            if out_path.exists() {
                remove_leftover(out_path);
            }
            return Err(into_render_error(err));
        }

        if !out_path.exists() {
            return Err(ShortsError::OutputMissing {
                path: out_path.to_path_buf(),
            });
        }
        tracing::info!(out = %out_path.display(), "video written");
        progress.emit(100.0, MSG_DONE);
        Ok(out_path.to_path_buf())
    }

    /// Render the frame shown `t` seconds into the video for `facts`.
    pub fn render_frame_at(&self, facts: &[Fact], t: f64) -> ShortsResult<FrameRGBA> {
        self.timeline(facts, &mut |_| {})?.frame_at_secs(t)
    }

    /// Segment plan for `facts`. Cards are laid out but no video frame is sampled.
    pub fn plan(&self, facts: &[Fact]) -> ShortsResult<Vec<PlanEntry>> {
        Ok(self.timeline(facts, &mut |_| {})?.plan())
    }
}

fn into_render_error(err: ShortsError) -> ShortsError {
    match err {
        ShortsError::Render(_) => err,
        ShortsError::Other(e) => ShortsError::render(format!("{e:#}")),
        other => ShortsError::render(other.to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/generator.rs"]
mod tests;
