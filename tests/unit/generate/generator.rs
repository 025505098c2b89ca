use super::*;
use crate::encode::sink::{InMemorySink, SinkConfig};
use crate::foundation::core::{Canvas, FrameIndex};

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

fn one_fact() -> Vec<Fact> {
    vec![Fact::new("2+2=?", "4")]
}

/// Writes a marker file on `end`, standing in for an encoder.
struct FileSink {
    path: PathBuf,
    frames: u64,
}

impl FrameSink for FileSink {
    fn begin(&mut self, _cfg: SinkConfig) -> ShortsResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, _frame: &FrameRGBA) -> ShortsResult<()> {
        self.frames += 1;
        Ok(())
    }

    fn end(&mut self) -> ShortsResult<()> {
        std::fs::write(&self.path, self.frames.to_string()).map_err(anyhow::Error::from)?;
        Ok(())
    }
}

#[test]
fn new_rejects_invalid_config() {
    let cfg = ShortsConfig {
        fps: 0,
        ..cfg()
    };
    assert!(matches!(
        VideoGenerator::new(cfg),
        Err(ShortsError::Validation(_))
    ));
}

#[test]
fn missing_think_asset_falls_back_silently() {
    let cfg = ShortsConfig {
        think_asset: Some(PathBuf::from("/nonexistent/think.gif")),
        ..cfg()
    };
    let generator = VideoGenerator::new(cfg).unwrap();
    assert!(!generator.think_is_asset_backed());
}

#[test]
fn successful_run_reports_full_progress() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("video.mp4");
    let generator = VideoGenerator::new(cfg()).unwrap();
    let mut sink = FileSink {
        path: out.clone(),
        frames: 0,
    };
    let mut events = Vec::new();

    let path = generator
        .generate_with_sink(&one_fact(), &out, &mut sink, |ev: &ProgressEvent| {
            events.push(ev.clone())
        })
        .unwrap();

    assert_eq!(path, out);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "26");
    let percents: Vec<f64> = events.iter().map(|e| e.percent).collect();
    assert_eq!(percents.len(), 5);
    assert_eq!(percents[3], PERCENT_RENDERING);
    assert_eq!(percents[4], 100.0);
    assert_eq!(events[3].message, MSG_RENDERING);
    assert_eq!(events[4].message, MSG_DONE);
}

#[test]
fn sink_without_output_is_output_missing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("video.mp4");
    let generator = VideoGenerator::new(cfg()).unwrap();
    let mut events = Vec::new();

    let err = generator
        .generate_with_sink(
            &one_fact(),
            &out,
            &mut InMemorySink::new(),
            |ev: &ProgressEvent| events.push(ev.percent),
        )
        .unwrap_err();

    assert!(matches!(err, ShortsError::OutputMissing { ref path } if path == &out));
    assert_eq!(events.last().copied(), Some(PERCENT_RENDERING));
}

#[test]
fn empty_facts_fail_before_any_progress() {
    let dir = tempfile::tempdir().unwrap();
    let generator = VideoGenerator::new(cfg()).unwrap();
    let mut calls = 0;
    let err = generator
        .generate_with_sink(
            &[],
            &dir.path().join("v.mp4"),
            &mut InMemorySink::new(),
            |_: &ProgressEvent| calls += 1,
        )
        .unwrap_err();
    assert!(matches!(err, ShortsError::NoFacts));
    assert_eq!(calls, 0);
}

struct BrokenSink;

impl FrameSink for BrokenSink {
    fn begin(&mut self, _cfg: SinkConfig) -> ShortsResult<()> {
        Err(ShortsError::validation("encoder rejected the stream"))
    }

    fn push_frame(&mut self, _idx: FrameIndex, _frame: &FrameRGBA) -> ShortsResult<()> {
        Ok(())
    }

    fn end(&mut self) -> ShortsResult<()> {
        Ok(())
    }
}

#[test]
fn encode_failures_become_render_errors() {
    let dir = tempfile::tempdir().unwrap();
    let generator = VideoGenerator::new(cfg()).unwrap();
    let err = generator
        .generate_with_sink(
            &one_fact(),
            &dir.path().join("v.mp4"),
            &mut BrokenSink,
            |_: &ProgressEvent| {},
        )
        .unwrap_err();
    match err {
        ShortsError::Render(msg) => assert!(msg.contains("encoder rejected the stream")),
        other => panic!("expected render error, got {other:?}"),
    }
}

#[test]
fn plan_and_preview_frames_cover_the_timeline() {
    let generator = VideoGenerator::new(cfg()).unwrap();
    let facts = vec![Fact::new("A?", "a"), Fact::new("B?", "b")];
    let plan = generator.plan(&facts).unwrap();
    assert_eq!(plan.len(), 6);
    let last = plan.last().unwrap();
    assert_eq!(last.start_secs + last.duration_secs, 26.0);

    let frame = generator.render_frame_at(&facts, 7.5).unwrap();
    assert_eq!((frame.width, frame.height), (108, 192));
    assert!(frame.is_opaque());
    assert_eq!(
        frame,
        generator.render_frame_at(&facts, 7.5).unwrap(),
        "frames are deterministic"
    );
}
