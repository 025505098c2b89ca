use super::*;
use crate::foundation::core::Rgb8;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
    }
}

#[test]
fn in_memory_sink_records_config_and_frames() {
    let mut sink = InMemorySink::new();
    assert!(sink.config().is_none());

    sink.begin(cfg()).unwrap();
    let frame = FrameRGBA::solid(2, 2, Rgb8::WHITE);
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    sink.push_frame(FrameIndex(1), &frame).unwrap();
    assert!(!sink.is_ended());
    sink.end().unwrap();

    assert_eq!(sink.config(), Some(cfg()));
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.frames()[1].0, FrameIndex(1));
    assert!(sink.is_ended());
}

#[test]
fn begin_resets_previous_run() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &FrameRGBA::transparent(2, 2))
        .unwrap();
    sink.end().unwrap();

    sink.begin(cfg()).unwrap();
    assert!(sink.frames().is_empty());
    assert!(!sink.is_ended());
}
