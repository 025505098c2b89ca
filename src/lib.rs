//! Trivia Shorts turns trivia question/answer pairs into short vertical videos.
//!
//! Each fact becomes a 13 second block: the question card with a "thinking" overlay, a numbered
//! countdown with a sweeping clock hand, and the answer card. Frames are rasterized on the CPU
//! and streamed into a [`FrameSink`], by default the system `ffmpeg`.
//!
//! - Load facts with [`load_facts`] or build [`Fact`] values directly
//! - Create a [`VideoGenerator`] from a [`ShortsConfig`]
//! - Call [`VideoGenerator::generate_video`] with a progress callback
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Overlay animations (clock, bubbles, think asset).
pub mod animation;
/// Clips, segments and the timeline.
pub mod compose;
/// Styling and timing configuration.
pub mod config;
/// Encoding sinks.
pub mod encode;
/// Trivia fact input.
pub mod facts;
/// End-to-end generation.
pub mod generate;
/// Progress events.
pub mod progress;
/// Frame buffers and rasterization.
pub mod render;
/// Text layout and card rendering.
pub mod text;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Rgb8};
pub use crate::foundation::error::{ShortsError, ShortsResult};

pub use crate::compose::timeline::{PlanEntry, Timeline};
pub use crate::config::ShortsConfig;
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::facts::model::{Fact, load_facts, parse_facts};
pub use crate::generate::generator::VideoGenerator;
pub use crate::progress::ProgressEvent;
pub use crate::render::frame::FrameRGBA;
