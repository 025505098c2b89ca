//! Encoding sinks.
//!
//! Sinks consume rendered frames in timeline order and are driven by
//! [`Timeline::render_into`](crate::compose::timeline::Timeline::render_into).

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Frame sink trait and the in-memory sink.
pub mod sink;
