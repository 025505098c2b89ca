/// Timed clips: stills, overlays and sequences.
pub mod clip;
/// Numbered countdown sequence.
pub mod countdown;
/// Question/countdown/answer segments.
pub mod segment;
/// Ordered timeline of segments across all facts.
pub mod timeline;
