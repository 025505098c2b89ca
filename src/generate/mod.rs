//! End-to-end video generation: timeline assembly, output checks and encoding.

/// [`VideoGenerator`](generator::VideoGenerator) entry points.
pub mod generator;
/// Output file naming and directory checks.
pub mod output;
