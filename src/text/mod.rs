/// Text card rasterization.
pub mod card;
/// Font discovery with system fallback.
pub mod fonts;
/// Greedy character-width word wrap.
pub mod wrap;
