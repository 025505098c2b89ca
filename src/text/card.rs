use std::borrow::Cow;

use crate::config::ShortsConfig;
use crate::foundation::core::{Affine, Rgb8};
use crate::foundation::error::ShortsResult;
use crate::render::frame::FrameRGBA;
use crate::render::raster::{Raster, affine_to_cpu};
use crate::text::fonts::FontLibrary;
use crate::text::wrap::wrap;

/// What a card is used for. Only affects diagnostics; styling comes from [`CardStyle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardKind {
    /// Question card.
    Question,
    /// Answer card.
    Answer,
    /// Countdown numeral.
    Numeral,
}

/// Glyph styling for one card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardStyle {
    /// Font size in pixels.
    pub font_px: f32,
    /// Glyph color.
    pub color: Rgb8,
    /// Drop shadow color.
    pub shadow: Rgb8,
    /// Shadow offset, right and down.
    pub shadow_px: f32,
    /// Extra space added to each line height.
    pub leading_px: f32,
}

impl CardStyle {
    /// Question/answer styling in `color`.
    pub fn text(cfg: &ShortsConfig, color: Rgb8) -> Self {
        Self {
            font_px: cfg.text_font_px,
            color,
            shadow: cfg.shadow,
            shadow_px: cfg.text_shadow_px,
            leading_px: cfg.line_leading_px,
        }
    }

    /// Countdown numeral styling.
    pub fn numeral(cfg: &ShortsConfig) -> Self {
        Self {
            font_px: cfg.numeral_font_px,
            color: cfg.accent,
            shadow: cfg.shadow,
            shadow_px: cfg.numeral_shadow_px,
            leading_px: 0.0,
        }
    }
}

/// Horizontal/vertical placement of one laid-out line, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinePlacement {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub top: f32,
    /// Measured advance width.
    pub width: f32,
}

/// Block layout computed for a card before any pixels are drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct CardLayout {
    /// Wrapped lines, top to bottom.
    pub lines: Vec<String>,
    /// Glyph height plus leading.
    pub line_height: f32,
    /// One placement per line.
    pub placements: Vec<LinePlacement>,
}

impl CardLayout {
    /// Height of all lines together.
    pub fn block_height(&self) -> f32 {
        self.line_height * self.lines.len() as f32
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Brush;

struct LoadedFont {
    family: String,
    data: vello_cpu::peniko::FontData,
}

/// Rasterizes centered, word-wrapped, drop-shadowed text onto a full canvas.
///
/// Holds Parley shaping contexts, so one renderer is reused for every card of a run. Output is
/// deterministic for identical inputs.
pub struct TextCardRenderer<'a> {
    cfg: &'a ShortsConfig,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Brush>,
    font: Option<LoadedFont>,
}

impl<'a> TextCardRenderer<'a> {
    /// Renderer using the face resolved in `fonts`, if any.
    pub fn new(cfg: &'a ShortsConfig, fonts: &FontLibrary) -> Self {
        let mut font_ctx = parley::FontContext::default();
        let font = fonts.face().and_then(|face| {
            let families = font_ctx.collection.register_fonts(
                parley::fontique::Blob::from(face.bytes.as_ref().clone()),
                None,
            );
            let family = family_containing(
                families
                    .iter()
                    .map(|(id, fonts)| (*id, fonts.iter().map(|f| f.index()))),
                face.index,
            )
            .and_then(|id| font_ctx.collection.family_name(id))
            .map(str::to_string);
            if family.is_none() {
                tracing::warn!(
                    origin = %face.origin,
                    index = face.index,
                    "font registered no family for the selected face; rendering without glyphs"
                );
            }
            Some(LoadedFont {
                family: family?,
                data: vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
                    face.index,
                ),
            })
        });

        Self {
            cfg,
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            font,
        }
    }

    /// `true` when glyphs will actually be drawn.
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Render a question or answer card: wrapped to `wrap_chars`, vertically and horizontally
    /// centered, shadow beneath the colored text.
    #[tracing::instrument(level = "debug", skip(self, text), fields(chars = text.chars().count()))]
    pub fn render_text(
        &mut self,
        text: &str,
        kind: CardKind,
        color: Rgb8,
    ) -> ShortsResult<FrameRGBA> {
        let style = CardStyle::text(self.cfg, color);
        let lines = wrap(text, self.cfg.wrap_chars);
        self.render_lines(lines, &style)
    }

    /// Render a large centered countdown numeral.
    pub fn render_numeral(&mut self, numeral: u32) -> ShortsResult<FrameRGBA> {
        let style = CardStyle::numeral(self.cfg);
        self.render_lines(vec![numeral.to_string()], &style)
    }

    /// Compute line placement without drawing.
    pub fn layout_lines(&mut self, lines: Vec<String>, style: &CardStyle) -> CardLayout {
        let canvas = self.cfg.canvas;
        // Line height comes from a probe string with both an ascender and a descender.
        let line_height = self.measure("hg", style.font_px).1 + style.leading_px;
        let block = line_height * lines.len() as f32;
        let mut top = ((canvas.height as f32 - block) / 2.0).floor();

        let mut placements = Vec::with_capacity(lines.len());
        for line in &lines {
            let (width, _) = self.measure(line, style.font_px);
            let x = ((canvas.width as f32 - width) / 2.0).floor();
            placements.push(LinePlacement { x, top, width });
            top += line_height;
        }

        CardLayout {
            lines,
            line_height,
            placements,
        }
    }

    fn render_lines(&mut self, lines: Vec<String>, style: &CardStyle) -> ShortsResult<FrameRGBA> {
        let canvas = self.cfg.canvas;
        let mut raster = Raster::new(canvas.width, canvas.height)?;
        raster.fill_background(self.cfg.background);

        let layout = self.layout_lines(lines, style);
        if self.font.is_none() {
            return Ok(raster.finish());
        }

        for (line, place) in layout.lines.iter().zip(&layout.placements) {
            let Some(shaped) = self.shape(line, style.font_px) else {
                continue;
            };
            let Some(font) = self.font.as_ref() else {
                continue;
            };
            let shadow_at = Affine::translate((
                f64::from(place.x + style.shadow_px),
                f64::from(place.top + style.shadow_px),
            ));
            draw_layout(&mut raster, &shaped, &font.data, shadow_at, style.shadow);
            let text_at = Affine::translate((f64::from(place.x), f64::from(place.top)));
            draw_layout(&mut raster, &shaped, &font.data, text_at, style.color);
        }

        Ok(raster.finish())
    }

    fn shape(&mut self, text: &str, size_px: f32) -> Option<parley::Layout<Brush>> {
        let family = self.font.as_ref()?.family.clone();
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        let mut layout: parley::Layout<Brush> = builder.build(text);
        layout.break_all_lines(None);
        Some(layout)
    }

    /// `(advance width, ascent + descent)` of a single unwrapped line.
    ///
    /// Without a font, falls back to a nominal box (half an em per character, one em tall) so
    /// placement stays well defined.
    fn measure(&mut self, text: &str, size_px: f32) -> (f32, f32) {
        let Some(layout) = self.shape(text, size_px) else {
            return (text.chars().count() as f32 * size_px * 0.5, size_px);
        };
        let mut w = 0.0f32;
        let mut h = 0.0f32;
        for line in layout.lines() {
            let m = line.metrics();
            w = w.max(m.advance);
            h += m.ascent + m.descent;
        }
        (w, h)
    }
}

// First family registering a font at collection `index`. Collections (`.ttc`) register one
// family per face group, so the first family is not necessarily the selected face.
fn family_containing<Id, Fonts>(
    families: impl IntoIterator<Item = (Id, Fonts)>,
    index: u32,
) -> Option<Id>
where
    Fonts: IntoIterator<Item = u32>,
{
    families
        .into_iter()
        .find_map(|(id, fonts)| fonts.into_iter().any(|i| i == index).then_some(id))
}

fn draw_layout(
    raster: &mut Raster,
    layout: &parley::Layout<Brush>,
    font: &vello_cpu::peniko::FontData,
    transform: Affine,
    color: Rgb8,
) {
    let ctx = raster.ctx();
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_paint(color.with_alpha(255));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/card.rs"]
mod tests;
