use kurbo::Shape as _;

use crate::foundation::core::{Affine, Rgb8};
use crate::foundation::error::{ShortsError, ShortsResult};
use crate::render::frame::FrameRGBA;

// Flattening tolerance for circles and stroke outlines, in pixels.
const TOLERANCE: f64 = 0.1;

/// Thin wrapper over a `vello_cpu` render context sized to one output surface.
pub(crate) struct Raster {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl Raster {
    pub(crate) fn new(width: u32, height: u32) -> ShortsResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| ShortsError::validation("raster width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| ShortsError::validation("raster height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(ShortsError::validation("raster width/height must be non-zero"));
        }
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            width: w,
            height: h,
        })
    }

    pub(crate) fn ctx(&mut self) -> &mut vello_cpu::RenderContext {
        &mut self.ctx
    }

    pub(crate) fn fill_background(&mut self, color: Rgb8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color.with_alpha(255));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    pub(crate) fn fill_circle(&mut self, center: kurbo::Point, radius: f64, paint: vello_cpu::peniko::Color) {
        let path = kurbo::Circle::new(center, radius).to_path(TOLERANCE);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint);
        self.ctx.fill_path(&bezpath_to_cpu(&path));
    }

    /// Stroke `shape` by filling its `kurbo`-expanded outline.
    pub(crate) fn stroke_shape(
        &mut self,
        shape: &impl kurbo::Shape,
        width: f64,
        paint: vello_cpu::peniko::Color,
    ) {
        let style = kurbo::Stroke::new(width);
        let outline = kurbo::stroke(
            shape.path_elements(TOLERANCE),
            &style,
            &kurbo::StrokeOpts::default(),
            TOLERANCE,
        );
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint);
        self.ctx.fill_path(&bezpath_to_cpu(&outline));
    }

    /// Resolve all pending draws into a premultiplied frame.
    pub(crate) fn finish(mut self) -> FrameRGBA {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
