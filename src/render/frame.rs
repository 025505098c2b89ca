use crate::foundation::core::Rgb8;
use crate::foundation::error::{ShortsError, ShortsResult};
use crate::foundation::math::mul_div255_u16;

/// A rendered frame as RGBA8 pixels.
///
/// Frames produced by this crate are **premultiplied alpha**; the `premultiplied` flag keeps that
/// explicit at API boundaries (sinks, PNG export).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Fully transparent frame.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; byte_len(width, height)],
            premultiplied: true,
        }
    }

    /// Opaque frame filled with `color`.
    pub fn solid(width: u32, height: u32, color: Rgb8) -> Self {
        let mut data = Vec::with_capacity(byte_len(width, height));
        for _ in 0..(width as usize) * (height as usize) {
            data.extend_from_slice(&color.to_rgba8());
        }
        Self {
            width,
            height,
            data,
            premultiplied: true,
        }
    }

    /// Premultiplied RGBA8 value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// `true` when every pixel has alpha 255.
    pub fn is_opaque(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 255)
    }

    /// Draw `src` over `self` with its top-left corner at `(x, y)` (source-over, premultiplied).
    ///
    /// Parts of `src` falling outside `self` are clipped.
    pub fn composite_over(&mut self, src: &FrameRGBA, x: i64, y: i64) -> ShortsResult<()> {
        if !self.premultiplied || !src.premultiplied {
            return Err(ShortsError::validation(
                "composite_over expects premultiplied frames",
            ));
        }

        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(src.width)).min(i64::from(self.width));
        let y1 = (y + i64::from(src.height)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return Ok(());
        }

        let dst_stride = self.width as usize * 4;
        let src_stride = src.width as usize * 4;
        let span = (x1 - x0) as usize * 4;
        for dy in y0..y1 {
            let sy = (dy - y) as usize;
            let sx = (x0 - x) as usize;
            let d_off = dy as usize * dst_stride + x0 as usize * 4;
            let s_off = sy * src_stride + sx * 4;
            let dst_row = &mut self.data[d_off..d_off + span];
            let src_row = &src.data[s_off..s_off + span];
            for (d, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
                let a = s[3] as u16;
                if a == 255 {
                    d.copy_from_slice(s);
                    continue;
                }
                if a == 0 {
                    continue;
                }
                let inv = 255u16 - a;
                for c in 0..4 {
                    d[c] = (s[c] as u16 + mul_div255_u16(d[c] as u16, inv)).min(255) as u8;
                }
            }
        }
        Ok(())
    }

    /// Alpha-blend this frame onto an opaque `bg`, producing an opaque frame.
    pub fn flatten_over(&self, bg: Rgb8) -> FrameRGBA {
        let mut data = vec![0u8; self.data.len()];
        flatten_premul_over_bg_to_opaque_rgba8(&mut data, &self.data, bg.to_rgba8());
        FrameRGBA {
            width: self.width,
            height: self.height,
            data,
            premultiplied: true,
        }
    }

    /// Straight-alpha copy of the pixel data, suitable for PNG export.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = px[3] as u32;
            if a == 0 || a == 255 {
                continue;
            }
            for c in px.iter_mut().take(3) {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

pub(crate) fn byte_len(width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4)
}

pub(crate) fn flatten_premul_over_bg_to_opaque_rgba8(
    dst: &mut [u8],
    src_premul: &[u8],
    bg_rgba: [u8; 4],
) {
    let bg_r = bg_rgba[0] as u16;
    let bg_g = bg_rgba[1] as u16;
    let bg_b = bg_rgba[2] as u16;

    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = s[3] as u16;
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        let r = s[0] as u16 + mul_div255_u16(bg_r, inv);
        let g = s[1] as u16 + mul_div255_u16(bg_g, inv);
        let b = s[2] as u16 + mul_div255_u16(bg_b, inv);

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
