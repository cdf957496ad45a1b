use crate::color::mapping::ColorRules;
use crate::foundation::core::{DatasetKind, Rgba8};
use crate::foundation::math::{cell_count, mul_div255_u8};
use crate::render::buffer::PixelBuffer;
use crate::store::frame::RasterFrame;

/// Premultiplied RGBA8 quadruple.
pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Borrowed base-layer cells ready for color mapping.
#[derive(Clone, Copy, Debug)]
pub struct CellView<'a> {
    /// Dataset the cells belong to.
    pub kind: DatasetKind,
    /// Row-major cells.
    pub cells: &'a [f64],
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
    /// Valid-data range for continuous kinds.
    pub range: Option<(f64, f64)>,
}

impl CellView<'_> {
    /// `true` when `cells` matches `width * height` and is non-empty.
    pub fn is_usable(&self) -> bool {
        !self.cells.is_empty() && cell_count(self.width, self.height) == Some(self.cells.len())
    }
}

/// Color-map every cell of a base layer into a fresh buffer.
///
/// Each pixel is written exactly once with a fully opaque or fully transparent color.
/// An unusable view yields an empty buffer.
pub fn color_map(view: CellView<'_>, rules: &ColorRules) -> PixelBuffer {
    if !view.is_usable() {
        return PixelBuffer::default();
    }
    let mut data = Vec::with_capacity(view.cells.len() * 4);
    for &v in view.cells {
        let c = rules.color_for_cell(view.kind, v, view.range);
        // Partial alpha never reaches the base layer.
        let c = if c.a == 255 { c } else { Rgba8::TRANSPARENT };
        data.extend_from_slice(&c.to_array());
    }
    PixelBuffer {
        width: view.width,
        height: view.height,
        data,
    }
}

/// Draw an overlay mask with a flat color. Non-zero finite cells are features.
///
/// Non-feature cells are left untouched. An empty `dst` adopts the mask's size so overlays still
/// render when the base layer is missing. Returns `false` if the mask cannot be drawn (unusable
/// or a different size than `dst`).
pub fn draw_mask(dst: &mut PixelBuffer, mask: &RasterFrame, color: Rgba8) -> bool {
    if !mask.is_usable() {
        return false;
    }
    if dst.is_empty() {
        *dst = PixelBuffer::transparent(mask.width, mask.height);
    }
    if dst.width != mask.width || dst.height != mask.height {
        return false;
    }

    let src = color.premultiplied();
    for (px, &v) in dst.data.chunks_exact_mut(4).zip(&mask.cells) {
        if !is_feature(v) {
            continue;
        }
        let out = over([px[0], px[1], px[2], px[3]], src, 1.0);
        px.copy_from_slice(&out);
    }
    true
}

fn is_feature(v: f64) -> bool {
    v.is_finite() && v != 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
