use crate::foundation::math::cell_count;

/// A composited frame as RGBA8 pixels, one pixel per raster cell.
///
/// Data is **premultiplied alpha**, tightly packed, row-major. Base layers only ever write fully
/// opaque or fully transparent pixels, for which premultiplied and straight alpha coincide.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes.
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent buffer of the given size.
    pub fn transparent(width: u32, height: u32) -> Self {
        let len = cell_count(width, height).unwrap_or(0) * 4;
        Self {
            width,
            height,
            data: vec![0; len],
        }
    }

    /// `true` when the buffer has no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }

    /// Pixel at linear cell index `i`.
    pub fn pixel(&self, i: usize) -> Option<[u8; 4]> {
        let px = self.data.get(i * 4..i * 4 + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Pixel at `(x, y)`.
    pub fn pixel_xy(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixel(y as usize * self.width as usize + x as usize)
    }

    /// Iterate pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data.chunks_exact(4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Copy with alpha un-premultiplied, for image encoders expecting straight RGBA.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/buffer.rs"]
mod tests;
