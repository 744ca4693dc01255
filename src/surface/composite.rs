//! Clip-aware pixel primitives writing straight into a surface's buffer.

use crate::{
    foundation::{
        core::{ClipRect, Color, Region},
        math::{OPAQUE_WHITE_ARGB, TRANSPARENT_ARGB},
    },
    surface::{
        buffer::{BYTES_PER_PIXEL, PixelBuffer},
        lifecycle::Surface,
    },
};

impl Surface {
    /// Fill `region` (or the whole surface) with `color`, or with transparent black when `color`
    /// is `None`.
    pub fn clear(&mut self, color: Option<Color>, region: Option<Region>) {
        let v = color.map_or(TRANSPARENT_ARGB, Color::to_premul_argb);
        let px = &mut self.pixels;
        match region {
            Some(region) => {
                if let Some(rect) = region.clip(px.width(), px.height()) {
                    fill_rect(px, rect, v);
                }
            }
            None if v == TRANSPARENT_ARGB => px.bytes_mut().fill(0),
            None if v == OPAQUE_WHITE_ARGB => px.bytes_mut().fill(0xFF),
            None => px.words_mut().fill(v),
        }
    }

    /// Store `color` at `(x, y)`. Out-of-bounds coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.pixels.index(x, y) {
            self.pixels.words_mut()[i] = color.to_premul_argb();
        }
    }

    /// Read `(x, y)` as a straight color; transparent black outside the surface.
    pub fn get_pixel(&self, x: i32, y: i32) -> Color {
        self.pixels.index(x, y).map_or(Color::TRANSPARENT, |i| {
            Color::from_premul_argb(self.pixels.words()[i])
        })
    }
}

fn fill_rect(px: &mut PixelBuffer, rect: ClipRect, v: u32) {
    let row_words = px.stride() / BYTES_PER_PIXEL;
    let words = px.words_mut();
    for y in rect.y0..rect.y1 {
        let base = y * row_words;
        words[base + rect.x0..base + rect.x1].fill(v);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/composite.rs"]
mod tests;
