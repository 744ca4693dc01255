use crate::foundation::math::{pack_premul_argb, unpack_premul_argb};

/// Straight (non-premultiplied) RGBA8 color used at API boundaries.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 when omitted in serialized form.
    #[serde(default = "opaque_alpha")]
    pub a: u8,
}

fn opaque_alpha() -> u8 {
    255
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    /// Build a color from straight channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Encode into the canonical premultiplied ARGB word.
    pub fn to_premul_argb(self) -> u32 {
        pack_premul_argb(self.r, self.g, self.b, self.a)
    }

    /// Decode a canonical premultiplied ARGB word.
    pub fn from_premul_argb(v: u32) -> Self {
        let [r, g, b, a] = unpack_premul_argb(v);
        Self { r, g, b, a }
    }
}

/// Caller supplied clip rectangle. May lie partially or fully outside a buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Region {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Width in pixels.
    #[serde(alias = "w")]
    pub width: i32,
    /// Height in pixels.
    #[serde(alias = "h")]
    pub height: i32,
}

impl Region {
    /// Build a region.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersect with `[0, width) x [0, height)`.
    ///
    /// Returns `None` when the intersection is empty.
    pub(crate) fn clip(self, width: u32, height: u32) -> Option<ClipRect> {
        let (x0, x1) = clip_axis(self.x, self.width, width)?;
        let (y0, y1) = clip_axis(self.y, self.height, height)?;
        Some(ClipRect { x0, y0, x1, y1 })
    }
}

fn clip_axis(origin: i32, extent: i32, limit: u32) -> Option<(usize, usize)> {
    let lo = i64::from(origin).max(0);
    let hi = (i64::from(origin) + i64::from(extent)).min(i64::from(limit));
    if lo >= hi {
        return None;
    }
    Some((lo as usize, hi as usize))
}

/// Non-empty rectangle already clamped to a buffer, half-open on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ClipRect {
    pub(crate) x0: usize,
    pub(crate) y0: usize,
    pub(crate) x1: usize,
    pub(crate) y1: usize,
}

impl ClipRect {
    pub(crate) fn width(self) -> usize {
        self.x1 - self.x0
    }

    pub(crate) fn height(self) -> usize {
        self.y1 - self.y0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
