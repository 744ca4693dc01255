//! Premultiplication arithmetic shared by the compositing primitives and the decode row
//! transforms. Both paths must produce identical words for identical inputs.

/// Word written for fully transparent black.
pub(crate) const TRANSPARENT_ARGB: u32 = 0;

/// Word written for opaque white; the only value eligible for the byte-fill clear path.
pub(crate) const OPAQUE_WHITE_ARGB: u32 = 0xFFFF_FFFF;

/// `round(a * c / 255)` with half-up rounding, without a division.
#[inline]
pub(crate) fn premul_channel(a: u8, c: u8) -> u8 {
    let t = u32::from(a) * u32::from(c) + 0x80;
    ((t + (t >> 8)) >> 8) as u8
}

/// Inverse of [`premul_channel`], saturating at 255.
#[inline]
pub(crate) fn unpremul_channel(a: u8, c: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let a = u32::from(a);
    ((u32::from(c) * 255 + a / 2) / a).min(255) as u8
}

/// Pack straight RGBA8 into a premultiplied `a<<24 | r<<16 | g<<8 | b` word.
#[inline]
pub fn pack_premul_argb(r: u8, g: u8, b: u8, a: u8) -> u32 {
    if a == 0 {
        return TRANSPARENT_ARGB;
    }
    (u32::from(a) << 24)
        | (u32::from(premul_channel(a, r)) << 16)
        | (u32::from(premul_channel(a, g)) << 8)
        | u32::from(premul_channel(a, b))
}

/// Pack an opaque RGB8 triple; equal to `pack_premul_argb(r, g, b, 255)`.
#[inline]
pub(crate) fn pack_opaque_argb(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Split a premultiplied word into its `[r, g, b, a]` bytes, still premultiplied.
#[inline]
pub(crate) fn split_argb(v: u32) -> [u8; 4] {
    [(v >> 16) as u8, (v >> 8) as u8, v as u8, (v >> 24) as u8]
}

/// Decode a premultiplied word back into straight `[r, g, b, a]`.
#[inline]
pub fn unpack_premul_argb(v: u32) -> [u8; 4] {
    let [r, g, b, a] = split_argb(v);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    [
        unpremul_channel(a, r),
        unpremul_channel(a, g),
        unpremul_channel(a, b),
        a,
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
