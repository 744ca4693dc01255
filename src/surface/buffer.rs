use crate::foundation::error::{SurfaceError, SurfaceResult};

/// Bytes per canonical pixel.
pub(crate) const BYTES_PER_PIXEL: usize = 4;

/// Zero-initialized premultiplied ARGB pixel storage.
///
/// Pixels are native-endian `u32` words `a<<24 | r<<16 | g<<8 | b`, row-major, with no padding:
/// the stride is always `width * 4` and the byte length `height * stride`. Word storage keeps the
/// buffer 4-byte aligned; byte views are reinterpretations of the same memory.
#[derive(Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    words: Vec<u32>,
}

impl PixelBuffer {
    /// Allocate a zeroed (fully transparent) buffer.
    pub(crate) fn zeroed(width: u32, height: u32) -> SurfaceResult<Self> {
        let len = pixel_count(width, height)?;
        let mut words = Vec::new();
        words.try_reserve_exact(len).map_err(|e| {
            SurfaceError::allocation(format!("{width}x{height} pixel buffer: {e}"))
        })?;
        words.resize(len, 0);
        Ok(Self {
            width,
            height,
            words,
        })
    }

    /// Allocate a buffer holding a copy of `self`.
    pub(crate) fn try_clone(&self) -> SurfaceResult<Self> {
        let mut words = Vec::new();
        words.try_reserve_exact(self.words.len()).map_err(|e| {
            SurfaceError::allocation(format!(
                "{}x{} pixel buffer: {e}",
                self.width, self.height
            ))
        })?;
        words.extend_from_slice(&self.words);
        Ok(Self {
            width: self.width,
            height: self.height,
            words,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Total bytes of pixel data.
    pub fn byte_len(&self) -> usize {
        self.height as usize * self.stride()
    }

    /// Pixels as premultiplied ARGB words.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Mutable pixels as premultiplied ARGB words.
    pub fn words_mut(&mut self) -> &mut [u32] {
        &mut self.words
    }

    /// Pixels as raw bytes in native word order.
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.words)
    }

    /// Mutable pixels as raw bytes in native word order.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut self.words)
    }

    /// Word index of `(x, y)`, or `None` outside the buffer.
    pub(crate) fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u32::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y as usize * self.width as usize + x as usize)
    }
}

fn pixel_count(width: u32, height: u32) -> SurfaceResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .filter(|px| px.checked_mul(BYTES_PER_PIXEL).is_some())
        .ok_or_else(|| {
            SurfaceError::allocation(format!("{width}x{height} pixel buffer overflows usize"))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/surface/buffer.rs"]
mod tests;
