use std::any::Any;

use crate::{
    foundation::{error::SurfaceResult, math::split_argb},
    surface::buffer::PixelBuffer,
};

/// Opaque per-surface state created by a [`RenderBackend`].
///
/// The context belongs to the backend that created it and must be handed back to that backend's
/// [`RenderBackend::destroy`]; surfaces do this on free/drop.
pub type PresentContext = Box<dyn Any + Send>;

/// A pluggable presentation target.
///
/// Backends are registered once with a [`crate::RendererRegistry`] and shared by every surface
/// they create contexts for.
pub trait RenderBackend: Send + Sync {
    /// Stable, non-empty backend identifier.
    fn name(&self) -> &str;

    /// Create the presentation context for a freshly allocated buffer.
    fn create(&self, pixels: &PixelBuffer) -> SurfaceResult<PresentContext>;

    /// Release a context previously returned by [`RenderBackend::create`].
    fn destroy(&self, ctx: PresentContext);

    /// Push the current buffer contents to the presentation target.
    fn present(&self, ctx: &mut PresentContext, pixels: &PixelBuffer) -> SurfaceResult<()>;
}

/// A surface readback as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; the `premultiplied` flag makes this explicit at API
/// boundaries.
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
    /// Read a pixel buffer back into premultiplied RGBA8.
    pub fn from_pixels(pixels: &PixelBuffer) -> Self {
        let mut data = Vec::with_capacity(pixels.byte_len());
        for &word in pixels.words() {
            data.extend_from_slice(&split_argb(word));
        }
        Self {
            width: pixels.width(),
            height: pixels.height(),
            data,
            premultiplied: true,
        }
    }

    /// Convert into a straight-alpha [`image::RgbaImage`] suitable for encoding.
    pub fn into_rgba_image(self) -> Option<image::RgbaImage> {
        let mut data = self.data;
        if self.premultiplied {
            for px in data.chunks_exact_mut(4) {
                let a = px[3];
                for c in &mut px[..3] {
                    *c = crate::foundation::math::unpremul_channel(a, *c);
                }
            }
        }
        image::RgbaImage::from_raw(self.width, self.height, data)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
