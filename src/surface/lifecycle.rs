use std::{any::Any, sync::Arc};

use crate::{
    foundation::{
        core::{ClipRect, Region},
        error::{SurfaceError, SurfaceResult},
    },
    render::{
        backend::{FrameRGBA, PresentContext, RenderBackend},
        registry::RendererRegistry,
    },
    surface::buffer::{BYTES_PER_PIXEL, PixelBuffer},
};

/// Caller data attached to a surface. The surface never inspects it and clones never inherit it.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// A pixel buffer bound to a presentation context.
///
/// A `Surface` value always holds a live context created by `backend`; construction either
/// fully succeeds or releases everything it obtained. Teardown (explicit [`Surface::free`] or
/// drop) destroys the context before the pixel memory is released, since backends may scan the
/// buffer until their context is gone.
pub struct Surface {
    pub(crate) pixels: PixelBuffer,
    backend: Arc<dyn RenderBackend>,
    context: PresentContext,
    payload: Option<Payload>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .field("backend", &self.backend.name())
            .field("payload", &self.payload.is_some())
            .finish()
    }
}

impl Surface {
    /// Allocate a zeroed `width x height` surface on the registry's active backend.
    ///
    /// Negative dimensions fail before any backend is consulted.
    pub fn allocate(
        registry: &RendererRegistry,
        width: i32,
        height: i32,
        payload: Option<Payload>,
    ) -> SurfaceResult<Self> {
        let (w, h) = checked_dims(width, height)?;
        Self::allocate_unsigned(registry, w, h, payload)
    }

    pub(crate) fn allocate_unsigned(
        registry: &RendererRegistry,
        width: u32,
        height: u32,
        payload: Option<Payload>,
    ) -> SurfaceResult<Self> {
        let pixels = PixelBuffer::zeroed(width, height)?;
        let backend = registry
            .active()
            .ok_or_else(|| SurfaceError::allocation("no render backend registered"))?;
        Self::bind(backend, pixels, payload)
    }

    fn bind(
        backend: Arc<dyn RenderBackend>,
        pixels: PixelBuffer,
        payload: Option<Payload>,
    ) -> SurfaceResult<Self> {
        let context = backend.create(&pixels).map_err(|e| {
            SurfaceError::allocation(format!(
                "backend '{}' could not create a context: {e}",
                backend.name()
            ))
        })?;
        tracing::trace!(
            backend = backend.name(),
            width = pixels.width(),
            height = pixels.height(),
            "surface bound"
        );
        Ok(Self {
            pixels,
            backend,
            context,
            payload,
        })
    }

    /// Deep copy of the whole surface on the same backend. The payload is not copied.
    pub fn duplicate(&self) -> SurfaceResult<Self> {
        let pixels = self.pixels.try_clone()?;
        Self::bind(Arc::clone(&self.backend), pixels, None)
    }

    /// Copy `region` (or everything when `None`) into a new surface on the same backend.
    ///
    /// The region is clamped to the source bounds first; an empty intersection yields
    /// `Ok(None)`, never a zero-sized surface. The payload is not copied.
    pub fn clone_region(&self, region: Option<Region>) -> SurfaceResult<Option<Self>> {
        let Some(region) = region else {
            return self.duplicate().map(Some);
        };
        let Some(rect) = region.clip(self.pixels.width(), self.pixels.height()) else {
            return Ok(None);
        };
        let pixels = copy_rect(&self.pixels, rect)?;
        Self::bind(Arc::clone(&self.backend), pixels, None).map(Some)
    }

    /// Tear the surface down: context first, then pixel memory.
    pub fn free(self) {
        drop(self);
    }

    /// [`Surface::free`] that accepts an absent surface.
    pub fn free_opt(surface: Option<Self>) {
        if let Some(s) = surface {
            s.free();
        }
    }

    /// Push the current pixels to the backend.
    pub fn present(&mut self) -> SurfaceResult<()> {
        self.backend.present(&mut self.context, &self.pixels)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.pixels.stride()
    }

    /// Total bytes of pixel data.
    pub fn byte_len(&self) -> usize {
        self.pixels.byte_len()
    }

    /// Borrow the pixel buffer.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Mutable premultiplied ARGB words, row-major.
    ///
    /// Only the contents are writable; the geometry stays fixed for the life of the context.
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        self.pixels.words_mut()
    }

    /// Pixel bytes in native word order.
    pub fn bytes(&self) -> &[u8] {
        self.pixels.bytes()
    }

    /// Mutable pixel bytes in native word order.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        self.pixels.bytes_mut()
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.pixels
    }

    /// Caller payload given at allocation.
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// The backend owning this surface's context.
    pub fn backend(&self) -> &Arc<dyn RenderBackend> {
        &self.backend
    }

    /// Name of the backend owning this surface's context.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Read the pixels back as premultiplied RGBA8.
    pub fn to_rgba8(&self) -> FrameRGBA {
        FrameRGBA::from_pixels(&self.pixels)
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        // A boxed unit stands in for the destroyed context.
        let ctx = std::mem::replace(&mut self.context, Box::new(()));
        self.backend.destroy(ctx);
    }
}

fn checked_dims(width: i32, height: i32) -> SurfaceResult<(u32, u32)> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(SurfaceError::allocation(format!(
            "negative surface size {width}x{height}"
        ))),
    }
}

fn copy_rect(src: &PixelBuffer, rect: ClipRect) -> SurfaceResult<PixelBuffer> {
    // Clipped extents never exceed the source's u32 dimensions.
    let mut dst = PixelBuffer::zeroed(rect.width() as u32, rect.height() as u32)?;
    let src_stride = src.stride();
    let dst_stride = dst.stride();
    let src_bytes = src.bytes();
    let dst_bytes = dst.bytes_mut();

    let mut q = rect.y0 * src_stride + rect.x0 * BYTES_PER_PIXEL;
    for row in dst_bytes.chunks_exact_mut(dst_stride) {
        row.copy_from_slice(&src_bytes[q..q + dst_stride]);
        q += src_stride;
    }
    Ok(dst)
}

#[cfg(test)]
#[path = "../../tests/unit/surface/lifecycle.rs"]
mod tests;
