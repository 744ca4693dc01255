use std::sync::{Mutex, PoisonError};

use anyhow::anyhow;

use crate::{
    foundation::error::SurfaceResult,
    render::backend::{FrameRGBA, PresentContext, RenderBackend},
    surface::buffer::PixelBuffer,
};

#[derive(Debug)]
struct SnapshotContext {
    width: u32,
    height: u32,
}

/// Backend that reads the buffer back on every present, standing in for a framebuffer device
/// scanning surface memory.
///
/// The last presented frame is kept as premultiplied [`FrameRGBA`].
#[derive(Debug)]
pub struct SnapshotBackend {
    name: String,
    last: Mutex<Option<FrameRGBA>>,
}

impl Default for SnapshotBackend {
    fn default() -> Self {
        Self::new("snapshot")
    }
}

impl SnapshotBackend {
    /// Create a snapshot backend registered under `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last: Mutex::new(None),
        }
    }

    /// The most recently presented frame.
    pub fn last_frame(&self) -> Option<FrameRGBA> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Take the most recently presented frame, leaving none behind.
    pub fn take_frame(&self) -> Option<FrameRGBA> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl RenderBackend for SnapshotBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self, pixels: &PixelBuffer) -> SurfaceResult<PresentContext> {
        Ok(Box::new(SnapshotContext {
            width: pixels.width(),
            height: pixels.height(),
        }))
    }

    fn destroy(&self, ctx: PresentContext) {
        drop(ctx);
    }

    fn present(&self, ctx: &mut PresentContext, pixels: &PixelBuffer) -> SurfaceResult<()> {
        let ctx = ctx
            .downcast_ref::<SnapshotContext>()
            .ok_or_else(|| anyhow!("context was not created by backend '{}'", self.name))?;
        if (ctx.width, ctx.height) != (pixels.width(), pixels.height()) {
            return Err(anyhow!(
                "present of {}x{} buffer on a {}x{} context",
                pixels.width(),
                pixels.height(),
                ctx.width,
                ctx.height
            )
            .into());
        }

        // Convert outside the lock.
        let frame = FrameRGBA::from_pixels(pixels);
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(frame);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/snapshot.rs"]
mod tests;
