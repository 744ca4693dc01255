use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::anyhow;

use crate::{
    foundation::error::SurfaceResult,
    render::backend::{PresentContext, RenderBackend},
    surface::buffer::PixelBuffer,
};

/// Context created by [`HeadlessBackend`] for each surface.
#[derive(Debug)]
struct HeadlessContext {
    width: u32,
    height: u32,
    presents: u64,
}

/// Lifetime counters of a [`HeadlessBackend`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeadlessStats {
    /// Contexts created.
    pub created: u64,
    /// Contexts destroyed.
    pub destroyed: u64,
    /// Present calls.
    pub presented: u64,
}

impl HeadlessStats {
    /// Contexts created and not yet destroyed.
    pub fn live(self) -> u64 {
        self.created.saturating_sub(self.destroyed)
    }
}

/// Generic fallback backend without a display: contexts only track their geometry and present
/// calls are counted.
#[derive(Debug)]
pub struct HeadlessBackend {
    name: String,
    created: AtomicU64,
    destroyed: AtomicU64,
    presented: AtomicU64,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new("headless")
    }
}

impl HeadlessBackend {
    /// Create a headless backend registered under `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: AtomicU64::new(0),
            destroyed: AtomicU64::new(0),
            presented: AtomicU64::new(0),
        }
    }

    /// Snapshot the lifetime counters.
    pub fn stats(&self) -> HeadlessStats {
        HeadlessStats {
            created: self.created.load(Ordering::Relaxed),
            destroyed: self.destroyed.load(Ordering::Relaxed),
            presented: self.presented.load(Ordering::Relaxed),
        }
    }
}

impl RenderBackend for HeadlessBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self, pixels: &PixelBuffer) -> SurfaceResult<PresentContext> {
        self.created.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(HeadlessContext {
            width: pixels.width(),
            height: pixels.height(),
            presents: 0,
        }))
    }

    fn destroy(&self, ctx: PresentContext) {
        self.destroyed.fetch_add(1, Ordering::Relaxed);
        if let Ok(ctx) = ctx.downcast::<HeadlessContext>() {
            tracing::trace!(
                backend = %self.name,
                width = ctx.width,
                height = ctx.height,
                presents = ctx.presents,
                "destroyed headless context"
            );
        }
    }

    fn present(&self, ctx: &mut PresentContext, pixels: &PixelBuffer) -> SurfaceResult<()> {
        let ctx = ctx
            .downcast_mut::<HeadlessContext>()
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
        ctx.presents += 1;
        self.presented.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/headless.rs"]
mod tests;
