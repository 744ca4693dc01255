use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    foundation::error::{SurfaceError, SurfaceResult},
    render::backend::RenderBackend,
};

/// Ordered set of presentation backends where the most recently registered entry wins.
///
/// Last-registered-wins models boot-time specialization: a hardware backend registered after a
/// generic fallback becomes the active one. The list lock is only held while the list itself is
/// touched; callers receive cloned `Arc`s and never hold the lock across allocation or IO.
#[derive(Default)]
pub struct RendererRegistry {
    // Oldest first; the active backend is the last element.
    backends: Mutex<Vec<Arc<dyn RenderBackend>>>,
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("backends", &self.names())
            .finish()
    }
}

impl RendererRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn list(&self) -> MutexGuard<'_, Vec<Arc<dyn RenderBackend>>> {
        // The list is valid after any panic: every mutation is a single push or remove.
        self.backends.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `backend` as the new active backend.
    ///
    /// Registering a backend that is already present moves it to the head.
    pub fn register(&self, backend: Arc<dyn RenderBackend>) -> SurfaceResult<()> {
        if backend.name().is_empty() {
            return Err(SurfaceError::registry("backend name must be non-empty"));
        }
        let depth = {
            let mut list = self.list();
            list.retain(|b| !Arc::ptr_eq(b, &backend));
            list.push(Arc::clone(&backend));
            list.len()
        };
        tracing::debug!(backend = backend.name(), depth, "registered render backend");
        Ok(())
    }

    /// Remove `backend` by identity. Returns whether it was registered.
    pub fn unregister(&self, backend: &Arc<dyn RenderBackend>) -> SurfaceResult<bool> {
        if backend.name().is_empty() {
            return Err(SurfaceError::registry("backend name must be non-empty"));
        }
        let removed = {
            let mut list = self.list();
            let before = list.len();
            list.retain(|b| !Arc::ptr_eq(b, backend));
            before != list.len()
        };
        tracing::debug!(backend = backend.name(), removed, "unregistered render backend");
        Ok(removed)
    }

    /// The most recently registered backend, if any.
    pub fn active(&self) -> Option<Arc<dyn RenderBackend>> {
        self.list().last().cloned()
    }

    /// The most recently registered backend named `name`.
    pub fn find(&self, name: &str) -> Option<Arc<dyn RenderBackend>> {
        self.list().iter().rev().find(|b| b.name() == name).cloned()
    }

    /// Backend names, active first.
    pub fn names(&self) -> Vec<String> {
        self.list()
            .iter()
            .rev()
            .map(|b| b.name().to_owned())
            .collect()
    }

    /// Number of registered backends.
    pub fn len(&self) -> usize {
        self.list().len()
    }

    /// Return `true` when no backend is registered.
    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/registry.rs"]
mod tests;
