//! Presentation backends and the registry that selects between them.

/// Backend contract and frame readback.
pub mod backend;
/// Counting backend without a display.
pub mod headless;
/// Ordered backend registry.
pub mod registry;
/// Readback backend keeping the last presented frame.
pub mod snapshot;
