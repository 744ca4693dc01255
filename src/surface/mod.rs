//! Surfaces: pixel buffers bound to a presentation context, plus the pixel primitives.

/// Premultiplied ARGB pixel storage.
pub mod buffer;
pub(crate) mod composite;
/// Surface allocation, cloning and teardown.
pub mod lifecycle;
/// Serializable operation lists.
pub mod ops;
