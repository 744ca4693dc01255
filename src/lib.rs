//! Wavyte surface engine: premultiplied ARGB surfaces bound to pluggable presentation backends.
//!
//! - Register one or more [`RenderBackend`]s in a [`RendererRegistry`]; the most recent wins
//! - Allocate, clone and free [`Surface`]s, or decode them from PNG/JPEG via [`decode_surface`]
//! - Draw with [`Surface::clear`] and [`Surface::set_pixel`], read back with
//!   [`Surface::get_pixel`] or [`Surface::to_rgba8`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Image files and decoding.
pub mod assets;
/// Presentation backends.
pub mod render;
/// Surfaces and pixel primitives.
pub mod surface;

pub use crate::foundation::core::{Color, Region};
pub use crate::foundation::error::{SurfaceError, SurfaceResult};
pub use crate::foundation::math::{pack_premul_argb, unpack_premul_argb};

pub use crate::assets::decode::{CodecFamily, DecodeOpts, DecodeStage, decode_surface};
pub use crate::assets::files::{DirFileSource, FileSource, MemoryFileSource, normalize_rel_path};
pub use crate::render::backend::{FrameRGBA, PresentContext, RenderBackend};
pub use crate::render::headless::{HeadlessBackend, HeadlessStats};
pub use crate::render::registry::RendererRegistry;
pub use crate::render::snapshot::SnapshotBackend;
pub use crate::surface::buffer::PixelBuffer;
pub use crate::surface::lifecycle::{Payload, Surface};
pub use crate::surface::ops::{SurfaceOp, apply_ops, parse_ops};
