//! Image files: the read-only file collaborator and the PNG/JPEG decode adapter.

/// PNG and JPEG decoding into surfaces.
pub mod decode;
/// File collaborators the decoder reads through.
pub mod files;
