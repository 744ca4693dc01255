//! Value types, error taxonomy and pixel arithmetic shared by every other module.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
