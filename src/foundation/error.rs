use crate::assets::decode::DecodeStage;

/// Convenience result type used across the surface engine.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum SurfaceError {
    /// Invalid caller-provided data, such as a file name escaping its root.
    #[error("validation error: {0}")]
    Validation(String),

    /// Pixel memory or a backend presentation context could not be obtained.
    ///
    /// Allocation is always rolled back before this is returned.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// The file name does not carry an extension of a supported codec family.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Malformed input, short read or codec-internal failure while decoding.
    #[error("decode error ({stage}): {message}")]
    Decode {
        /// Decoder state the failure happened in.
        stage: DecodeStage,
        /// Human readable cause.
        message: String,
    },

    /// Invalid backend registration request.
    #[error("registry error: {0}")]
    Registry(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SurfaceError {
    /// Build a [`SurfaceError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SurfaceError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`SurfaceError::UnsupportedFormat`] value.
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`SurfaceError::Decode`] value.
    pub fn decode(stage: DecodeStage, msg: impl Into<String>) -> Self {
        Self::Decode {
            stage,
            message: msg.into(),
        }
    }

    /// Build a [`SurfaceError::Registry`] value.
    pub fn registry(msg: impl Into<String>) -> Self {
        Self::Registry(msg.into())
    }

    /// Build a [`SurfaceError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for every decode failure, including unsupported formats.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::UnsupportedFormat(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
