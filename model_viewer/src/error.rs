//! Error types for the model viewer
//!
//! This module defines the error types used throughout the viewer,
//! including texture decoding, asset resolution, GPU backends and
//! per-pass render failures.

use std::fmt;
use crate::frame::DrawStep;

/// Result type for viewer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Model viewer errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (GPU device, command recording, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (buffer, texture, configuration value, etc.)
    InvalidResource(String),

    /// Initialization failed (render context, default textures, shaders)
    InitializationFailed(String),

    /// Texture compression tag is not one of DXT1/DXT3/DXT5 (holds the tag)
    UnsupportedFormat(String),

    /// Requested texture or mesh byte source is absent
    MissingAsset(String),

    /// Asset bytes are present but truncated or carry impossible header values
    MalformedAsset(String),

    /// A draw step failed while executing
    RenderPass {
        /// Step that failed
        step: DrawStep,
        /// Underlying failure
        message: String,
    },
}

impl Error {
    /// Returns true for errors that are handled locally by substituting a
    /// fallback (default texture, empty submesh) instead of failing the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedFormat(_) | Error::MissingAsset(_) | Error::MalformedAsset(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::UnsupportedFormat(tag) => write!(f, "Unsupported texture format: {}", tag),
            Error::MissingAsset(name) => write!(f, "Missing asset: {}", name),
            Error::MalformedAsset(msg) => write!(f, "Malformed asset: {}", msg),
            Error::RenderPass { step, message } => {
                write!(f, "Render pass {} failed: {}", step, message)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
