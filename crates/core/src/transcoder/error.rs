//! Error types for the transcoder module.

use thiserror::Error;

/// Errors that can occur while transcoding an image buffer.
#[derive(Debug, Clone, Error)]
pub enum TranscoderError {
    /// The input bytes do not decode as a raster image.
    #[error("Image decode failed: {reason}")]
    Decode { reason: String },

    /// Encoding produced no output or the encode worker failed.
    #[error("WebP encode failed: {reason}")]
    Encode { reason: String },

    /// The operation exceeded the configured time bound.
    #[error("Transcode timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Quality outside the accepted (0, 1] range.
    #[error("Invalid quality {quality}, expected a value in (0, 1]")]
    InvalidQuality { quality: f32 },
}

impl TranscoderError {
    /// Creates a decode error from any displayable cause.
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    /// Creates an encode error from any displayable cause.
    pub fn encode(reason: impl Into<String>) -> Self {
        Self::Encode {
            reason: reason.into(),
        }
    }
}
