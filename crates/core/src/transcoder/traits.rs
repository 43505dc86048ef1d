//! Trait definitions for the transcoder module.

use async_trait::async_trait;
use bytes::Bytes;

use super::error::TranscoderError;

/// A transcoder that converts one in-memory image buffer to the target codec.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Returns the name of this transcoder implementation.
    fn name(&self) -> &str;

    /// Converts `image_bytes` to the target codec at `quality`.
    ///
    /// `quality` must be in (0, 1]. The returned buffer is never empty.
    async fn transcode(&self, image_bytes: Bytes, quality: f32) -> Result<Bytes, TranscoderError>;

    /// Validates that the transcoder is properly configured.
    fn validate(&self) -> Result<(), TranscoderError>;

    /// Returns the file extension of the target codec, without the dot.
    fn target_extension(&self) -> &'static str {
        "webp"
    }
}
