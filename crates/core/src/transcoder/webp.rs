//! Lossy WebP transcoder implementation.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use image::imageops::FilterType;
use tracing::debug;

use super::config::TranscoderConfig;
use super::error::TranscoderError;
use super::traits::Transcoder;

/// Transcoder that decodes with the `image` crate and encodes lossy WebP.
///
/// Decode, resample, and encode run on the blocking thread pool; the whole
/// operation is bounded by the configured timeout since the underlying
/// codec primitives do not enforce one themselves.
pub struct WebpTranscoder {
    config: TranscoderConfig,
}

impl WebpTranscoder {
    /// Creates a new transcoder from configuration.
    pub fn new(config: TranscoderConfig) -> Self {
        Self { config }
    }

    /// Creates a transcoder with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TranscoderConfig::default())
    }
}

/// Computes the output dimensions for an input bounded by `max_dimension`.
///
/// The longer side of an oversized input becomes exactly `max_dimension`;
/// the other side is rounded, preserving the aspect ratio. Inputs within
/// the bound keep their dimensions.
pub fn scaled_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longer = width.max(height);
    if longer <= max_dimension {
        return (width, height);
    }
    let scale = f64::from(max_dimension) / f64::from(longer);
    let scaled_w = ((f64::from(width) * scale).round() as u32).max(1);
    let scaled_h = ((f64::from(height) * scale).round() as u32).max(1);
    (scaled_w, scaled_h)
}

fn transcode_blocking(
    image_bytes: &[u8],
    quality: f32,
    max_dimension: u32,
) -> Result<Bytes, TranscoderError> {
    let decoded =
        image::load_from_memory(image_bytes).map_err(|e| TranscoderError::decode(e.to_string()))?;

    let (width, height) = (decoded.width(), decoded.height());
    let (target_w, target_h) = scaled_dimensions(width, height, max_dimension);

    let resized = if (target_w, target_h) != (width, height) {
        debug!(
            from = format!("{width}x{height}"),
            to = format!("{target_w}x{target_h}"),
            "Downscaling oversized image"
        );
        decoded.resize_exact(target_w, target_h, FilterType::Lanczos3)
    } else {
        decoded
    };

    let rgba = resized.to_rgba8();
    let encoder = ::webp::Encoder::from_rgba(&rgba, target_w, target_h);
    let encoded = encoder.encode(quality * 100.0);
    if encoded.is_empty() {
        return Err(TranscoderError::encode("encoder produced empty output"));
    }

    Ok(Bytes::copy_from_slice(&encoded))
}

#[async_trait]
impl Transcoder for WebpTranscoder {
    fn name(&self) -> &str {
        "webp"
    }

    async fn transcode(&self, image_bytes: Bytes, quality: f32) -> Result<Bytes, TranscoderError> {
        if !(quality > 0.0 && quality <= 1.0) {
            return Err(TranscoderError::InvalidQuality { quality });
        }

        let max_dimension = self.config.max_dimension;
        let timeout = Duration::from_secs(self.config.timeout_secs);

        // The blocking task cannot be aborted once started; on timeout its
        // handle is dropped and any late result is discarded.
        let work =
            tokio::task::spawn_blocking(move || transcode_blocking(&image_bytes, quality, max_dimension));

        match tokio::time::timeout(timeout, work).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(TranscoderError::encode(format!(
                "transcode worker failed: {join_err}"
            ))),
            Err(_) => Err(TranscoderError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }),
        }
    }

    fn validate(&self) -> Result<(), TranscoderError> {
        if self.config.max_dimension == 0 {
            return Err(TranscoderError::encode("max_dimension cannot be 0"));
        }
        if self.config.timeout_secs == 0 {
            return Err(TranscoderError::encode("timeout_secs cannot be 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use image::{ImageBuffer, Rgb};

    fn sample_jpeg(width: u32, height: u32) -> Bytes {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128u8])
        });
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, 90)
            .encode_image(&img)
            .unwrap();
        Bytes::from(out)
    }

    #[test]
    fn test_scaled_dimensions_within_bound_unchanged() {
        assert_eq!(scaled_dimensions(1920, 1080, 3840), (1920, 1080));
        assert_eq!(scaled_dimensions(3840, 2160, 3840), (3840, 2160));
    }

    #[test]
    fn test_scaled_dimensions_longer_side_hits_bound() {
        assert_eq!(scaled_dimensions(8000, 4000, 3840), (3840, 1920));
        assert_eq!(scaled_dimensions(4000, 8000, 3840), (1920, 3840));
    }

    #[test]
    fn test_scaled_dimensions_rounding_preserves_aspect() {
        let (w, h) = scaled_dimensions(4001, 3000, 3840);
        assert_eq!(w, 3840);
        // 3000 * 3840 / 4001 = 2879.28, rounds to 2879
        assert_eq!(h, 2879);
    }

    #[tokio::test]
    async fn test_transcode_produces_webp() {
        let transcoder = WebpTranscoder::with_defaults();
        let out = transcoder.transcode(sample_jpeg(32, 16), 0.8).await.unwrap();

        assert!(!out.is_empty());
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 16));
    }

    #[tokio::test]
    async fn test_transcode_downscales_oversized_input() {
        let config = TranscoderConfig::default().with_max_dimension(64);
        let transcoder = WebpTranscoder::new(config);

        let out = transcoder.transcode(sample_jpeg(128, 64), 0.8).await.unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 32));
    }

    #[tokio::test]
    async fn test_transcode_dimensions_are_deterministic() {
        let config = TranscoderConfig::default().with_max_dimension(48);
        let transcoder = WebpTranscoder::new(config);
        let input = sample_jpeg(96, 60);

        let first = transcoder.transcode(input.clone(), 0.5).await.unwrap();
        let second = transcoder.transcode(input, 0.5).await.unwrap();

        let a = image::load_from_memory(&first).unwrap();
        let b = image::load_from_memory(&second).unwrap();
        assert_eq!((a.width(), a.height()), (b.width(), b.height()));
    }

    #[tokio::test]
    async fn test_transcode_rejects_undecodable_input() {
        let transcoder = WebpTranscoder::with_defaults();
        let result = transcoder
            .transcode(Bytes::from_static(b"definitely not an image"), 0.8)
            .await;
        assert!(matches!(result, Err(TranscoderError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_transcode_rejects_invalid_quality() {
        let transcoder = WebpTranscoder::with_defaults();
        for quality in [0.0, -0.5, 1.5] {
            let result = transcoder.transcode(sample_jpeg(8, 8), quality).await;
            assert!(matches!(
                result,
                Err(TranscoderError::InvalidQuality { .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_transcode_times_out() {
        // A zero-second bound expires on the first poll, before the blocking
        // decode of a non-trivial image can finish.
        let config = TranscoderConfig::default().with_timeout_secs(0);
        let transcoder = WebpTranscoder::new(config);
        let result = transcoder.transcode(sample_jpeg(512, 512), 0.8).await;
        assert!(matches!(result, Err(TranscoderError::Timeout { .. })));
    }

    #[test]
    fn test_validate() {
        assert!(WebpTranscoder::with_defaults().validate().is_ok());
        let bad = WebpTranscoder::new(TranscoderConfig::default().with_max_dimension(0));
        assert!(bad.validate().is_err());
    }
}
