//! Transcoder module for converting image buffers to WebP.
//!
//! This module provides the `Transcoder` trait and the `WebpTranscoder`
//! implementation, which decodes an in-memory image, downscales it when a
//! dimension exceeds the configured bound, and re-encodes it as lossy WebP
//! at a requested quality.
//!
//! # Example
//!
//! ```ignore
//! use shutterwell_core::transcoder::{Transcoder, TranscoderConfig, WebpTranscoder};
//!
//! let transcoder = WebpTranscoder::new(TranscoderConfig::default());
//! transcoder.validate()?;
//!
//! let webp_bytes = transcoder.transcode(jpeg_bytes, 0.8).await?;
//! ```

mod config;
mod error;
mod traits;
mod webp;

pub use config::TranscoderConfig;
pub use error::TranscoderError;
pub use traits::Transcoder;
pub use webp::{scaled_dimensions, WebpTranscoder};
