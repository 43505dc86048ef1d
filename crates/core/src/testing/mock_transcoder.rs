//! Mock transcoder for testing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use crate::transcoder::{Transcoder, TranscoderError};

/// A recorded transcode job for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedTranscode {
    /// Size of the input buffer.
    pub input_bytes: usize,
    /// Requested quality.
    pub quality: f32,
    /// Whether the transcode succeeded.
    pub success: bool,
}

/// Mock implementation of the `Transcoder` trait.
///
/// Provides controllable behavior for testing:
/// - Record transcode jobs for assertions
/// - Inject a one-shot error
/// - Configure the output payload and artificial latency
#[derive(Debug, Clone)]
pub struct MockTranscoder {
    jobs: Arc<RwLock<Vec<RecordedTranscode>>>,
    next_error: Arc<RwLock<Option<TranscoderError>>>,
    output: Arc<RwLock<Bytes>>,
    latency_ms: Arc<RwLock<u64>>,
}

impl Default for MockTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranscoder {
    /// Create a new mock transcoder.
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            output: Arc::new(RwLock::new(Bytes::from_static(b"webp-output-bytes"))),
            latency_ms: Arc::new(RwLock::new(0)),
        }
    }

    /// Configure the next transcode to fail with the given error.
    pub async fn set_next_error(&self, error: TranscoderError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set the buffer returned by successful transcodes.
    pub async fn set_output(&self, output: Bytes) {
        *self.output.write().await = output;
    }

    /// Set artificial latency applied to every transcode.
    pub async fn set_latency(&self, latency: Duration) {
        *self.latency_ms.write().await = latency.as_millis() as u64;
    }

    /// Get all recorded transcodes.
    pub async fn recorded_transcodes(&self) -> Vec<RecordedTranscode> {
        self.jobs.read().await.clone()
    }

    /// Get the number of transcodes performed.
    pub async fn transcode_count(&self) -> usize {
        self.jobs.read().await.len()
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn transcode(&self, image_bytes: Bytes, quality: f32) -> Result<Bytes, TranscoderError> {
        let latency = *self.latency_ms.read().await;
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        if let Some(err) = self.next_error.write().await.take() {
            self.jobs.write().await.push(RecordedTranscode {
                input_bytes: image_bytes.len(),
                quality,
                success: false,
            });
            return Err(err);
        }

        self.jobs.write().await.push(RecordedTranscode {
            input_bytes: image_bytes.len(),
            quality,
            success: true,
        });
        Ok(self.output.read().await.clone())
    }

    fn validate(&self) -> Result<(), TranscoderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_jobs() {
        let transcoder = MockTranscoder::new();
        transcoder
            .transcode(Bytes::from_static(b"abc"), 0.7)
            .await
            .unwrap();

        let jobs = transcoder.recorded_transcodes().await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].input_bytes, 3);
        assert_eq!(jobs[0].quality, 0.7);
        assert!(jobs[0].success);
    }

    #[tokio::test]
    async fn test_error_injection_is_one_shot() {
        let transcoder = MockTranscoder::new();
        transcoder
            .set_next_error(TranscoderError::decode("bad input"))
            .await;

        let first = transcoder.transcode(Bytes::from_static(b"x"), 0.5).await;
        assert!(first.is_err());

        let second = transcoder.transcode(Bytes::from_static(b"x"), 0.5).await;
        assert!(second.is_ok());
        assert_eq!(transcoder.transcode_count().await, 2);
    }
}
