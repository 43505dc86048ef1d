//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the pipeline's external
//! service traits, allowing batch lifecycle testing without a real storage
//! backend or image codec.
//!
//! # Example
//!
//! ```rust,ignore
//! use shutterwell_core::testing::{MockGateway, MockTranscoder};
//!
//! let gateway = MockGateway::new();
//! let transcoder = MockTranscoder::new();
//!
//! // Configure mock behavior
//! gateway.fail_download("file-3", GatewayError::Forbidden { id: "file-3".into() }).await;
//! transcoder.set_latency(Duration::from_millis(10)).await;
//!
//! // Use with BatchScheduler...
//! ```

mod mock_gateway;
mod mock_transcoder;

pub use mock_gateway::{MockGateway, RecordedUpload};
pub use mock_transcoder::{MockTranscoder, RecordedTranscode};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::gateway::{FileDescriptor, RemoteFileId, TargetFolder};

    /// Create a test file descriptor with reasonable defaults.
    pub fn jpeg_descriptor(id: &str, name: &str) -> FileDescriptor {
        FileDescriptor {
            id: RemoteFileId::from(id),
            name: name.to_string(),
            size_bytes: 1024 * 1024, // 1 MB
            mime_type: "image/jpeg".to_string(),
        }
    }

    /// Create a numbered batch of JPEG descriptors: photo-0.jpg, photo-1.jpg, ...
    pub fn jpeg_batch(count: usize) -> Vec<FileDescriptor> {
        (0..count)
            .map(|i| jpeg_descriptor(&format!("file-{i}"), &format!("photo-{i}.jpg")))
            .collect()
    }

    /// Create a test destination folder.
    pub fn target_folder(id: &str, name: &str) -> TargetFolder {
        TargetFolder {
            id: RemoteFileId::from(id),
            name: name.to_string(),
        }
    }
}
